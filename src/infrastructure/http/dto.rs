//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::ChapterContentsResponse;
use crate::domain::subject::Content;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 查询成功响应：`{"data": ...}`
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// 写入成功响应：`{"Success": "..."}`
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    #[serde(rename = "Success")]
    pub success: &'static str,
}

impl SuccessResponse {
    pub fn new(message: &'static str) -> Self {
        Self { success: message }
    }
}

// ============================================================================
// Subject DTOs
// ============================================================================

/// 章节请求体，缺失字段按空字符串处理
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChapterRequest {
    #[serde(default)]
    pub chapter_name: String,
    #[serde(default)]
    pub chapter_code: String,
}

/// 章节内容的 JSON 请求体，缺失字段按空字符串处理
#[derive(Debug, Default, Deserialize)]
pub struct AddContentRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub video: String,
}

/// 练习题请求体，缺失字段按空值处理，由 `Exercise::new` 校验
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddExerciseRequest {
    pub question: String,
    pub options: Vec<String>,
    pub correct_option: String,
}

/// 单个章节内容：`{"title": ..., "content": [...]}`
#[derive(Debug, Serialize)]
pub struct ChapterContentsDto {
    pub title: String,
    pub content: Vec<Content>,
}

impl From<ChapterContentsResponse> for ChapterContentsDto {
    fn from(response: ChapterContentsResponse) -> Self {
        Self {
            title: response.title,
            content: response.content,
        }
    }
}
