//! Subject Context - Aggregate Root

use serde::{Deserialize, Serialize};

use super::{Chapter, SubjectId};

/// Subject 聚合根
///
/// 不变量:
/// - Chapter / Content / Exercise 只属于一个 Subject，无独立身份
/// - title、code 各自可作为查询 key（唯一性未强制）
/// - chapters 只追加，唯一的删除方式是按 chapter_code 移除
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(rename = "_id")]
    id: SubjectId,
    title: String,
    code: String,
    chapters: Vec<Chapter>,
}

impl Subject {
    /// 创建新课程（无章节）
    pub fn new(title: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: SubjectId::new(),
            title: title.into(),
            code: code.into(),
            chapters: Vec::new(),
        }
    }

    /// 创建带章节的课程
    pub fn with_chapters(
        title: impl Into<String>,
        code: impl Into<String>,
        chapters: Vec<Chapter>,
    ) -> Self {
        let mut subject = Self::new(title, code);
        subject.chapters = chapters;
        subject
    }

    // Getters
    pub fn id(&self) -> &SubjectId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// 第一个 chapter_code 匹配的章节下标
    pub fn chapter_position(&self, chapter_code: &str) -> Option<usize> {
        self.chapters
            .iter()
            .position(|c| c.chapter_code() == chapter_code)
    }

    pub fn chapter(&self, chapter_code: &str) -> Option<&Chapter> {
        self.chapter_position(chapter_code)
            .map(|index| &self.chapters[index])
    }

    pub fn chapter_mut(&mut self, chapter_code: &str) -> Option<&mut Chapter> {
        let index = self.chapter_position(chapter_code)?;
        self.chapter_at_mut(index)
    }

    pub fn chapter_at_mut(&mut self, index: usize) -> Option<&mut Chapter> {
        self.chapters.get_mut(index)
    }

    /// 追加章节
    pub fn add_chapter(&mut self, chapter: Chapter) {
        self.chapters.push(chapter);
    }

    /// 移除所有 chapter_code 匹配的章节，返回是否有章节被移除
    pub fn remove_chapter(&mut self, chapter_code: &str) -> bool {
        let before = self.chapters.len();
        self.chapters.retain(|c| c.chapter_code() != chapter_code);
        self.chapters.len() != before
    }
}
