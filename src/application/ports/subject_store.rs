//! Subject Store Port - 文档存储出站端口
//!
//! Subject 以整篇文档存储，端口提供:
//! - 按等值过滤条件查找（可投影为部分字段）
//! - 定位到匹配章节后的数组追加 / 按条件移除
//! - 整篇文档保存
//!
//! 过滤、投影、数组更新的语义在本模块实现，各存储适配器共用

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::subject::{Chapter, Content, Exercise, Subject, SubjectId};

/// Store 错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

// ============================================================================
// Filter
// ============================================================================

/// 等值过滤条件，所有已设置的字段同时满足才算匹配
///
/// `chapter_code` 匹配 `chapters[].chapterCode`，同时决定位置操作符定位到哪个章节
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectFilter {
    pub title: Option<String>,
    pub code: Option<String>,
    pub chapter_code: Option<String>,
}

impl SubjectFilter {
    pub fn by_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn by_code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::default()
        }
    }

    pub fn with_chapter_code(mut self, chapter_code: impl Into<String>) -> Self {
        self.chapter_code = Some(chapter_code.into());
        self
    }

    pub fn matches(&self, subject: &Subject) -> bool {
        let title_ok = self.title.as_deref().map_or(true, |t| subject.title() == t);
        let code_ok = self.code.as_deref().map_or(true, |c| subject.code() == c);
        let chapter_ok = self
            .chapter_code
            .as_deref()
            .map_or(true, |k| subject.chapter_position(k).is_some());
        title_ok && code_ok && chapter_ok
    }

    /// 位置操作符（`chapters.$`）定位的章节下标
    fn matched_chapter(&self, subject: &Subject) -> Result<Option<usize>, StoreError> {
        let chapter_code = self.chapter_code.as_deref().ok_or_else(|| {
            StoreError::InvalidQuery(
                "positional operator requires a chapter code in the filter".to_string(),
            )
        })?;
        Ok(subject.chapter_position(chapter_code))
    }
}

// ============================================================================
// Projection
// ============================================================================

/// 投影后的章节（未投影的字段为 None，序列化时省略）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterProjection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<Vec<Content>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercises: Option<Vec<Exercise>>,
}

impl From<&Chapter> for ChapterProjection {
    fn from(chapter: &Chapter) -> Self {
        Self {
            name: Some(chapter.name().to_string()),
            chapter_code: Some(chapter.chapter_code().to_string()),
            contents: Some(chapter.contents().to_vec()),
            exercises: Some(chapter.exercises().to_vec()),
        }
    }
}

/// 投影后的课程文档，`_id` 始终保留
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectProjection {
    #[serde(rename = "_id")]
    pub id: SubjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapters: Option<Vec<ChapterProjection>>,
}

impl SubjectProjection {
    fn id_only(subject: &Subject) -> Self {
        Self {
            id: *subject.id(),
            title: None,
            code: None,
            chapters: None,
        }
    }
}

/// 字段投影
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// 完整文档
    Full,
    /// `{title: 1}`
    Title,
    /// `{"chapters.name": 1}`
    ChapterNames,
    /// `{"chapters.name": 1, "chapters.exercises": 1}`
    ChapterExercises,
    /// `{"chapters.$": 1}` - 只返回过滤条件匹配到的那一个章节
    MatchedChapter,
}

impl Projection {
    pub fn apply(
        &self,
        subject: &Subject,
        filter: &SubjectFilter,
    ) -> Result<SubjectProjection, StoreError> {
        let mut projected = SubjectProjection::id_only(subject);

        match self {
            Projection::Full => {
                projected.title = Some(subject.title().to_string());
                projected.code = Some(subject.code().to_string());
                projected.chapters = Some(subject.chapters().iter().map(Into::into).collect());
            }
            Projection::Title => {
                projected.title = Some(subject.title().to_string());
            }
            Projection::ChapterNames => {
                projected.chapters = Some(
                    subject
                        .chapters()
                        .iter()
                        .map(|c| ChapterProjection {
                            name: Some(c.name().to_string()),
                            ..ChapterProjection::default()
                        })
                        .collect(),
                );
            }
            Projection::ChapterExercises => {
                projected.chapters = Some(
                    subject
                        .chapters()
                        .iter()
                        .map(|c| ChapterProjection {
                            name: Some(c.name().to_string()),
                            exercises: Some(c.exercises().to_vec()),
                            ..ChapterProjection::default()
                        })
                        .collect(),
                );
            }
            Projection::MatchedChapter => {
                let matched = filter
                    .matched_chapter(subject)?
                    .map(|index| ChapterProjection::from(&subject.chapters()[index]));
                projected.chapters = Some(matched.into_iter().collect());
            }
        }

        Ok(projected)
    }
}

// ============================================================================
// Array updates
// ============================================================================

/// `$push` 目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayPush {
    /// 追加到 `chapters`
    Chapter(Chapter),
    /// 追加到 `chapters.$.contents`
    Content(Content),
    /// 追加到 `chapters.$.exercises`
    Exercise(Exercise),
}

impl ArrayPush {
    /// 对已匹配过滤条件的文档执行追加，返回文档是否被修改
    pub fn apply(&self, subject: &mut Subject, filter: &SubjectFilter) -> Result<bool, StoreError> {
        match self {
            ArrayPush::Chapter(chapter) => {
                subject.add_chapter(chapter.clone());
                Ok(true)
            }
            ArrayPush::Content(content) => {
                Self::on_matched_chapter(subject, filter, |c| c.push_content(content.clone()))
            }
            ArrayPush::Exercise(exercise) => {
                Self::on_matched_chapter(subject, filter, |c| c.push_exercise(exercise.clone()))
            }
        }
    }

    fn on_matched_chapter(
        subject: &mut Subject,
        filter: &SubjectFilter,
        update: impl FnOnce(&mut Chapter),
    ) -> Result<bool, StoreError> {
        let Some(index) = filter.matched_chapter(subject)? else {
            return Ok(false);
        };
        match subject.chapter_at_mut(index) {
            Some(chapter) => {
                update(chapter);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn array_path(&self) -> &'static str {
        match self {
            ArrayPush::Chapter(_) => "chapters",
            ArrayPush::Content(_) => "chapters.$.contents",
            ArrayPush::Exercise(_) => "chapters.$.exercises",
        }
    }
}

/// `$pull` 条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayPull {
    /// 从 `chapters` 中移除 chapterCode 相等的章节
    ChapterByCode(String),
}

impl ArrayPull {
    pub fn apply(&self, subject: &mut Subject) -> bool {
        match self {
            ArrayPull::ChapterByCode(chapter_code) => subject.remove_chapter(chapter_code),
        }
    }
}

// ============================================================================
// Port
// ============================================================================

/// Subject Store Port
///
/// 更新操作为 update-one 语义：只作用于第一个匹配的文档。
/// push / pull 在单文档上原子执行；save 为整篇覆盖（后写者胜）。
#[async_trait]
pub trait SubjectStorePort: Send + Sync {
    /// 获取所有课程（按投影裁剪）
    async fn find_all(&self, projection: Projection) -> Result<Vec<SubjectProjection>, StoreError>;

    /// 查找第一个匹配的课程（按投影裁剪）
    async fn find_one(
        &self,
        filter: &SubjectFilter,
        projection: Projection,
    ) -> Result<Option<SubjectProjection>, StoreError>;

    /// 向匹配文档的数组追加元素，返回被修改的文档数（0 或 1）
    async fn push_to_matched_array(
        &self,
        filter: &SubjectFilter,
        push: ArrayPush,
    ) -> Result<u64, StoreError>;

    /// 从匹配文档的数组移除元素，返回被修改的文档数（0 或 1）
    async fn pull_from_array(&self, filter: &SubjectFilter, pull: ArrayPull)
        -> Result<u64, StoreError>;

    /// 保存完整文档（插入或按 id 覆盖）
    async fn save(&self, subject: &Subject) -> Result<(), StoreError>;

    /// 将缓冲写入落盘
    async fn flush(&self) -> Result<(), StoreError> {
        // 默认实现：无需落盘
        Ok(())
    }
}
