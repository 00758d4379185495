//! Subject Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    ChapterProjection, Projection, SubjectFilter, SubjectProjection, SubjectStorePort,
};
use crate::application::queries::{
    GetChapterContents, GetChapterExercises, GetChapterNames, GetSubjectExercises, ListSubjects,
};
use crate::domain::subject::{Content, Exercise};

// ============================================================================
// Response DTOs
// ============================================================================

/// 单个章节的内容：章节名 + 内容列表
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterContentsResponse {
    pub title: String,
    pub content: Vec<Content>,
}

const CHAPTER_NOT_FOUND: &str = "Subject Code or Chapter Code not found";
const SUBJECT_NOT_FOUND: &str = "Subject not found";

// ============================================================================
// Handlers
// ============================================================================

/// ListSubjects Handler
///
/// 空结果返回空列表，只有存储调用失败才报错
pub struct ListSubjectsHandler {
    store: Arc<dyn SubjectStorePort>,
}

impl ListSubjectsHandler {
    pub fn new(store: Arc<dyn SubjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        _query: ListSubjects,
    ) -> Result<Vec<SubjectProjection>, ApplicationError> {
        let subjects = self.store.find_all(Projection::Title).await?;
        Ok(subjects)
    }
}

/// GetChapterNames Handler
pub struct GetChapterNamesHandler {
    store: Arc<dyn SubjectStorePort>,
}

impl GetChapterNamesHandler {
    pub fn new(store: Arc<dyn SubjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: GetChapterNames,
    ) -> Result<SubjectProjection, ApplicationError> {
        self.store
            .find_one(
                &SubjectFilter::by_title(query.subject_title),
                Projection::ChapterNames,
            )
            .await?
            .ok_or_else(|| ApplicationError::not_found(SUBJECT_NOT_FOUND))
    }
}

/// GetChapterContents Handler
pub struct GetChapterContentsHandler {
    store: Arc<dyn SubjectStorePort>,
}

impl GetChapterContentsHandler {
    pub fn new(store: Arc<dyn SubjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: GetChapterContents,
    ) -> Result<ChapterContentsResponse, ApplicationError> {
        let filter = SubjectFilter::by_code(query.subject_code).with_chapter_code(query.chapter_code);
        let chapter = find_matched_chapter(self.store.as_ref(), &filter).await?;

        Ok(ChapterContentsResponse {
            title: chapter.name.unwrap_or_default(),
            content: chapter.contents.unwrap_or_default(),
        })
    }
}

/// GetSubjectExercises Handler - 课程下所有章节的练习
pub struct GetSubjectExercisesHandler {
    store: Arc<dyn SubjectStorePort>,
}

impl GetSubjectExercisesHandler {
    pub fn new(store: Arc<dyn SubjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: GetSubjectExercises,
    ) -> Result<SubjectProjection, ApplicationError> {
        self.store
            .find_one(
                &SubjectFilter::by_title(query.subject_title),
                Projection::ChapterExercises,
            )
            .await?
            .ok_or_else(|| ApplicationError::not_found(SUBJECT_NOT_FOUND))
    }
}

/// GetChapterExercises Handler - 单个章节的练习
pub struct GetChapterExercisesHandler {
    store: Arc<dyn SubjectStorePort>,
}

impl GetChapterExercisesHandler {
    pub fn new(store: Arc<dyn SubjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: GetChapterExercises,
    ) -> Result<Vec<Exercise>, ApplicationError> {
        let filter = SubjectFilter::by_code(query.subject_code).with_chapter_code(query.chapter_code);
        let chapter = find_matched_chapter(self.store.as_ref(), &filter).await?;
        Ok(chapter.exercises.unwrap_or_default())
    }
}

/// 按 `chapters.$` 投影取出匹配的那一个章节
async fn find_matched_chapter(
    store: &dyn SubjectStorePort,
    filter: &SubjectFilter,
) -> Result<ChapterProjection, ApplicationError> {
    store
        .find_one(filter, Projection::MatchedChapter)
        .await?
        .and_then(|subject| subject.chapters)
        .and_then(|chapters| chapters.into_iter().next())
        .ok_or_else(|| ApplicationError::not_found(CHAPTER_NOT_FOUND))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subject::{Chapter, Subject};
    use crate::infrastructure::memory::InMemorySubjectStore;

    async fn seeded_store() -> Arc<dyn SubjectStorePort> {
        let store: Arc<dyn SubjectStorePort> = Arc::new(InMemorySubjectStore::new());

        let mut first = Chapter::new("Chapter 1", "HIS101CH1");
        first.push_content(Content::new("intro", "a.png", "a.mp4"));
        first.push_exercise(
            Exercise::new("Q1", vec!["a".to_string(), "b".to_string()], "a").unwrap(),
        );
        let mut second = Chapter::new("Chapter 2", "HIS101CH2");
        second.push_exercise(Exercise::new("Q2", vec!["c".to_string()], "c").unwrap());

        store
            .save(&Subject::with_chapters("History", "HST101", vec![first, second]))
            .await
            .unwrap();
        store
            .save(&Subject::new("Geography", "GEO101"))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_list_subjects_returns_titles_once() {
        let handler = ListSubjectsHandler::new(seeded_store().await);

        let subjects = handler.handle(ListSubjects).await.unwrap();
        let titles: Vec<_> = subjects.iter().filter_map(|s| s.title.as_deref()).collect();

        assert_eq!(titles, vec!["History", "Geography"]);
        assert!(subjects.iter().all(|s| s.chapters.is_none() && s.code.is_none()));
    }

    #[tokio::test]
    async fn test_list_subjects_empty_store() {
        let store: Arc<dyn SubjectStorePort> = Arc::new(InMemorySubjectStore::new());
        let handler = ListSubjectsHandler::new(store);

        let subjects = handler.handle(ListSubjects).await.unwrap();
        assert!(subjects.is_empty());
    }

    #[tokio::test]
    async fn test_get_chapter_names() {
        let handler = GetChapterNamesHandler::new(seeded_store().await);

        let subject = handler
            .handle(GetChapterNames {
                subject_title: "History".to_string(),
            })
            .await
            .unwrap();
        let names: Vec<_> = subject
            .chapters
            .unwrap()
            .into_iter()
            .filter_map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Chapter 1", "Chapter 2"]);

        let missing = handler
            .handle(GetChapterNames {
                subject_title: "Physics".to_string(),
            })
            .await;
        assert!(matches!(missing, Err(ApplicationError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_chapter_contents() {
        let handler = GetChapterContentsHandler::new(seeded_store().await);

        let response = handler
            .handle(GetChapterContents {
                subject_code: "HST101".to_string(),
                chapter_code: "HIS101CH1".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(
            response,
            ChapterContentsResponse {
                title: "Chapter 1".to_string(),
                content: vec![Content::new("intro", "a.png", "a.mp4")],
            }
        );
    }

    #[tokio::test]
    async fn test_get_chapter_contents_wrong_subject_code() {
        let handler = GetChapterContentsHandler::new(seeded_store().await);

        let result = handler
            .handle(GetChapterContents {
                subject_code: "GEO101".to_string(),
                chapter_code: "HIS101CH1".to_string(),
            })
            .await;

        assert!(
            matches!(result, Err(ApplicationError::NotFound(msg)) if msg == CHAPTER_NOT_FOUND)
        );
    }

    #[tokio::test]
    async fn test_get_subject_exercises_spans_all_chapters() {
        let handler = GetSubjectExercisesHandler::new(seeded_store().await);

        let subject = handler
            .handle(GetSubjectExercises {
                subject_title: "History".to_string(),
            })
            .await
            .unwrap();
        let chapters = subject.chapters.unwrap();

        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].exercises.as_ref().unwrap()[0].question(), "Q1");
        assert_eq!(chapters[1].exercises.as_ref().unwrap()[0].question(), "Q2");
        assert!(chapters[0].contents.is_none());
    }

    #[tokio::test]
    async fn test_get_chapter_exercises() {
        let handler = GetChapterExercisesHandler::new(seeded_store().await);

        let exercises = handler
            .handle(GetChapterExercises {
                subject_code: "HST101".to_string(),
                chapter_code: "HIS101CH2".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(exercises.len(), 1);
        assert_eq!(exercises[0].correct_option(), "c");
    }
}
