//! Subject Command Handlers

use std::sync::Arc;

use crate::application::commands::{AddChapter, AddContent, AddExercise, CreateSubject, DeleteChapter};
use crate::application::error::ApplicationError;
use crate::application::ports::{ArrayPull, ArrayPush, SubjectFilter, SubjectStorePort};
use crate::domain::subject::{Chapter, Content, Exercise, Subject, SubjectId};

// ============================================================================
// AddChapter
// ============================================================================

/// AddChapter Handler
///
/// 按标题定位课程后原子追加章节（不走读-改-写，避免并发追加互相覆盖）
pub struct AddChapterHandler {
    store: Arc<dyn SubjectStorePort>,
}

impl AddChapterHandler {
    pub fn new(store: Arc<dyn SubjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, command: AddChapter) -> Result<(), ApplicationError> {
        let filter = SubjectFilter::by_title(&command.subject_title);
        let chapter = Chapter::new(&command.name, &command.chapter_code);

        let modified = self
            .store
            .push_to_matched_array(&filter, ArrayPush::Chapter(chapter))
            .await?;
        if modified == 0 {
            return Err(ApplicationError::not_found("Subject not found"));
        }

        tracing::info!(
            subject = %command.subject_title,
            chapter_code = %command.chapter_code,
            "Chapter added"
        );

        Ok(())
    }
}

// ============================================================================
// AddContent
// ============================================================================

/// AddContent Handler - 单次定向 push，不做去重
pub struct AddContentHandler {
    store: Arc<dyn SubjectStorePort>,
}

impl AddContentHandler {
    pub fn new(store: Arc<dyn SubjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, command: AddContent) -> Result<(), ApplicationError> {
        let filter =
            SubjectFilter::by_title(&command.subject_title).with_chapter_code(&command.chapter_code);
        let content = Content::new(command.text, command.img, command.video);

        let modified = self
            .store
            .push_to_matched_array(&filter, ArrayPush::Content(content))
            .await?;
        if modified == 0 {
            return Err(ApplicationError::not_found(
                "Subject or Chapter not found or no change made",
            ));
        }

        tracing::info!(
            subject = %command.subject_title,
            chapter_code = %command.chapter_code,
            "Content added"
        );

        Ok(())
    }
}

// ============================================================================
// AddExercise
// ============================================================================

/// AddExercise Handler - 写入前校验正确答案属于选项
pub struct AddExerciseHandler {
    store: Arc<dyn SubjectStorePort>,
}

impl AddExerciseHandler {
    pub fn new(store: Arc<dyn SubjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, command: AddExercise) -> Result<(), ApplicationError> {
        let exercise = Exercise::new(command.question, command.options, command.correct_option)?;
        let filter =
            SubjectFilter::by_title(&command.subject_title).with_chapter_code(&command.chapter_code);

        let modified = self
            .store
            .push_to_matched_array(&filter, ArrayPush::Exercise(exercise))
            .await?;
        if modified == 0 {
            return Err(ApplicationError::not_found(
                "Subject or Chapter not found or no change made",
            ));
        }

        tracing::info!(
            subject = %command.subject_title,
            chapter_code = %command.chapter_code,
            "Exercise added"
        );

        Ok(())
    }
}

// ============================================================================
// DeleteChapter
// ============================================================================

/// DeleteChapter Handler
pub struct DeleteChapterHandler {
    store: Arc<dyn SubjectStorePort>,
}

impl DeleteChapterHandler {
    pub fn new(store: Arc<dyn SubjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, command: DeleteChapter) -> Result<(), ApplicationError> {
        let filter = SubjectFilter::by_title(&command.subject_title);
        let pull = ArrayPull::ChapterByCode(command.chapter_code.clone());

        let modified = self.store.pull_from_array(&filter, pull).await?;
        if modified == 0 {
            return Err(ApplicationError::not_found(
                "Chapter not found or already deleted",
            ));
        }

        tracing::info!(
            subject = %command.subject_title,
            chapter_code = %command.chapter_code,
            "Chapter deleted"
        );

        Ok(())
    }
}

// ============================================================================
// CreateSubject
// ============================================================================

/// CreateSubject Handler - 整篇保存新课程
pub struct CreateSubjectHandler {
    store: Arc<dyn SubjectStorePort>,
}

impl CreateSubjectHandler {
    pub fn new(store: Arc<dyn SubjectStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, command: CreateSubject) -> Result<SubjectId, ApplicationError> {
        let subject = Subject::with_chapters(command.title, command.code, command.chapters);
        self.store.save(&subject).await?;

        tracing::info!(
            subject_id = %subject.id(),
            title = %subject.title(),
            code = %subject.code(),
            "Subject created"
        );

        Ok(*subject.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{ChapterProjection, Projection};
    use crate::infrastructure::memory::InMemorySubjectStore;

    async fn store_with_history() -> Arc<dyn SubjectStorePort> {
        let store: Arc<dyn SubjectStorePort> = Arc::new(InMemorySubjectStore::new());
        let subject = Subject::with_chapters(
            "History",
            "HST101",
            vec![Chapter::new("Chapter 1", "HIS101CH1")],
        );
        store.save(&subject).await.unwrap();
        store
    }

    async fn chapter(store: &Arc<dyn SubjectStorePort>, code: &str) -> Option<ChapterProjection> {
        let filter = SubjectFilter::by_title("History").with_chapter_code(code);
        let subject = store
            .find_one(&filter, Projection::MatchedChapter)
            .await
            .unwrap()?;
        subject.chapters?.into_iter().next()
    }

    #[tokio::test]
    async fn test_add_chapter() {
        let store = store_with_history().await;
        let handler = AddChapterHandler::new(store.clone());

        handler
            .handle(AddChapter {
                subject_title: "History".to_string(),
                name: "Chapter 2".to_string(),
                chapter_code: "HIS101CH2".to_string(),
            })
            .await
            .unwrap();

        let added = chapter(&store, "HIS101CH2").await.unwrap();
        assert_eq!(added.name.as_deref(), Some("Chapter 2"));
        assert_eq!(added.contents, Some(Vec::new()));
        assert_eq!(added.exercises, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_add_chapter_unknown_subject() {
        let store = store_with_history().await;
        let handler = AddChapterHandler::new(store);

        let result = handler
            .handle(AddChapter {
                subject_title: "Geography".to_string(),
                name: "Chapter 1".to_string(),
                chapter_code: "GEO101CH1".to_string(),
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::NotFound(msg)) if msg == "Subject not found"));
    }

    #[tokio::test]
    async fn test_concurrent_add_chapter_keeps_every_chapter() {
        let store = store_with_history().await;
        let handler = Arc::new(AddChapterHandler::new(store.clone()));

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let handler = handler.clone();
                tokio::spawn(async move {
                    handler
                        .handle(AddChapter {
                            subject_title: "History".to_string(),
                            name: format!("Chapter {}", i + 2),
                            chapter_code: format!("HIS101CH{}", i + 2),
                        })
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let subject = store
            .find_one(&SubjectFilter::by_title("History"), Projection::ChapterNames)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(subject.chapters.unwrap().len(), 17);
    }

    #[tokio::test]
    async fn test_add_content_is_not_deduplicated() {
        let store = store_with_history().await;
        let handler = AddContentHandler::new(store.clone());
        let command = AddContent {
            subject_title: "History".to_string(),
            chapter_code: "HIS101CH1".to_string(),
            text: "intro".to_string(),
            img: "a.png".to_string(),
            video: "a.mp4".to_string(),
        };

        handler.handle(command.clone()).await.unwrap();
        handler.handle(command).await.unwrap();

        let contents = chapter(&store, "HIS101CH1").await.unwrap().contents.unwrap();
        assert_eq!(contents.len(), 2);
        assert_eq!(contents[0], contents[1]);
    }

    #[tokio::test]
    async fn test_add_content_unknown_chapter() {
        let store = store_with_history().await;
        let handler = AddContentHandler::new(store);

        let result = handler
            .handle(AddContent {
                subject_title: "History".to_string(),
                chapter_code: "HIS101CH9".to_string(),
                text: "intro".to_string(),
                img: String::new(),
                video: String::new(),
            })
            .await;

        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_add_exercise_validates_correct_option() {
        let store = store_with_history().await;
        let handler = AddExerciseHandler::new(store.clone());
        let options = vec!["Indus".to_string(), "Nile".to_string()];

        let rejected = handler
            .handle(AddExercise {
                subject_title: "History".to_string(),
                chapter_code: "HIS101CH1".to_string(),
                question: "Which river?".to_string(),
                options: options.clone(),
                correct_option: "Ganges".to_string(),
            })
            .await;
        assert!(matches!(rejected, Err(ApplicationError::ValidationError(_))));

        handler
            .handle(AddExercise {
                subject_title: "History".to_string(),
                chapter_code: "HIS101CH1".to_string(),
                question: "Which river?".to_string(),
                options,
                correct_option: "Indus".to_string(),
            })
            .await
            .unwrap();

        let exercises = chapter(&store, "HIS101CH1").await.unwrap().exercises.unwrap();
        assert_eq!(exercises.len(), 1);
        assert_eq!(exercises[0].correct_option(), "Indus");
    }

    #[tokio::test]
    async fn test_delete_chapter_twice() {
        let store = store_with_history().await;
        let handler = DeleteChapterHandler::new(store.clone());
        let command = DeleteChapter {
            subject_title: "History".to_string(),
            chapter_code: "HIS101CH1".to_string(),
        };

        handler.handle(command.clone()).await.unwrap();
        assert!(chapter(&store, "HIS101CH1").await.is_none());

        let result = handler.handle(command).await;
        assert!(
            matches!(result, Err(ApplicationError::NotFound(msg)) if msg == "Chapter not found or already deleted")
        );
    }

    #[tokio::test]
    async fn test_create_sample_subject() {
        let store: Arc<dyn SubjectStorePort> = Arc::new(InMemorySubjectStore::new());
        let handler = CreateSubjectHandler::new(store.clone());

        let id = handler.handle(CreateSubject::sample()).await.unwrap();

        let subject = store
            .find_one(&SubjectFilter::by_code("HST101"), Projection::Full)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(subject.id, id);
        assert_eq!(subject.title.as_deref(), Some("History"));
        let chapters = subject.chapters.unwrap();
        assert_eq!(chapters[0].exercises.as_ref().unwrap().len(), 1);
    }
}
