//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    AddChapterHandler, AddContentHandler, AddExerciseHandler, CreateSubjectHandler,
    DeleteChapterHandler,
    // Query handlers
    GetChapterContentsHandler, GetChapterExercisesHandler, GetChapterNamesHandler,
    GetSubjectExercisesHandler, ListSubjectsHandler,
    // Ports
    MediaStoragePort, SubjectStorePort,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub media_storage: Arc<dyn MediaStoragePort>,

    // ========== Command Handlers ==========
    pub add_chapter_handler: AddChapterHandler,
    pub add_content_handler: AddContentHandler,
    pub add_exercise_handler: AddExerciseHandler,
    pub delete_chapter_handler: DeleteChapterHandler,
    pub create_subject_handler: CreateSubjectHandler,

    // ========== Query Handlers ==========
    pub list_subjects_handler: ListSubjectsHandler,
    pub get_chapter_names_handler: GetChapterNamesHandler,
    pub get_chapter_contents_handler: GetChapterContentsHandler,
    pub get_subject_exercises_handler: GetSubjectExercisesHandler,
    pub get_chapter_exercises_handler: GetChapterExercisesHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        subject_store: Arc<dyn SubjectStorePort>,
        media_storage: Arc<dyn MediaStoragePort>,
    ) -> Self {
        Self {
            // Ports
            media_storage,

            // Command handlers
            add_chapter_handler: AddChapterHandler::new(subject_store.clone()),
            add_content_handler: AddContentHandler::new(subject_store.clone()),
            add_exercise_handler: AddExerciseHandler::new(subject_store.clone()),
            delete_chapter_handler: DeleteChapterHandler::new(subject_store.clone()),
            create_subject_handler: CreateSubjectHandler::new(subject_store.clone()),

            // Query handlers
            list_subjects_handler: ListSubjectsHandler::new(subject_store.clone()),
            get_chapter_names_handler: GetChapterNamesHandler::new(subject_store.clone()),
            get_chapter_contents_handler: GetChapterContentsHandler::new(subject_store.clone()),
            get_subject_exercises_handler: GetSubjectExercisesHandler::new(subject_store.clone()),
            get_chapter_exercises_handler: GetChapterExercisesHandler::new(subject_store),
        }
    }
}
