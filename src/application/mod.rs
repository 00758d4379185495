//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SubjectStore、MediaStorage）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    AddChapter,
    AddContent,
    AddExercise,
    CreateSubject,
    DeleteChapter,
    // Handlers
    handlers::{
        AddChapterHandler, AddContentHandler, AddExerciseHandler, CreateSubjectHandler,
        DeleteChapterHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    // Subject store
    ArrayPull,
    ArrayPush,
    ChapterProjection,
    Projection,
    StoreError,
    SubjectFilter,
    SubjectProjection,
    SubjectStorePort,
    // Media storage
    MediaKind,
    MediaStorageError,
    MediaStoragePort,
    StoredMedia,
};

pub use queries::{
    GetChapterContents,
    GetChapterExercises,
    GetChapterNames,
    GetSubjectExercises,
    ListSubjects,
    // Handlers
    handlers::{
        ChapterContentsResponse, GetChapterContentsHandler, GetChapterExercisesHandler,
        GetChapterNamesHandler, GetSubjectExercisesHandler, ListSubjectsHandler,
    },
};
