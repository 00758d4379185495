//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod media_storage;
mod subject_store;

pub use media_storage::{MediaKind, MediaStorageError, MediaStoragePort, StoredMedia};
pub use subject_store::{
    ArrayPull, ArrayPush, ChapterProjection, Projection, StoreError, SubjectFilter,
    SubjectProjection, SubjectStorePort,
};
