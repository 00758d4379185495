//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{MediaStorageError, StoreError};
use crate::domain::subject::SubjectError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 过滤条件没有匹配到任何文档 / 章节
    #[error("{0}")]
    NotFound(String),

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 文档存储调用本身失败
    #[error("{0}")]
    StoreFailure(String),

    /// 媒体存储错误
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

impl From<StoreError> for ApplicationError {
    fn from(err: StoreError) -> Self {
        Self::StoreFailure(err.to_string())
    }
}

impl From<SubjectError> for ApplicationError {
    fn from(err: SubjectError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<MediaStorageError> for ApplicationError {
    fn from(err: MediaStorageError) -> Self {
        match err {
            MediaStorageError::UnsupportedMediaType(_) => Self::ValidationError(err.to_string()),
            MediaStorageError::IoError(msg) => Self::StorageError(msg),
        }
    }
}
