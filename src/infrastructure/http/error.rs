//! HTTP Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 读取失败时的错误前缀
pub const READ_FAILURE: &str = "Error Retrieving data from database";

/// 错误响应体
///
/// 未找到使用 `{"Error": msg}`，其余错误使用 `{"error": msg}`
#[derive(Debug, Serialize)]
pub enum ErrorResponse {
    #[serde(rename = "Error")]
    NotFound(String),
    #[serde(rename = "error")]
    Failure(String),
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    StoreFailure(String),
    BadRequest(String),
    PayloadTooLarge(String),
    Internal(String),
}

impl ApiError {
    /// 查询失败的映射
    pub fn from_query(e: ApplicationError) -> Self {
        Self::with_context(READ_FAILURE, e)
    }

    /// 写入失败的映射，`what` 为写入对象（chapter / content / exercise）
    pub fn from_command(what: &str, e: ApplicationError) -> Self {
        Self::with_context(&format!("Something went wrong with saving the {}", what), e)
    }

    fn with_context(context: &str, e: ApplicationError) -> Self {
        match e {
            ApplicationError::StoreFailure(cause) => {
                ApiError::StoreFailure(format!("{}: {}", context, cause))
            }
            other => other.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, response) = match self {
            ApiError::NotFound(msg) => {
                tracing::warn!(status = 404, error = %msg, "Resource not found");
                (StatusCode::NOT_FOUND, ErrorResponse::NotFound(msg))
            }
            ApiError::StoreFailure(msg) => {
                tracing::warn!(status = 400, error = %msg, "Store failure");
                (StatusCode::BAD_REQUEST, ErrorResponse::Failure(msg))
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(status = 400, error = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, ErrorResponse::Failure(msg))
            }
            ApiError::PayloadTooLarge(msg) => {
                tracing::warn!(status = 413, error = %msg, "Request body too large");
                (StatusCode::PAYLOAD_TOO_LARGE, ErrorResponse::Failure(msg))
            }
            ApiError::Internal(msg) => {
                tracing::error!(status = 500, error = %msg, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::Failure(msg))
            }
        };

        (status, Json(response)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::NotFound(msg) => ApiError::NotFound(msg),
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::StoreFailure(msg) => ApiError::StoreFailure(msg),
            ApplicationError::StorageError(msg) => ApiError::Internal(msg),
        }
    }
}
