//! Ping Handler
//!
//! 健康检查：确认文档存储可读

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::application::ListSubjects;
use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// 当前课程数，存储不可用时省略
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjects: Option<usize>,
}

/// Ping endpoint - 存储读取失败时返回 503
pub async fn ping(State(state): State<Arc<AppState>>) -> (StatusCode, Json<PingResponse>) {
    let version = env!("CARGO_PKG_VERSION");

    match state.list_subjects_handler.handle(ListSubjects).await {
        Ok(subjects) => (
            StatusCode::OK,
            Json(PingResponse {
                status: "ok",
                version,
                subjects: Some(subjects.len()),
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Subject store unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(PingResponse {
                    status: "unavailable",
                    version,
                    subjects: None,
                }),
            )
        }
    }
}
