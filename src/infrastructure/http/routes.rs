//! HTTP Routes
//!
//! API Endpoints:
//! - /ping                                                GET     健康检查（含课程数）
//! - /subject-data                                        GET     列出所有课程（仅标题）
//! - /subject-data/for-chapters/{title}                   GET     章节名列表
//! - /subject-data/for-contents/{code}/{chapterCode}      GET     单个章节内容
//! - /subject-data/for-exercise/{title}                   GET     课程所有练习
//! - /subject-data/for-exercise/{code}/{chapterCode}      GET     单个章节练习
//! - /subject-data/{title}                                POST    追加章节
//! - /subject-data/{title}/{chapterCode}                  POST    追加内容（JSON / multipart）
//! - /subject-data/{title}/{chapterCode}/exercise         POST    追加练习
//! - /subject-data/{title}/chapter/{chapterCode}          DELETE  删除章节
//!
//! 同一位置的路径参数必须同名，因此统一使用 `:subject` / `:chapter`

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .merge(subject_routes())
}

/// Subject 路由
fn subject_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/subject-data", get(handlers::list_subjects))
        .route(
            "/subject-data/for-chapters/:subject",
            get(handlers::get_chapter_names),
        )
        .route(
            "/subject-data/for-contents/:subject/:chapter",
            get(handlers::get_chapter_contents),
        )
        .route(
            "/subject-data/for-exercise/:subject",
            get(handlers::get_subject_exercises),
        )
        .route(
            "/subject-data/for-exercise/:subject/:chapter",
            get(handlers::get_chapter_exercises),
        )
        .route("/subject-data/:subject", post(handlers::add_chapter))
        .route("/subject-data/:subject/:chapter", post(handlers::add_content))
        .route(
            "/subject-data/:subject/:chapter/exercise",
            post(handlers::add_exercise),
        )
        .route(
            "/subject-data/:subject/chapter/:chapter",
            delete(handlers::delete_chapter),
        )
}
