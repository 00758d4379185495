//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::Router;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::error_logging_middleware;
use super::routes::create_routes;
use super::state::AppState;
use crate::application::MediaKind;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// CORS 预检缓存时间
    pub cors_max_age: Duration,
    /// 请求体大小上限（字节）
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_max_age: Duration::from_secs(3600),
            max_body_size: 50 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    pub fn with_cors_max_age(mut self, max_age: Duration) -> Self {
        self.cors_max_age = max_age;
        self
    }

    pub fn with_max_body_size(mut self, bytes: usize) -> Self {
        self.max_body_size = bytes;
        self
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 创建带默认配置的服务器
    pub fn with_default_config(state: AppState) -> Self {
        Self::new(ServerConfig::default(), state)
    }

    /// 构建 Router
    pub fn build_router(&self) -> Router {
        // CORS 配置 - 允许所有来源的跨域请求
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
            .expose_headers(Any)
            .max_age(self.config.cors_max_age);

        // 上传的媒体文件以静态文件提供：/images/*、/video/*
        let media_root: PathBuf = self.state.media_storage.root().to_path_buf();
        let mut router = create_routes();
        for kind in [MediaKind::Image, MediaKind::Video] {
            router = router.nest_service(
                &format!("/{}", kind.dir_name()),
                ServeDir::new(media_root.join(kind.dir_name())),
            );
        }

        router
            .layer(DefaultBodyLimit::max(self.config.max_body_size))
            .layer(middleware::from_fn(error_logging_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state.clone())
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let addr = self.config.addr();

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::MediaStoragePort;
    use crate::infrastructure::adapters::FileMediaStorage;
    use crate::infrastructure::memory::InMemorySubjectStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_uploaded_media_is_served() {
        let media_dir = tempdir().unwrap();
        let media = Arc::new(FileMediaStorage::new(media_dir.path()).await.unwrap());
        let stored = media.save("image/png", b"pngbytes").await.unwrap();

        let state = AppState::new(InMemorySubjectStore::new().arc(), media);
        let router = HttpServer::with_default_config(state).build_router();

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/{}", stored.path))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"pngbytes");

        let missing = router
            .oneshot(
                Request::builder()
                    .uri("/video/missing.mp4")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_body_limit_rejects_large_requests() {
        let media_dir = tempdir().unwrap();
        let media = Arc::new(FileMediaStorage::new(media_dir.path()).await.unwrap());
        let state = AppState::new(InMemorySubjectStore::new().arc(), media);
        let config = ServerConfig::default().with_max_body_size(16);
        let router = HttpServer::new(config, state).build_router();

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/subject-data/History")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"chapterName":"Chapter 2","chapterCode":"HIS101CH2"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
