//! Syllabus - 课程内容服务
//!
//! - Domain: subject/（课程 → 章节 → 内容 / 练习）
//! - Application: commands, queries, ports
//! - Infrastructure: http, persistence, memory, adapters

use std::sync::Arc;
use std::time::Duration;

use syllabus::application::{CreateSubject, ListSubjects, SubjectStorePort};
use syllabus::config::{load_config, print_config, LogConfig, StoreBackend};
use syllabus::infrastructure::adapters::FileMediaStorage;
use syllabus::infrastructure::http::{AppState, HttpServer, ServerConfig};
use syllabus::infrastructure::memory::InMemorySubjectStore;
use syllabus::infrastructure::persistence::{SledStoreConfig, SledSubjectStore};

fn init_tracing(log: &LogConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log.filter_directive()));

    if log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config.log);

    tracing::info!("Syllabus - 课程内容服务");
    print_config(&config);

    // 创建文档存储
    let subject_store: Arc<dyn SubjectStorePort> = match config.store.backend {
        StoreBackend::Sled => {
            if let Some(parent) = std::path::Path::new(&config.store.path).parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            let store_config = SledStoreConfig {
                db_path: config.store.path.clone(),
            };
            Arc::new(SledSubjectStore::new(&store_config)?)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, data will be lost on shutdown");
            InMemorySubjectStore::new().arc()
        }
    };

    // 创建媒体存储
    let media_storage = Arc::new(FileMediaStorage::new(&config.storage.media_dir).await?);

    let state = AppState::new(subject_store.clone(), media_storage);

    // 存储为空时写入示例课程
    if config.seed.enabled {
        let existing = state.list_subjects_handler.handle(ListSubjects).await?;
        if existing.is_empty() {
            let id = state
                .create_subject_handler
                .handle(CreateSubject::sample())
                .await?;
            tracing::info!(subject_id = %id, "Seeded sample subject");
        } else {
            tracing::info!(count = existing.len(), "Store not empty, skipping seed");
        }
    }

    // 创建 HTTP 服务器
    let max_body_size = usize::try_from(config.storage.max_upload_size).unwrap_or(usize::MAX);
    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_cors_max_age(Duration::from_secs(config.server.cors_max_age_secs))
        .with_max_body_size(max_body_size);
    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    subject_store.flush().await?;
    tracing::info!("Server shutdown complete");

    Ok(())
}
