//! Syllabus - 课程内容管理服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Subject Context: 课程 / 章节 / 内容 / 练习
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SubjectStore, MediaStorage）
//! - Commands: CQRS 命令处理器
//! - Queries: CQRS 查询处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API + 媒体静态文件
//! - Persistence: Sled 文档存储
//! - Memory: 内存文档存储
//! - Adapters: 文件系统媒体存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
