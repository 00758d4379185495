//! Media Storage Port - 出站端口
//!
//! 章节内容引用的图片 / 视频文件存储，按 mime 类型分目录

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// 媒体存储错误
#[derive(Debug, Error)]
pub enum MediaStorageError {
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 媒体类型，决定存储子目录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// 存储子目录名
    pub fn dir_name(&self) -> &'static str {
        match self {
            MediaKind::Image => "images",
            MediaKind::Video => "video",
        }
    }

    /// 根据 mime 类型判断媒体类型及默认扩展名
    pub fn from_mime(mime: &str) -> Option<(Self, &'static str)> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        let found = match essence.to_ascii_lowercase().as_str() {
            "image/png" => (MediaKind::Image, "png"),
            "image/jpeg" | "image/jpg" => (MediaKind::Image, "jpg"),
            "image/gif" => (MediaKind::Image, "gif"),
            "image/webp" => (MediaKind::Image, "webp"),
            "image/svg+xml" => (MediaKind::Image, "svg"),
            "video/mp4" => (MediaKind::Video, "mp4"),
            "video/webm" => (MediaKind::Video, "webm"),
            "video/ogg" => (MediaKind::Video, "ogv"),
            "video/quicktime" => (MediaKind::Video, "mov"),
            "video/x-matroska" => (MediaKind::Video, "mkv"),
            _ => return None,
        };
        Some(found)
    }
}

/// 已保存的媒体文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    pub kind: MediaKind,
    /// 相对媒体根目录的路径，如 `images/1700000000000-1a2b3c4d.png`
    pub path: String,
    pub size_bytes: u64,
}

/// Media Storage Port
#[async_trait]
pub trait MediaStoragePort: Send + Sync {
    /// 媒体根目录
    fn root(&self) -> &Path;

    /// 保存上传文件，目录和扩展名都由 mime 类型决定，文件名由时间戳生成
    async fn save(&self, content_type: &str, data: &[u8]) -> Result<StoredMedia, MediaStorageError>;

    /// 删除已保存的文件（不存在时忽略）
    async fn remove(&self, path: &str) -> Result<(), MediaStorageError>;
}
