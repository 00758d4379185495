//! File Storage - 文件系统媒体存储实现
//!
//! 实现 MediaStoragePort trait

use async_trait::async_trait;
use chrono::Utc;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{MediaKind, MediaStorageError, MediaStoragePort, StoredMedia};

/// 文件系统媒体存储
///
/// 目录结构：`<root>/images/*`、`<root>/video/*`
pub struct FileMediaStorage {
    /// 存储根目录
    base_dir: PathBuf,
}

impl FileMediaStorage {
    /// 创建新的文件存储
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, MediaStorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        // 确保目录存在
        for kind in [MediaKind::Image, MediaKind::Video] {
            fs::create_dir_all(base_dir.join(kind.dir_name()))
                .await
                .map_err(|e| MediaStorageError::IoError(e.to_string()))?;
        }

        Ok(Self { base_dir })
    }

    /// 生成文件名：`<unix-millis>-<8 hex>.<ext>`
    fn file_name(ext: &str) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("{}-{}.{}", Utc::now().timestamp_millis(), &suffix[..8], ext)
    }

    /// 相对路径只允许落在根目录内
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
            .then(|| self.base_dir.join(relative))
    }
}

#[async_trait]
impl MediaStoragePort for FileMediaStorage {
    fn root(&self) -> &Path {
        &self.base_dir
    }

    async fn save(&self, content_type: &str, data: &[u8]) -> Result<StoredMedia, MediaStorageError> {
        let (kind, ext) = MediaKind::from_mime(content_type)
            .ok_or_else(|| MediaStorageError::UnsupportedMediaType(content_type.to_string()))?;

        let name = Self::file_name(ext);
        let relative = format!("{}/{}", kind.dir_name(), name);

        fs::write(self.base_dir.join(&relative), data)
            .await
            .map_err(|e| MediaStorageError::IoError(e.to_string()))?;

        tracing::debug!(
            path = %relative,
            size = data.len(),
            "Saved media file"
        );

        Ok(StoredMedia {
            kind,
            path: relative,
            size_bytes: data.len() as u64,
        })
    }

    async fn remove(&self, path: &str) -> Result<(), MediaStorageError> {
        let Some(full_path) = self.resolve(path) else {
            return Ok(());
        };

        if full_path.exists() {
            fs::remove_file(&full_path)
                .await
                .map_err(|e| MediaStorageError::IoError(e.to_string()))?;

            tracing::debug!(path = %path, "Deleted media file");
        }

        Ok(())
    }
}
