//! Sled-based Subject Document Store

use async_trait::async_trait;
use sled::{Db, IVec, Tree};
use std::path::Path;

use crate::application::ports::{
    ArrayPull, ArrayPush, Projection, StoreError, SubjectFilter, SubjectProjection,
    SubjectStorePort,
};
use crate::domain::subject::Subject;

/// 存放 Subject 文档的 tree 名称
const SUBJECTS_TREE: &str = "subjects";

/// Sled 存储配置
#[derive(Debug, Clone)]
pub struct SledStoreConfig {
    /// 数据库路径
    pub db_path: String,
}

impl Default for SledStoreConfig {
    fn default() -> Self {
        Self {
            db_path: "data/lms.sled".to_string(),
        }
    }
}

/// Sled 课程文档存储
///
/// - key: SubjectId（UUID v7 字节，按插入顺序排列）
/// - value: bincode 编码的完整 Subject 文档
/// - push / pull 通过 compare-and-swap 循环实现单文档原子更新
pub struct SledSubjectStore {
    db: Db,
    subjects: Tree,
}

impl SledSubjectStore {
    /// 创建新的存储实例
    pub fn new(config: &SledStoreConfig) -> Result<Self, StoreError> {
        let db = sled::open(&config.db_path).map_err(|e| StoreError::Database(e.to_string()))?;
        let subjects = db
            .open_tree(SUBJECTS_TREE)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::info!(
            db_path = %config.db_path,
            subjects = subjects.len(),
            "SledSubjectStore initialized"
        );

        Ok(Self { db, subjects })
    }

    /// 打开现有存储
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let config = SledStoreConfig {
            db_path: path.as_ref().to_string_lossy().to_string(),
        };
        Self::new(&config)
    }

    fn encode(subject: &Subject) -> Result<Vec<u8>, StoreError> {
        bincode::serialize(subject).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn decode(bytes: &[u8]) -> Result<Subject, StoreError> {
        bincode::deserialize(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// 按 key 顺序找到第一个匹配的文档，连同原始字节一起返回（用于 CAS）
    fn find_first(
        &self,
        filter: &SubjectFilter,
    ) -> Result<Option<(IVec, IVec, Subject)>, StoreError> {
        for item in self.subjects.iter() {
            let (key, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            let subject = Self::decode(&value)?;
            if filter.matches(&subject) {
                return Ok(Some((key, value, subject)));
            }
        }
        Ok(None)
    }

    /// 对第一个匹配文档执行原子更新
    ///
    /// CAS 失败说明文档被并发修改，重新查找并重试；
    /// 重试时文档可能已不再匹配，此时返回 0
    fn update_first<F>(&self, filter: &SubjectFilter, update: F) -> Result<u64, StoreError>
    where
        F: Fn(&mut Subject) -> Result<bool, StoreError>,
    {
        loop {
            let Some((key, current, mut subject)) = self.find_first(filter)? else {
                return Ok(0);
            };

            if !update(&mut subject)? {
                return Ok(0);
            }

            let updated = Self::encode(&subject)?;
            let swapped = self
                .subjects
                .compare_and_swap(&key, Some(current), Some(updated))
                .map_err(|e| StoreError::Database(e.to_string()))?;

            match swapped {
                Ok(()) => return Ok(1),
                Err(_) => {
                    tracing::debug!(
                        subject_id = %subject.id(),
                        "Concurrent update detected, retrying"
                    );
                }
            }
        }
    }
}

#[async_trait]
impl SubjectStorePort for SledSubjectStore {
    async fn find_all(&self, projection: Projection) -> Result<Vec<SubjectProjection>, StoreError> {
        let all = SubjectFilter::default();
        let mut subjects = Vec::with_capacity(self.subjects.len());

        for item in self.subjects.iter() {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            let subject = Self::decode(&value)?;
            subjects.push(projection.apply(&subject, &all)?);
        }

        Ok(subjects)
    }

    async fn find_one(
        &self,
        filter: &SubjectFilter,
        projection: Projection,
    ) -> Result<Option<SubjectProjection>, StoreError> {
        self.find_first(filter)?
            .map(|(_, _, subject)| projection.apply(&subject, filter))
            .transpose()
    }

    async fn push_to_matched_array(
        &self,
        filter: &SubjectFilter,
        push: ArrayPush,
    ) -> Result<u64, StoreError> {
        let modified = self.update_first(filter, |subject| push.apply(subject, filter))?;

        tracing::debug!(
            filter = ?filter,
            path = push.array_path(),
            modified = modified,
            "Array push"
        );

        Ok(modified)
    }

    async fn pull_from_array(
        &self,
        filter: &SubjectFilter,
        pull: ArrayPull,
    ) -> Result<u64, StoreError> {
        let modified = self.update_first(filter, |subject| Ok(pull.apply(subject)))?;

        tracing::debug!(filter = ?filter, pull = ?pull, modified = modified, "Array pull");

        Ok(modified)
    }

    async fn save(&self, subject: &Subject) -> Result<(), StoreError> {
        let bytes = Self::encode(subject)?;
        self.subjects
            .insert(subject.id().as_bytes(), bytes)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(subject_id = %subject.id(), "Subject saved");
        Ok(())
    }

    async fn flush(&self) -> Result<(), StoreError> {
        self.db
            .flush_async()
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(())
    }
}
