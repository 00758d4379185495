//! In-Memory Subject Store Implementation

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use crate::application::ports::{
    ArrayPull, ArrayPush, Projection, StoreError, SubjectFilter, SubjectProjection,
    SubjectStorePort,
};
use crate::domain::subject::{Subject, SubjectId};

/// 内存课程文档存储
///
/// 结果按 SubjectId 排序，与 sled 的 key 顺序一致（即插入顺序）
#[derive(Default)]
pub struct InMemorySubjectStore {
    /// subject_id -> Subject
    subjects: DashMap<SubjectId, Subject>,
}

impl InMemorySubjectStore {
    pub fn new() -> Self {
        Self {
            subjects: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    fn sorted_ids(&self) -> Vec<SubjectId> {
        let mut ids: Vec<SubjectId> = self.subjects.iter().map(|entry| *entry.key()).collect();
        ids.sort();
        ids
    }

    /// 对第一个匹配文档执行更新
    ///
    /// 持有分片写锁期间重新校验过滤条件，文档被并发修改后不再匹配时继续找下一个
    fn update_first<F>(&self, filter: &SubjectFilter, update: F) -> Result<u64, StoreError>
    where
        F: Fn(&mut Subject) -> Result<bool, StoreError>,
    {
        for id in self.sorted_ids() {
            if let Some(mut subject) = self.subjects.get_mut(&id) {
                if !filter.matches(&subject) {
                    continue;
                }
                return Ok(u64::from(update(&mut *subject)?));
            }
        }
        Ok(0)
    }
}

#[async_trait]
impl SubjectStorePort for InMemorySubjectStore {
    async fn find_all(&self, projection: Projection) -> Result<Vec<SubjectProjection>, StoreError> {
        let all = SubjectFilter::default();
        let mut subjects = Vec::with_capacity(self.subjects.len());

        for id in self.sorted_ids() {
            if let Some(subject) = self.subjects.get(&id) {
                subjects.push(projection.apply(&subject, &all)?);
            }
        }

        Ok(subjects)
    }

    async fn find_one(
        &self,
        filter: &SubjectFilter,
        projection: Projection,
    ) -> Result<Option<SubjectProjection>, StoreError> {
        for id in self.sorted_ids() {
            if let Some(subject) = self.subjects.get(&id) {
                if filter.matches(&subject) {
                    return projection.apply(&subject, filter).map(Some);
                }
            }
        }
        Ok(None)
    }

    async fn push_to_matched_array(
        &self,
        filter: &SubjectFilter,
        push: ArrayPush,
    ) -> Result<u64, StoreError> {
        let modified = self.update_first(filter, |subject| push.apply(subject, filter))?;
        tracing::debug!(path = push.array_path(), modified = modified, "Array push");
        Ok(modified)
    }

    async fn pull_from_array(
        &self,
        filter: &SubjectFilter,
        pull: ArrayPull,
    ) -> Result<u64, StoreError> {
        let modified = self.update_first(filter, |subject| Ok(pull.apply(subject)))?;
        tracing::debug!(pull = ?pull, modified = modified, "Array pull");
        Ok(modified)
    }

    async fn save(&self, subject: &Subject) -> Result<(), StoreError> {
        self.subjects.insert(*subject.id(), subject.clone());
        Ok(())
    }
}
