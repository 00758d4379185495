//! Memory Layer - In-Memory Document Store
//!
//! 测试与 `store.backend = "memory"` 时使用

mod subject_store;

pub use subject_store::InMemorySubjectStore;
