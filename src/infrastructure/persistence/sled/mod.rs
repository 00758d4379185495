//! Sled Persistence

mod subject_store;

pub use subject_store::{SledStoreConfig, SledSubjectStore};
