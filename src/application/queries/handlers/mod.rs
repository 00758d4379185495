//! Query Handlers 实现

mod subject_handlers;

pub use subject_handlers::*;
