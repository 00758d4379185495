//! Domain Layer - 领域层
//!
//! Subject Context: 课程 → 章节 → 内容 / 练习

pub mod subject;
