//! Subject Context - 课程内容限界上下文
//!
//! 职责:
//! - Subject 聚合管理（课程 → 章节 → 内容 / 练习）
//! - 练习题选项的写入校验

mod aggregate;
mod entities;
mod errors;
mod value_objects;

pub use aggregate::Subject;
pub use entities::{Chapter, Content, Exercise};
pub use errors::SubjectError;
pub use value_objects::SubjectId;
