//! Firestore 文档映射
//!
//! 每个集合一个文件，实现 `FirestoreDocument`，
//! 负责业务实体与线上字段（camelCase）之间的转换以及缺省值回退。

pub mod attendance;
pub mod classes;
pub mod grades;
pub mod students;
pub mod teachers;
pub mod users;

use chrono::{DateTime, Utc};

/// 缺失时间字段的回退值（UNIX 纪元）
pub(crate) fn zero_time() -> DateTime<Utc> {
    DateTime::<Utc>::default()
}
