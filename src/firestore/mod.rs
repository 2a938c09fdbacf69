//! Firestore 文档编组层
//!
//! - `value` / `fields`: 类型标注的字段值
//! - `document`: REST 文档结构与 `FirestoreDocument` 映射 trait
//! - `query`: 单条件结构化查询
//! - `client`: REST 调用

pub mod client;
pub mod document;
pub mod fields;
pub mod query;
pub mod value;

pub use client::{FirestoreClient, Write};
pub use document::{Document, FirestoreDocument};
pub use fields::Fields;
pub use query::{Direction, StructuredQuery};
pub use value::Value;
