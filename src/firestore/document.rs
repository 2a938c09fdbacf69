use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::fields::Fields;

/// REST 接口返回的文档
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Fields>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

impl Document {
    /// 资源名最后一段即文档 ID
    pub fn id(&self) -> Option<&str> {
        self.name
            .as_deref()
            .and_then(|name| name.rsplit('/').next())
            .filter(|id| !id.is_empty())
    }
}

/// 列表接口响应
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// runQuery 的单条响应；只有 readTime 的条目不含文档
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RunQueryResponseItem {
    #[serde(default)]
    pub document: Option<Document>,
}

/// 类型化记录与 Firestore 文档之间的映射
pub trait FirestoreDocument: Sized {
    /// 所在集合
    const COLLECTION: &'static str;

    fn document_id(&self) -> &str;

    fn to_fields(&self) -> Fields;

    /// 缺失字段回退到实体约定的默认值
    fn from_fields(id: &str, fields: &Fields) -> Self;

    fn created_at_mut(&mut self) -> Option<&mut DateTime<Utc>> {
        None
    }

    fn updated_at_mut(&mut self) -> Option<&mut DateTime<Utc>> {
        None
    }

    /// 缺少 name 或 fields 时返回 None，调用方按"不存在"处理
    fn from_document(document: &Document) -> Option<Self> {
        let id = document.id()?;
        let fields = document.fields.as_ref()?;
        Some(Self::from_fields(id, fields))
    }

    /// 创建前打时间戳：createdAt 仅在仍为零值时写入
    fn stamp_for_create(&mut self, now: DateTime<Utc>) {
        if let Some(created_at) = self.created_at_mut()
            && *created_at == DateTime::<Utc>::default()
        {
            *created_at = now;
        }
        if let Some(updated_at) = self.updated_at_mut() {
            *updated_at = now;
        }
    }

    /// 更新前总是刷新 updatedAt
    fn stamp_for_update(&mut self, now: DateTime<Utc>) {
        if let Some(updated_at) = self.updated_at_mut() {
            *updated_at = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_id_from_name() {
        let doc: Document = serde_json::from_value(json!({
            "name": "projects/p/databases/(default)/documents/students/abc123",
            "fields": {}
        }))
        .unwrap();
        assert_eq!(doc.id(), Some("abc123"));
    }

    #[test]
    fn test_document_without_name_has_no_id() {
        let doc: Document = serde_json::from_value(json!({"fields": {}})).unwrap();
        assert_eq!(doc.id(), None);
    }
}
