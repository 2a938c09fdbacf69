//! 结构化查询
//!
//! 只支持单个等值过滤加可选的单字段排序；更复杂的筛选和分页在客户端完成。

use serde::Serialize;

use super::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredQuery {
    from: Vec<CollectionSelector>,
    #[serde(rename = "where")]
    filter: Filter,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    order_by: Vec<Order>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct CollectionSelector {
    collection_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct Filter {
    field_filter: FieldFilter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct FieldFilter {
    field: FieldReference,
    op: &'static str,
    value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct FieldReference {
    field_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Order {
    field: FieldReference,
    direction: Direction,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RunQueryRequest<'a> {
    pub structured_query: &'a StructuredQuery,
}

impl StructuredQuery {
    /// `collection` 中 `field == value` 的文档
    pub fn equal(collection: &str, field: &str, value: Value) -> Self {
        Self {
            from: vec![CollectionSelector {
                collection_id: collection.to_string(),
            }],
            filter: Filter {
                field_filter: FieldFilter {
                    field: FieldReference {
                        field_path: field.to_string(),
                    },
                    op: "EQUAL",
                    value,
                },
            },
            order_by: Vec::new(),
        }
    }

    /// 设置排序字段，重复调用会覆盖之前的排序
    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order_by = vec![Order {
            field: FieldReference {
                field_path: field.to_string(),
            },
            direction,
        }];
        self
    }

    pub fn collection(&self) -> &str {
        self.from
            .first()
            .map(|c| c.collection_id.as_str())
            .unwrap_or_default()
    }
}
