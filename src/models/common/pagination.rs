use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 20;

// 列表分页参数，查询串里的数字以字符串形式出现
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    #[serde(default = "first_page", deserialize_with = "lenient_i64")]
    pub page: i64,
    #[serde(
        default = "default_size",
        alias = "pageSize",
        alias = "limit",
        deserialize_with = "lenient_i64"
    )]
    pub size: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
    // 上游读取失败降级为空时为 false
    pub data_complete: bool,
}

impl<T> PaginatedResponse<T> {
    pub fn with_completeness(mut self, data_complete: bool) -> Self {
        self.data_complete = data_complete;
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(i64),
    Text(String),
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("expected an integer, got {s:?}"))),
    }
}

fn first_page() -> i64 {
    1
}

fn default_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: first_page(),
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::requests::StudentListParams;
    use actix_web::web::Query;

    #[test]
    fn test_query_string_numbers() {
        let params = Query::<StudentListParams>::from_query("page=3&pageSize=50&search=ada")
            .unwrap()
            .into_inner();
        assert_eq!(params.pagination.page, 3);
        assert_eq!(params.pagination.size, 50);
        assert_eq!(params.search.as_deref(), Some("ada"));
    }

    #[test]
    fn test_missing_values_use_defaults() {
        let params = Query::<StudentListParams>::from_query("").unwrap().into_inner();
        assert_eq!(params.pagination.page, 1);
        assert_eq!(params.pagination.size, DEFAULT_PAGE_SIZE);
        assert!(Query::<StudentListParams>::from_query("page=two").is_err());
    }
}
