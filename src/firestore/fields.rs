//! 文档字段集合
//!
//! 写入端提供链式的类型化写入方法，读取端对缺失字段返回 `None`，
//! 由各实体自行决定默认值。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::value::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields(BTreeMap<String, Value>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: Value) -> &mut Self {
        self.0.insert(key.to_string(), value);
        self
    }

    pub fn string(&mut self, key: &str, value: &str) -> &mut Self {
        self.insert(key, Value::string(value))
    }

    pub fn integer(&mut self, key: &str, value: i64) -> &mut Self {
        self.insert(key, Value::IntegerValue(value))
    }

    pub fn double(&mut self, key: &str, value: f64) -> &mut Self {
        self.insert(key, Value::DoubleValue(value))
    }

    pub fn boolean(&mut self, key: &str, value: bool) -> &mut Self {
        self.insert(key, Value::BooleanValue(value))
    }

    pub fn timestamp(&mut self, key: &str, value: DateTime<Utc>) -> &mut Self {
        self.insert(key, Value::timestamp(value))
    }

    /// `None` 写为 nullValue，保证 update mask 能清空该字段
    pub fn optional_timestamp(&mut self, key: &str, value: Option<DateTime<Utc>>) -> &mut Self {
        match value {
            Some(ts) => self.timestamp(key, ts),
            None => self.insert(key, Value::NullValue(())),
        }
    }

    pub fn string_array<S: AsRef<str>>(&mut self, key: &str, values: &[S]) -> &mut Self {
        self.insert(key, Value::string_array(values))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(Value::as_str).map(str::to_string)
    }

    /// 缺失或为空字符串时使用默认值
    pub fn string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn get_timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        self.get(key).and_then(Value::as_timestamp)
    }

    pub fn get_string_array(&self, key: &str) -> Option<Vec<String>> {
        self.get(key).and_then(Value::as_string_array)
    }

    /// 字段路径列表，用作 PATCH 的 update mask
    pub fn field_paths(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Value)> for Fields {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Fields(iter.into_iter().collect())
    }
}
