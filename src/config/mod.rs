//! 配置管理
//!
//! 默认值 -> config.toml -> config.{APP_ENV}.toml -> SCHOOLHUB__* 环境变量 -> 显式覆盖。

#[path = "impl.rs"]
mod loader;
mod structs;

pub use structs::*;
