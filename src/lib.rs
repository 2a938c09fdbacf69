//! SchoolHub - 学校管理平台后端服务
//!
//! 基于 Actix Web 构建，身份认证使用 Firebase Auth，数据存储在 Firestore。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: Firestore 文档映射
//! - `errors`: 统一错误处理
//! - `firestore`: Firestore REST 文档编组与客户端
//! - `identity`: Firebase Auth REST 客户端
//! - `middlewares`: 认证授权与限流中间件
//! - `models`: 数据模型定义
//! - `reports`: 报表与统计（纯计算）
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（Firestore）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod firestore;
pub mod identity;
pub mod middlewares;
pub mod models;
pub mod reports;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
