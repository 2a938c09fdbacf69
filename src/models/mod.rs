//! 数据模型定义
//!
//! 业务实体、请求/响应结构与报表视图模型。

pub mod attendance;
pub mod auth;
pub mod classes;
pub mod common;
pub mod grades;
pub mod reports;
pub mod students;
pub mod teachers;
pub mod users;

pub use common::{
    ApiResponse, CountResponse, ListResponse, PaginatedResponse, PaginationInfo, PaginationQuery,
    StatsWidgetResponse,
};

use serde::Serialize;

/// 应用启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码，随每个响应返回
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    RateLimitExceeded = 1005,
    InternalServerError = 1006,
    UpstreamUnavailable = 1007,

    // 认证相关
    AuthFailed = 2000,
    RoleMismatch = 2001,
    EmailAlreadyExists = 2002,
    AccountDisabled = 2003,
    WeakPassword = 2004,
    ProfileNotFound = 2005,

    // 业务相关
    StudentNotFound = 3000,
    TeacherNotFound = 3001,
    ClassNotFound = 3002,
    GradeNotFound = 3003,
    StudentAccessDenied = 3004,
    ClassPermissionDenied = 3005,
    InvalidGradeWeights = 3006,
}
