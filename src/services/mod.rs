pub mod attendance;
pub mod auth;
pub mod classes;
pub mod dashboard;
pub mod grades;
pub mod reports;
pub mod students;
pub mod teachers;

#[cfg(test)]
mod test_support;

pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use classes::ClassService;
pub use dashboard::DashboardService;
pub use grades::GradeService;
pub use reports::ReportService;
pub use students::StudentService;
pub use teachers::TeacherService;

use actix_web::{HttpRequest, HttpResponse, http::header, web};
use futures_util::future::join_all;
use std::future::Future;
use std::sync::Arc;
use tracing::{error, warn};

use crate::config::{AppConfig, ReportConfig};
use crate::errors::{Result, SchoolError};
use crate::identity::IdentityClient;
use crate::middlewares::RequireJWT;
use crate::models::teachers::entities::TeacherProfile;
use crate::models::users::entities::CurrentUser;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 教师越权访问学生时跳回的列表页
pub const TEACHER_STUDENTS_PATH: &str = "/api/v1/teacher/students";

pub(crate) fn storage_from_request(
    storage: &Option<Arc<dyn Storage>>,
    request: &HttpRequest,
) -> Arc<dyn Storage> {
    if let Some(storage) = storage {
        storage.clone()
    } else {
        request
            .app_data::<web::Data<Arc<dyn Storage>>>()
            .expect("Storage not found in app data")
            .get_ref()
            .clone()
    }
}

pub(crate) fn identity_from_request(request: &HttpRequest) -> IdentityClient {
    request
        .app_data::<web::Data<IdentityClient>>()
        .expect("IdentityClient not found in app data")
        .get_ref()
        .clone()
}

/// 报表设置；测试里可以直接注入，否则取全局配置
pub(crate) fn report_settings(request: &HttpRequest) -> ReportConfig {
    match request.app_data::<web::Data<ReportConfig>>() {
        Some(settings) => settings.get_ref().clone(),
        None => AppConfig::get().report.clone(),
    }
}

pub(crate) fn current_user(request: &HttpRequest) -> std::result::Result<CurrentUser, HttpResponse> {
    RequireJWT::extract_current_user(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing user identity",
        ))
    })
}

/// 写操作或必需读取失败时的响应：上游故障 503，其余 500
pub(crate) fn storage_error(error: &SchoolError, context: &str) -> HttpResponse {
    error!("{}: {}", context, error);
    if error.is_upstream() {
        HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
            ErrorCode::UpstreamUnavailable,
            format!("{context}: data service is temporarily unavailable"),
        ))
    } else {
        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
            ErrorCode::InternalServerError,
            format!("{context}: {}", error.message()),
        ))
    }
}

pub(crate) fn validation_error(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::ValidationFailed,
        message,
    ))
}

/// 读取降级：失败时返回默认值，记录日志并把 complete 置为 false
pub(crate) fn degrade<T: Default>(
    result: Result<T>,
    collection: &str,
    operation: &str,
    complete: &mut bool,
) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(
                collection,
                operation,
                error_code = e.code(),
                "Degrading read to empty result: {}",
                e
            );
            *complete = false;
            T::default()
        }
    }
}

/// 按学生并发拉取，单个学生失败只跳过该学生
pub(crate) async fn fan_out<T, F, Fut>(
    student_ids: &[String],
    collection: &str,
    fetch: F,
    complete: &mut bool,
) -> Vec<T>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let results = join_all(student_ids.iter().cloned().map(fetch)).await;

    let mut items = Vec::new();
    for (student_id, result) in student_ids.iter().zip(results) {
        let operation = format!("list by student {student_id}");
        items.extend(degrade(result, collection, &operation, complete));
    }
    items
}

/// 教师访问不在其班级内的学生：303 跳回学生列表
pub(crate) fn student_access_redirect() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, TEACHER_STUDENTS_PATH))
        .json(ApiResponse::error_empty(
            ErrorCode::StudentAccessDenied,
            "You can only access students in your own classes",
        ))
}

pub(crate) fn class_permission_denied() -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(
        ErrorCode::ClassPermissionDenied,
        "You can only access your own classes",
    ))
}

/// 加载当前登录教师的档案
pub(crate) async fn load_teacher(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
) -> std::result::Result<TeacherProfile, HttpResponse> {
    let user = current_user(request)?;
    match storage.get_teacher(&user.uid).await {
        Ok(Some(teacher)) => Ok(teacher),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProfileNotFound,
            "Teacher profile not found",
        ))),
        Err(e) => Err(storage_error(&e, "Failed to load teacher profile")),
    }
}
