pub mod attendance;
pub mod class_report;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::classes::entities::Class;
use crate::models::{ApiResponse, ErrorCode};
use crate::reports::visibility::can_view_class;
use crate::services::{class_permission_denied, load_teacher, storage_error};
use crate::storage::Storage;

pub struct ReportService {
    storage: Option<Arc<dyn Storage>>,
}

impl ReportService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    #[cfg(test)]
    pub(crate) fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        super::storage_from_request(&self.storage, request)
    }

    // 教务：任意班级的成绩报告
    pub async fn class_report(
        &self,
        request: &HttpRequest,
        class_id: &str,
    ) -> ActixResult<HttpResponse> {
        class_report::class_report(self, request, class_id, false).await
    }

    // 教师：本人所带班级的成绩报告
    pub async fn teacher_class_report(
        &self,
        request: &HttpRequest,
        class_id: &str,
    ) -> ActixResult<HttpResponse> {
        class_report::class_report(self, request, class_id, true).await
    }

    // 教师：本人所带班级的考勤分析
    pub async fn attendance_analysis(
        &self,
        request: &HttpRequest,
        class_id: &str,
    ) -> ActixResult<HttpResponse> {
        attendance::attendance_analysis(self, request, class_id).await
    }
}

/// 读取班级；teacher_only 时要求当前教师带这个班
async fn load_class(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
    class_id: &str,
    teacher_only: bool,
) -> Result<Class, HttpResponse> {
    if teacher_only {
        let teacher = load_teacher(storage, request).await?;
        if !can_view_class(&teacher, class_id) {
            return Err(class_permission_denied());
        }
    }

    match storage.get_class(class_id).await {
        Ok(Some(class)) => Ok(class),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ClassNotFound,
            "Class not found",
        ))),
        Err(e) => Err(storage_error(&e, "Failed to retrieve class")),
    }
}
