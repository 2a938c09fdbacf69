use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::{ClassService, class_not_found};
use crate::models::classes::entities::ClassSummary;
use crate::models::classes::requests::{AssignStudentRequest, AssignTeacherRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{storage_error, validation_error};
use crate::storage::Storage;

pub async fn assign_student(
    service: &ClassService,
    request: &HttpRequest,
    class_id: &str,
    assign_data: AssignStudentRequest,
) -> ActixResult<HttpResponse> {
    let student_id = assign_data.student_id.trim();
    if student_id.is_empty() {
        return Ok(validation_error("Student ID is required"));
    }

    let storage = service.get_storage(request);
    match storage.assign_student_to_class(student_id, class_id).await {
        Ok(Some(class)) => {
            info!("Student {} assigned to class {}", student_id, class_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                ClassSummary::from(class),
                "Student assigned successfully",
            )))
        }
        Ok(None) => Ok(missing_target(&storage, class_id, ErrorCode::StudentNotFound).await),
        Err(e) => Ok(storage_error(&e, "Failed to assign student")),
    }
}

pub async fn assign_teacher(
    service: &ClassService,
    request: &HttpRequest,
    class_id: &str,
    assign_data: AssignTeacherRequest,
) -> ActixResult<HttpResponse> {
    let teacher_id = assign_data.teacher_id.trim();
    if teacher_id.is_empty() {
        return Ok(validation_error("Teacher ID is required"));
    }

    let storage = service.get_storage(request);
    match storage.assign_teacher_to_class(teacher_id, class_id).await {
        Ok(Some(class)) => {
            info!("Teacher {} assigned to class {}", teacher_id, class_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                ClassSummary::from(class),
                "Teacher assigned successfully",
            )))
        }
        Ok(None) => Ok(missing_target(&storage, class_id, ErrorCode::TeacherNotFound).await),
        Err(e) => Ok(storage_error(&e, "Failed to assign teacher")),
    }
}

/// 分配失败时区分是班级还是被分配的一方不存在
async fn missing_target(
    storage: &Arc<dyn Storage>,
    class_id: &str,
    member_code: ErrorCode,
) -> HttpResponse {
    match storage.get_class(class_id).await {
        Ok(None) => class_not_found(),
        _ => {
            let message = match member_code {
                ErrorCode::TeacherNotFound => "Teacher not found",
                _ => "Student not found",
            };
            HttpResponse::NotFound().json(ApiResponse::error_empty(member_code, message))
        }
    }
}
