use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{TeacherService, teacher_not_found};
use crate::models::ApiResponse;
use crate::services::storage_error;

pub async fn get_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: &str,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_teacher(teacher_id).await {
        Ok(Some(teacher)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            teacher,
            "Teacher retrieved successfully",
        ))),
        Ok(None) => Ok(teacher_not_found()),
        Err(e) => Ok(storage_error(&e, "Failed to retrieve teacher")),
    }
}
