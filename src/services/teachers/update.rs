use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{TeacherService, teacher_not_found};
use crate::models::ApiResponse;
use crate::models::teachers::requests::UpdateTeacherRequest;
use crate::services::{storage_error, validation_error};
use crate::utils::validate::{validate_full_name, validate_phone};

pub async fn update_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    teacher_id: &str,
    update_data: UpdateTeacherRequest,
) -> ActixResult<HttpResponse> {
    if let Some(name) = &update_data.full_name
        && let Err(msg) = validate_full_name(name)
    {
        return Ok(validation_error(msg));
    }
    if let Some(phone) = &update_data.phone
        && let Err(msg) = validate_phone(phone)
    {
        return Ok(validation_error(msg));
    }

    let storage = service.get_storage(request);
    let mut teacher = match storage.get_teacher(teacher_id).await {
        Ok(Some(teacher)) => teacher,
        Ok(None) => return Ok(teacher_not_found()),
        Err(e) => return Ok(storage_error(&e, "Failed to retrieve teacher")),
    };

    update_data.apply(&mut teacher);
    match storage.update_teacher(teacher).await {
        Ok(teacher) => {
            info!("Teacher {} updated", teacher_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                teacher,
                "Teacher updated successfully",
            )))
        }
        Err(e) => Ok(storage_error(&e, "Failed to update teacher")),
    }
}
