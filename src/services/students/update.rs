use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentService, student_not_found};
use crate::models::ApiResponse;
use crate::models::students::requests::UpdateStudentRequest;
use crate::services::{storage_error, validation_error};
use crate::utils::validate::{validate_email, validate_full_name, validate_phone};

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: &str,
    update_data: UpdateStudentRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_update_request(&update_data) {
        return Ok(validation_error(msg));
    }

    let storage = service.get_storage(request);
    let mut student = match storage.get_student(student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => return Ok(student_not_found()),
        Err(e) => return Ok(storage_error(&e, "Failed to retrieve student")),
    };

    update_data.apply(&mut student);
    match storage.update_student(student).await {
        Ok(student) => {
            info!("Student {} updated", student_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                student,
                "Student updated successfully",
            )))
        }
        Err(e) => Ok(storage_error(&e, "Failed to update student")),
    }
}

fn validate_update_request(req: &UpdateStudentRequest) -> Result<(), &'static str> {
    if let Some(name) = &req.full_name {
        validate_full_name(name)?;
    }
    if let Some(phone) = &req.phone {
        validate_phone(phone)?;
    }
    if let Some(parent_email) = &req.parent_email
        && !parent_email.trim().is_empty()
    {
        validate_email(parent_email)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::services::test_support::{as_dyn, request_as, student};
    use crate::storage::Storage;
    use crate::storage::memory_storage::MemoryStorage;
    use actix_web::http::StatusCode;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_update_clamps_gpa() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed_student(student("s1", "Ada", ""));
        let service = StudentService::with_storage(as_dyn(&storage));

        let update = UpdateStudentRequest {
            gpa: Some(5.2),
            grade_level: Some("11".to_string()),
            ..Default::default()
        };
        let resp = service
            .update_student(&request_as(UserRole::Hr, "h1"), "s1", update)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let stored = storage.get_student("s1").await.unwrap().unwrap();
        assert_eq!(stored.gpa, 4.0);
        assert_eq!(stored.grade_level, "11");
    }

    #[actix_web::test]
    async fn test_update_unknown_student() {
        let storage = Arc::new(MemoryStorage::new());
        let service = StudentService::with_storage(as_dyn(&storage));
        let resp = service
            .update_student(
                &request_as(UserRole::Hr, "h1"),
                "missing",
                UpdateStudentRequest::default(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
