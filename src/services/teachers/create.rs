use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use crate::models::ApiResponse;
use crate::models::teachers::entities::TeacherProfile;
use crate::models::teachers::requests::CreateTeacherRequest;
use crate::models::teachers::responses::CreatedTeacherResponse;
use crate::services::auth::identity_error_response;
use crate::services::{identity_from_request, storage_error, validation_error};
use crate::utils::random_code::generate_temporary_password;
use crate::utils::validate::{validate_email, validate_full_name, validate_phone};

pub async fn create_teacher(
    service: &TeacherService,
    request: &HttpRequest,
    create_data: CreateTeacherRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_create_request(&create_data) {
        return Ok(validation_error(msg));
    }

    let storage = service.get_storage(request);
    let identity = identity_from_request(request);

    let email = create_data.email.trim().to_string();
    let temporary_password = generate_temporary_password();
    let account = match identity.sign_up(&email, &temporary_password).await {
        Ok(account) => account,
        Err(e) => return Ok(identity_error_response(&e)),
    };

    let teacher = build_teacher(&account.local_id, &email, create_data);
    match storage.create_teacher(teacher).await {
        Ok(teacher) => {
            info!("Teacher {} created", teacher.id());
            Ok(HttpResponse::Created().json(ApiResponse::success(
                CreatedTeacherResponse {
                    teacher,
                    temporary_password,
                },
                "Teacher created successfully",
            )))
        }
        Err(e) => Ok(storage_error(&e, "Failed to create teacher")),
    }
}

fn validate_create_request(req: &CreateTeacherRequest) -> Result<(), &'static str> {
    validate_email(&req.email)?;
    validate_full_name(&req.full_name)?;
    validate_phone(req.phone.as_deref().unwrap_or_default())?;
    if req.teacher_id.trim().is_empty() {
        return Err("Teacher ID is required");
    }
    if req.department.trim().is_empty() {
        return Err("Department is required");
    }
    Ok(())
}

fn build_teacher(uid: &str, email: &str, req: CreateTeacherRequest) -> TeacherProfile {
    let mut teacher = TeacherProfile::new(uid, email, req.full_name.trim());
    teacher.profile.phone = req.phone.unwrap_or_default();
    teacher.teacher_id = req.teacher_id.trim().to_string();
    teacher.department = req.department.trim().to_string();
    teacher.subjects = req.subjects;
    if let Some(hire_date) = req.hire_date {
        teacher.hire_date = hire_date;
    }
    teacher.qualification = req.qualification.unwrap_or_default();
    teacher.specialization = req.specialization.unwrap_or_default();
    teacher.employee_id = req.employee_id.unwrap_or_default();
    teacher.is_head_of_department = req.is_head_of_department;
    teacher
}
