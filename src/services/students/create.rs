use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::StudentService;
use crate::models::ApiResponse;
use crate::models::students::entities::{DEFAULT_GRADE_LEVEL, StudentProfile};
use crate::models::students::requests::CreateStudentRequest;
use crate::models::students::responses::CreatedStudentResponse;
use crate::services::auth::identity_error_response;
use crate::services::{identity_from_request, storage_error, validation_error};
use crate::utils::random_code::generate_temporary_password;
use crate::utils::validate::{validate_email, validate_full_name, validate_phone};

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    create_data: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_create_request(&create_data) {
        return Ok(validation_error(msg));
    }

    let storage = service.get_storage(request);
    let identity = identity_from_request(request);

    // 1. 以临时密码创建登录账号
    let email = create_data.email.trim().to_string();
    let temporary_password = generate_temporary_password();
    let account = match identity.sign_up(&email, &temporary_password).await {
        Ok(account) => account,
        Err(e) => return Ok(identity_error_response(&e)),
    };

    // 2. 写入学生档案，班级稍后通过分班写入
    let class_id = create_data
        .class_id
        .clone()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    let student = build_student(&account.local_id, &email, create_data);
    let mut student = match storage.create_student(student).await {
        Ok(student) => student,
        Err(e) => return Ok(storage_error(&e, "Failed to create student")),
    };

    // 3. 分班失败不影响建档
    if let Some(class_id) = class_id {
        match storage
            .assign_student_to_class(student.id(), &class_id)
            .await
        {
            Ok(Some(_)) => student.class_id = class_id,
            Ok(None) => warn!(
                "Class {} not found, student {} left unassigned",
                class_id,
                student.id()
            ),
            Err(e) => warn!(
                "Failed to assign student {} to class {}: {}",
                student.id(),
                class_id,
                e
            ),
        }
    }

    info!("Student {} created", student.id());
    Ok(HttpResponse::Created().json(ApiResponse::success(
        CreatedStudentResponse {
            student,
            temporary_password,
        },
        "Student created successfully",
    )))
}

fn validate_create_request(req: &CreateStudentRequest) -> Result<(), &'static str> {
    validate_email(&req.email)?;
    validate_full_name(&req.full_name)?;
    validate_phone(req.phone.as_deref().unwrap_or_default())?;
    if req.student_id.trim().is_empty() {
        return Err("Student ID is required");
    }
    if let Some(parent_email) = req.parent_email.as_deref()
        && !parent_email.trim().is_empty()
    {
        validate_email(parent_email)?;
    }
    Ok(())
}

fn build_student(uid: &str, email: &str, req: CreateStudentRequest) -> StudentProfile {
    let mut student = StudentProfile::new(uid, email, req.full_name.trim());
    student.profile.phone = req.phone.unwrap_or_default();
    student.profile.address = req.address.unwrap_or_default();
    student.profile.date_of_birth = req.date_of_birth;
    student.student_id = req.student_id.trim().to_string();
    student.grade_level = req
        .grade_level
        .filter(|g| !g.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_GRADE_LEVEL.to_string());
    student.parent_name = req.parent_name.unwrap_or_default();
    student.parent_email = req.parent_email.unwrap_or_default();
    student.parent_phone = req.parent_phone.unwrap_or_default();
    student.enrolled_subjects = req.enrolled_subjects;
    student.emergency_contact = req.emergency_contact.unwrap_or_default();
    student
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_student_id_is_required() {
        let req: CreateStudentRequest = serde_json::from_value(json!({
            "email": "ada@school.test",
            "full_name": "Ada",
            "student_id": " "
        }))
        .unwrap();
        assert_eq!(validate_create_request(&req), Err("Student ID is required"));
    }

    #[test]
    fn test_built_student_starts_unassigned() {
        let req: CreateStudentRequest = serde_json::from_value(json!({
            "email": "ada@school.test",
            "full_name": "Ada",
            "student_id": "S-1",
            "class_id": "10A",
            "grade_level": ""
        }))
        .unwrap();
        assert!(validate_create_request(&req).is_ok());

        let student = build_student("uid-1", "ada@school.test", req);
        assert!(student.class_id.is_empty());
        assert_eq!(student.grade_level, DEFAULT_GRADE_LEVEL);
        assert_eq!(student.gpa, 0.0);
    }
}
