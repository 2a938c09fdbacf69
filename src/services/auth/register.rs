use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::{error, info};

use super::{AuthService, identity_error_response};
use crate::errors::Result;
use crate::models::auth::requests::RegisterRequest;
use crate::models::auth::responses::{AccountProfile, LoginResponse};
use crate::models::students::entities::{DEFAULT_GRADE_LEVEL, StudentProfile};
use crate::models::teachers::entities::TeacherProfile;
use crate::models::users::entities::{CurrentUser, UserProfile, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{identity_from_request, storage_error, validation_error};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use crate::utils::validate::{
    validate_email, validate_full_name, validate_password, validate_phone,
};

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(response) = validate_register_request(&register_request) {
        return Ok(response);
    }

    let storage = service.get_storage(request);
    let identity = identity_from_request(request);

    // 1. 创建 Firebase Auth 账号
    let email = register_request.email.trim().to_string();
    let account = match identity.sign_up(&email, &register_request.password).await {
        Ok(account) => account,
        Err(e) => return Ok(identity_error_response(&e)),
    };

    // 2. 写入对应角色的档案
    let profile = build_account(&account.local_id, &email, register_request);
    let role = profile.profile().role;
    let profile = match create_account(&storage, profile).await {
        Ok(profile) => profile,
        Err(e) => {
            // 账号已创建但档案写入失败，需要人工清理
            error!(
                "Auth account {} created but profile write failed: {}",
                account.local_id, e
            );
            return Ok(storage_error(&e, "Failed to create profile"));
        }
    };

    // 3. 注册即登录
    let user = profile.profile().clone();
    let current = CurrentUser {
        uid: user.id.clone(),
        email: user.email.clone(),
        role,
    };
    match JwtUtils::generate_access_token(&current) {
        Ok(access_token) => {
            info!("User {} registered as {}", user.id, role);
            let response = LoginResponse {
                access_token,
                expires_in: JwtUtils::access_token_ttl(),
                user,
            };
            Ok(HttpResponse::Created().json(ApiResponse::success(
                response,
                "Registration successful",
            )))
        }
        Err(e) => {
            error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Registration succeeded but sign-in failed, please log in",
                )),
            )
        }
    }
}

pub(crate) fn validate_register_request(req: &RegisterRequest) -> std::result::Result<(), HttpResponse> {
    validate_email(req.email.trim()).map_err(validation_error)?;
    validate_full_name(&req.full_name).map_err(validation_error)?;
    validate_phone(req.phone.as_deref().unwrap_or_default()).map_err(validation_error)?;
    validate_password(&req.password).map_err(|msg| {
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::WeakPassword, msg))
    })?;

    let missing = req.missing_role_fields();
    if !missing.is_empty() {
        return Err(validation_error(format!(
            "Missing required fields for {}: {}",
            req.role,
            missing.join(", ")
        )));
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

pub(crate) fn build_account(uid: &str, email: &str, req: RegisterRequest) -> AccountProfile {
    let full_name = req.full_name.trim();
    match req.role {
        UserRole::Hr => {
            let mut user = UserProfile::new(uid, email, full_name, UserRole::Hr);
            user.phone = non_empty(req.phone);
            AccountProfile::Hr(user)
        }
        UserRole::Student => {
            let mut student = StudentProfile::new(uid, email, full_name);
            student.profile.phone = non_empty(req.phone);
            student.student_id = non_empty(req.student_id);
            student.grade_level = req
                .grade_level
                .map(|g| g.trim().to_string())
                .filter(|g| !g.is_empty())
                .unwrap_or_else(|| DEFAULT_GRADE_LEVEL.to_string());
            student.parent_name = non_empty(req.parent_name);
            student.parent_email = non_empty(req.parent_email);
            student.parent_phone = non_empty(req.parent_phone);
            AccountProfile::Student(student)
        }
        UserRole::Teacher => {
            let mut teacher = TeacherProfile::new(uid, email, full_name);
            teacher.profile.phone = non_empty(req.phone);
            teacher.teacher_id = non_empty(req.teacher_id);
            teacher.department = non_empty(req.department);
            teacher.subjects = req.subjects;
            teacher.qualification = non_empty(req.qualification);
            AccountProfile::Teacher(teacher)
        }
    }
}

async fn create_account(
    storage: &Arc<dyn Storage>,
    account: AccountProfile,
) -> Result<AccountProfile> {
    Ok(match account {
        AccountProfile::Hr(user) => AccountProfile::Hr(storage.create_hr_user(user).await?),
        AccountProfile::Student(student) => {
            AccountProfile::Student(storage.create_student(student).await?)
        }
        AccountProfile::Teacher(teacher) => {
            AccountProfile::Teacher(storage.create_teacher(teacher).await?)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use serde_json::json;

    fn request(body: serde_json::Value) -> RegisterRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_missing_student_fields_are_rejected() {
        let req = request(json!({
            "email": "ada@school.test",
            "password": "secret1",
            "full_name": "Ada",
            "role": "student"
        }));
        let resp = validate_register_request(&req).unwrap_err();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_short_password_is_rejected() {
        let req = request(json!({
            "email": "hana@school.test",
            "password": "abc",
            "full_name": "Hana",
            "role": "hr"
        }));
        assert!(validate_register_request(&req).is_err());
    }

    #[test]
    fn test_student_account_is_built_with_defaults() {
        let req = request(json!({
            "email": "ada@school.test",
            "password": "secret1",
            "full_name": " Ada Lovelace ",
            "role": "student",
            "student_id": "S-1",
            "parent_name": "Anne",
            "parent_email": "anne@home.test"
        }));
        assert!(validate_register_request(&req).is_ok());

        match build_account("uid-1", "ada@school.test", req) {
            AccountProfile::Student(s) => {
                assert_eq!(s.id(), "uid-1");
                assert_eq!(s.full_name(), "Ada Lovelace");
                assert_eq!(s.grade_level, DEFAULT_GRADE_LEVEL);
                assert_eq!(s.attendance_percentage, 100);
                assert!(s.class_id.is_empty());
            }
            other => panic!("unexpected account {other:?}"),
        }
    }
}
