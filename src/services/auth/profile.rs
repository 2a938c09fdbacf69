use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AuthService, load_account, save_account};
use crate::models::users::requests::UpdateProfileRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_user, storage_error, validation_error};
use crate::utils::validate::{validate_full_name, validate_phone};

fn profile_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::ProfileNotFound,
        "Profile not found",
    ))
}

pub async fn handle_get_profile(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match load_account(&storage, &user.uid, user.role).await {
        Ok(Some(profile)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            profile,
            "Profile retrieved successfully",
        ))),
        Ok(None) => Ok(profile_not_found()),
        Err(e) => Ok(storage_error(&e, "Failed to load profile")),
    }
}

pub async fn handle_update_profile(
    service: &AuthService,
    update_data: UpdateProfileRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };

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
    let mut profile = match load_account(&storage, &user.uid, user.role).await {
        Ok(Some(profile)) => profile,
        Ok(None) => return Ok(profile_not_found()),
        Err(e) => return Ok(storage_error(&e, "Failed to load profile")),
    };

    update_data.apply(profile.profile_mut());
    match save_account(&storage, profile).await {
        Ok(profile) => {
            info!("User {} updated profile", user.uid);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                profile,
                "Profile updated successfully",
            )))
        }
        Err(e) => Ok(storage_error(&e, "Failed to update profile")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::{UserProfile, UserRole};
    use crate::services::test_support::{as_dyn, body_json, request_as, student};
    use crate::storage::Storage;
    use crate::storage::memory_storage::MemoryStorage;
    use actix_web::http::StatusCode;
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_profile_is_read_from_role_collection() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed_student(student("s1", "Ada", "10A"));
        let service = AuthService::with_storage(as_dyn(&storage));

        let resp = service
            .get_profile(&request_as(UserRole::Student, "s1"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["student_id"], "S-s1");
        assert_eq!(body["data"]["full_name"], "Ada");

        // 同一个 uid 以教师身份没有档案
        let resp = service
            .get_profile(&request_as(UserRole::Teacher, "s1"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_update_profile_keeps_role_fields() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed_student(student("s1", "Ada", "10A"));
        let service = AuthService::with_storage(as_dyn(&storage));

        let update = UpdateProfileRequest {
            phone: Some("+1 555 0100".to_string()),
            ..Default::default()
        };
        let resp = service
            .update_profile(update, &request_as(UserRole::Student, "s1"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let stored = storage.get_student("s1").await.unwrap().unwrap();
        assert_eq!(stored.profile.phone, "+1 555 0100");
        assert_eq!(stored.class_id, "10A");
    }

    #[actix_web::test]
    async fn test_hr_profile_comes_from_users() {
        let storage = Arc::new(MemoryStorage::new());
        storage.seed_hr_user(UserProfile::new(
            "h1",
            "h1@school.test",
            "Helen Hr",
            UserRole::Hr,
        ));
        let service = AuthService::with_storage(as_dyn(&storage));

        let body = body_json(
            service
                .get_profile(&request_as(UserRole::Hr, "h1"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(body["data"]["full_name"], "Helen Hr");
        assert_eq!(body["data"]["role"], "hr");
    }

    #[actix_web::test]
    async fn test_blank_name_is_rejected() {
        let storage = Arc::new(MemoryStorage::new());
        let service = AuthService::with_storage(as_dyn(&storage));
        let update = UpdateProfileRequest {
            full_name: Some(String::new()),
            ..Default::default()
        };
        let resp = service
            .update_profile(update, &request_as(UserRole::Hr, "h1"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
