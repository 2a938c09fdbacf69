use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use tracing::{error, info};

use super::{AuthService, identity_error_response, load_account};
use crate::models::auth::requests::LoginRequest;
use crate::models::auth::responses::{AccountProfile, LoginResponse};
use crate::models::users::entities::{CurrentUser, UserRole};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{identity_from_request, storage_error};
use crate::utils::jwt::JwtUtils;

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let identity = identity_from_request(request);

    // 1. Firebase Auth 校验账号密码
    let account = match identity
        .sign_in(login_request.email.trim(), &login_request.password)
        .await
    {
        Ok(account) => account,
        Err(e) => return Ok(identity_error_response(&e)),
    };

    // 2. 到所选角色的集合读取档案
    let profile = match load_account(&storage, &account.local_id, login_request.role).await {
        Ok(profile) => profile,
        Err(e) => return Ok(storage_error(&e, "Failed to load profile")),
    };
    let profile = match check_login_profile(login_request.role, profile) {
        Ok(profile) => profile,
        Err((status, code, message)) => {
            info!(
                "Login rejected for {} as {}: {}",
                account.local_id, login_request.role, message
            );
            return Ok(HttpResponse::build(status).json(ApiResponse::error_empty(code, message)));
        }
    };

    // 3. 签发会话令牌
    let user = profile.profile().clone();
    let current = CurrentUser {
        uid: user.id.clone(),
        email: user.email.clone(),
        role: login_request.role,
    };
    match JwtUtils::generate_access_token(&current) {
        Ok(access_token) => {
            info!("User {} logged in as {}", user.id, current.role);
            let response = LoginResponse {
                access_token,
                expires_in: JwtUtils::access_token_ttl(),
                user,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Login successful")))
        }
        Err(e) => {
            error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            )
        }
    }
}

/// 档案必须存在于所选角色的集合、角色一致且账号未停用
pub(crate) fn check_login_profile(
    role: UserRole,
    profile: Option<AccountProfile>,
) -> Result<AccountProfile, (StatusCode, ErrorCode, String)> {
    let Some(profile) = profile else {
        return Err((
            StatusCode::UNAUTHORIZED,
            ErrorCode::RoleMismatch,
            format!("No {role} account found for these credentials"),
        ));
    };

    if profile.profile().role != role {
        return Err((
            StatusCode::UNAUTHORIZED,
            ErrorCode::RoleMismatch,
            format!(
                "This account is registered as {}, not {role}",
                profile.profile().role
            ),
        ));
    }

    if !profile.profile().is_active {
        return Err((
            StatusCode::FORBIDDEN,
            ErrorCode::AccountDisabled,
            "This account has been deactivated".to_string(),
        ));
    }

    Ok(profile)
}
