pub mod login;
pub mod password;
pub mod profile;
pub mod register;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};
use std::sync::Arc;

use crate::errors::{Result, SchoolError};
use crate::identity::IdentityFailure;
use crate::models::auth::requests::{
    ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
};
use crate::models::auth::responses::AccountProfile;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::UpdateProfileRequest;
use crate::models::ApiResponse;
use crate::storage::Storage;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
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

    // 登录
    pub async fn login(
        &self,
        login_request: LoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, login_request, request).await
    }

    // 注册
    pub async fn register(
        &self,
        register_request: RegisterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        register::handle_register(self, register_request, request).await
    }

    // 发送重置密码邮件
    pub async fn forgot_password(
        &self,
        forgot_request: ForgotPasswordRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        password::handle_forgot_password(forgot_request, request).await
    }

    // 使用邮件中的 oob code 重置密码
    pub async fn reset_password(
        &self,
        reset_request: ResetPasswordRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        password::handle_reset_password(reset_request, request).await
    }

    // 获取当前用户资料
    pub async fn get_profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        profile::handle_get_profile(self, request).await
    }

    // 更新当前用户资料
    pub async fn update_profile(
        &self,
        update_request: UpdateProfileRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        profile::handle_update_profile(self, update_request, request).await
    }
}

/// 按角色到对应集合读取档案
pub(crate) async fn load_account(
    storage: &Arc<dyn Storage>,
    uid: &str,
    role: UserRole,
) -> Result<Option<AccountProfile>> {
    Ok(match role {
        UserRole::Hr => storage.get_hr_user(uid).await?.map(AccountProfile::Hr),
        UserRole::Student => storage.get_student(uid).await?.map(AccountProfile::Student),
        UserRole::Teacher => storage.get_teacher(uid).await?.map(AccountProfile::Teacher),
    })
}

pub(crate) async fn save_account(
    storage: &Arc<dyn Storage>,
    account: AccountProfile,
) -> Result<AccountProfile> {
    Ok(match account {
        AccountProfile::Hr(user) => AccountProfile::Hr(storage.update_hr_user(user).await?),
        AccountProfile::Student(student) => {
            AccountProfile::Student(storage.update_student(student).await?)
        }
        AccountProfile::Teacher(teacher) => {
            AccountProfile::Teacher(storage.update_teacher(teacher).await?)
        }
    })
}

/// Firebase Auth 错误转为响应
pub(crate) fn identity_error_response(error: &SchoolError) -> HttpResponse {
    let failure = IdentityFailure::from_error(error);
    let status = match failure {
        IdentityFailure::InvalidCredentials => StatusCode::UNAUTHORIZED,
        IdentityFailure::UserDisabled => StatusCode::FORBIDDEN,
        IdentityFailure::EmailExists => StatusCode::CONFLICT,
        IdentityFailure::TooManyAttempts => StatusCode::TOO_MANY_REQUESTS,
        IdentityFailure::Unavailable(ref code) => {
            tracing::error!("Identity provider failure: {} ({})", error, code);
            StatusCode::SERVICE_UNAVAILABLE
        }
        _ => StatusCode::BAD_REQUEST,
    };
    HttpResponse::build(status).json(ApiResponse::error_empty(
        failure.error_code(),
        failure.user_message(),
    ))
}
