use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::identity_error_response;
use crate::identity::IdentityFailure;
use crate::models::auth::requests::{ForgotPasswordRequest, ResetPasswordRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{identity_from_request, validation_error};
use crate::utils::validate::{validate_email, validate_password};

const RESET_EMAIL_SENT: &str = "If an account exists for this email, a reset link has been sent";

pub async fn handle_forgot_password(
    forgot_request: ForgotPasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let email = forgot_request.email.trim();
    if let Err(msg) = validate_email(email) {
        return Ok(validation_error(msg));
    }

    let identity = identity_from_request(request);
    match identity.send_password_reset(email).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(RESET_EMAIL_SENT))),
        Err(e) => match IdentityFailure::from_error(&e) {
            // 不暴露账号是否存在
            IdentityFailure::InvalidCredentials => {
                info!("Password reset requested for unknown email");
                Ok(HttpResponse::Ok().json(ApiResponse::success_empty(RESET_EMAIL_SENT)))
            }
            _ => Ok(identity_error_response(&e)),
        },
    }
}

pub async fn handle_reset_password(
    reset_request: ResetPasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if reset_request.oob_code.trim().is_empty() {
        return Ok(validation_error("Reset code is required"));
    }
    if let Err(msg) = validate_password(&reset_request.new_password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::WeakPassword, msg)));
    }

    let identity = identity_from_request(request);
    match identity
        .reset_password(reset_request.oob_code.trim(), &reset_request.new_password)
        .await
    {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Password has been reset, please log in",
        ))),
        Err(e) => Ok(identity_error_response(&e)),
    }
}
