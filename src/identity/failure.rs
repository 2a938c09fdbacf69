//! Firebase 错误码到表单错误的映射

use crate::errors::SchoolError;
use crate::models::ErrorCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityFailure {
    EmailExists,
    InvalidCredentials,
    UserDisabled,
    WeakPassword,
    InvalidEmail,
    InvalidResetCode,
    TooManyAttempts,
    /// 上游不可用或未知错误码
    Unavailable(String),
}

impl IdentityFailure {
    /// 解析 Firebase 返回的错误消息，例如 `WEAK_PASSWORD : Password should be ...`
    pub fn from_firebase_message(message: &str) -> Self {
        let code = message.split(':').next().unwrap_or_default().trim();
        match code {
            "EMAIL_EXISTS" => IdentityFailure::EmailExists,
            "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
                IdentityFailure::InvalidCredentials
            }
            "USER_DISABLED" => IdentityFailure::UserDisabled,
            "WEAK_PASSWORD" => IdentityFailure::WeakPassword,
            "INVALID_EMAIL" | "MISSING_EMAIL" => IdentityFailure::InvalidEmail,
            "INVALID_OOB_CODE" | "EXPIRED_OOB_CODE" => IdentityFailure::InvalidResetCode,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => IdentityFailure::TooManyAttempts,
            other => IdentityFailure::Unavailable(other.to_string()),
        }
    }

    pub fn from_error(error: &SchoolError) -> Self {
        match error {
            SchoolError::Identity(message) => Self::from_firebase_message(message),
            other => IdentityFailure::Unavailable(other.message().to_string()),
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            IdentityFailure::EmailExists => ErrorCode::EmailAlreadyExists,
            IdentityFailure::InvalidCredentials => ErrorCode::AuthFailed,
            IdentityFailure::UserDisabled => ErrorCode::AccountDisabled,
            IdentityFailure::WeakPassword => ErrorCode::WeakPassword,
            IdentityFailure::InvalidEmail | IdentityFailure::InvalidResetCode => {
                ErrorCode::ValidationFailed
            }
            IdentityFailure::TooManyAttempts => ErrorCode::RateLimitExceeded,
            IdentityFailure::Unavailable(_) => ErrorCode::UpstreamUnavailable,
        }
    }

    /// 面向用户的提示
    pub fn user_message(&self) -> &'static str {
        match self {
            IdentityFailure::EmailExists => "An account with this email already exists",
            IdentityFailure::InvalidCredentials => "Invalid email or password",
            IdentityFailure::UserDisabled => "This account has been disabled",
            IdentityFailure::WeakPassword => "Password should be at least 6 characters",
            IdentityFailure::InvalidEmail => "Please enter a valid email address",
            IdentityFailure::InvalidResetCode => "The reset link is invalid or has expired",
            IdentityFailure::TooManyAttempts => "Too many attempts, please try again later",
            IdentityFailure::Unavailable(_) => {
                "Authentication service is unavailable, please try again later"
            }
        }
    }
}
