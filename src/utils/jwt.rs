use crate::config::AppConfig;
use crate::models::users::entities::{CurrentUser, UserRole};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

// JWT Claims 结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,   // Firebase UID
    pub role: String,  // 用户角色
    pub email: String, // 登录邮箱
    pub exp: usize,    // Expiration time (时间戳)
    pub iat: usize,    // Issued at (签发时间)
}

impl Claims {
    /// 角色无法识别时返回 None，调用方按未认证处理
    pub fn current_user(&self) -> Option<CurrentUser> {
        let role = self.role.parse::<UserRole>().ok()?;
        Some(CurrentUser {
            uid: self.sub.clone(),
            email: self.email.clone(),
            role,
        })
    }
}

pub struct JwtUtils;

impl JwtUtils {
    // 获取 JWT 密钥
    fn get_secret() -> String {
        AppConfig::get().jwt.secret.clone()
    }

    /// Access Token 有效期（秒）
    pub fn access_token_ttl() -> i64 {
        AppConfig::get().jwt.access_token_expiry * 60
    }

    // 生成 Access Token
    pub fn generate_access_token(user: &CurrentUser) -> Result<String, jsonwebtoken::errors::Error> {
        let config = AppConfig::get();
        Self::encode_with_secret(
            user,
            &Self::get_secret(),
            chrono::Duration::minutes(config.jwt.access_token_expiry),
        )
    }

    pub fn encode_with_secret(
        user: &CurrentUser,
        secret: &str,
        expiry_duration: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + expiry_duration;

        let claims = Claims {
            sub: user.uid.clone(),
            role: user.role.as_str().to_string(),
            email: user.email.clone(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
    }

    // 验证 Access Token
    pub fn verify_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        Self::decode_with_secret(token, &Self::get_secret())
    }

    pub fn decode_with_secret(
        token: &str,
        secret: &str,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        decode::<Claims>(token, &decoding_key, &Validation::default())
            .map(|token_data| token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teacher() -> CurrentUser {
        CurrentUser {
            uid: "uid-42".to_string(),
            email: "tom@school.test".to_string(),
            role: UserRole::Teacher,
        }
    }

    #[test]
    fn test_token_carries_identity() {
        let token =
            JwtUtils::encode_with_secret(&teacher(), "s3cret", chrono::Duration::minutes(5))
                .unwrap();
        let claims = JwtUtils::decode_with_secret(&token, "s3cret").unwrap();
        assert_eq!(claims.current_user(), Some(teacher()));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token =
            JwtUtils::encode_with_secret(&teacher(), "s3cret", chrono::Duration::minutes(5))
                .unwrap();
        assert!(JwtUtils::decode_with_secret(&token, "other").is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let token =
            JwtUtils::encode_with_secret(&teacher(), "s3cret", chrono::Duration::minutes(-10))
                .unwrap();
        assert!(JwtUtils::decode_with_secret(&token, "s3cret").is_err());
    }

    #[test]
    fn test_unknown_role_has_no_identity() {
        let claims = Claims {
            sub: "x".into(),
            role: "principal".into(),
            email: String::new(),
            exp: 0,
            iat: 0,
        };
        assert!(claims.current_user().is_none());
    }
}
