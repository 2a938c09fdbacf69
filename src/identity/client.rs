//! Firebase Auth REST 客户端

use reqwest::Response;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::debug;

use crate::config::FirebaseConfig;
use crate::errors::{Result, SchoolError};

#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

/// 登录/注册成功后返回的账号信息
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResult {
    pub local_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub id_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OobCodeRequest<'a> {
    request_type: &'static str,
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetPasswordRequest<'a> {
    oob_code: &'a str,
    new_password: &'a str,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

#[derive(Deserialize)]
struct Ignored {}

impl IdentityClient {
    pub fn new(config: &FirebaseConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SchoolError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: config.identity_endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    async fn call<B, T>(&self, action: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("Firebase Auth accounts:{}", action);
        let response = self
            .http
            .post(format!("{}/accounts:{action}", self.endpoint))
            .query(&[("key", &self.api_key)])
            .json(body)
            .send()
            .await
            .map_err(|e| SchoolError::identity_transport(format!("accounts:{action}: {e}")))?;

        Self::parse(response, action).await
    }

    async fn parse<T: DeserializeOwned>(response: Response, action: &str) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(|e| {
                SchoolError::serialization(format!("accounts:{action} response: {e}"))
            });
        }

        // Firebase 错误码放在 error.message 中
        let text = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorEnvelope>(&text) {
            Ok(envelope) if !envelope.error.message.is_empty() => {
                Err(SchoolError::identity(envelope.error.message))
            }
            _ => Err(SchoolError::identity_transport(format!(
                "accounts:{action}: HTTP {status}"
            ))),
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignInResult> {
        self.call(
            "signInWithPassword",
            &PasswordRequest {
                email,
                password,
                return_secure_token: true,
            },
        )
        .await
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignInResult> {
        self.call(
            "signUp",
            &PasswordRequest {
                email,
                password,
                return_secure_token: true,
            },
        )
        .await
    }

    pub async fn send_password_reset(&self, email: &str) -> Result<()> {
        let _: Ignored = self
            .call(
                "sendOobCode",
                &OobCodeRequest {
                    request_type: "PASSWORD_RESET",
                    email,
                },
            )
            .await?;
        Ok(())
    }

    pub async fn reset_password(&self, oob_code: &str, new_password: &str) -> Result<()> {
        let _: Ignored = self
            .call(
                "resetPassword",
                &ResetPasswordRequest {
                    oob_code,
                    new_password,
                },
            )
            .await?;
        Ok(())
    }
}
