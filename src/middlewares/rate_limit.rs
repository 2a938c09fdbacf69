/*!
 * 公开认证接口的限流中间件
 *
 * 固定窗口计数，按 `前缀:客户端IP` 计数，窗口从该键的第一次请求开始。
 * 超出限制返回 429，并在 `Retry-After` 中给出窗口剩余秒数。
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())
 *     .route(web::post().to(login))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{CONTENT_TYPE, RETRY_AFTER},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode};

/// 最长窗口，缓存条目超过这个时间一定已经失效
const MAX_WINDOW_SECS: u64 = 3600;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

// 键: 前缀:IP
static WINDOWS: Lazy<Cache<String, Window>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(MAX_WINDOW_SECS))
        .max_capacity(100_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    key_prefix: String,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs: window_secs.clamp(1, MAX_WINDOW_SECS),
            key_prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    /// 登录：5次/分钟/IP
    pub fn login() -> Self {
        Self::new(5, 60).with_prefix("login")
    }

    /// 注册：3次/分钟/IP
    pub fn register() -> Self {
        Self::new(3, 60).with_prefix("register")
    }

    /// 找回/重置密码：3次/10分钟/IP，防止邮件轰炸
    pub fn password_reset() -> Self {
        Self::new(3, 600).with_prefix("password_reset")
    }
}

/// 客户端 IP：连接信息优先，其次 X-Forwarded-For 的第一个地址
fn client_ip(req: &ServiceRequest) -> String {
    let parse = |s: &str| s.trim().parse::<IpAddr>().ok();

    if let Some(ip) = req.connection_info().realip_remote_addr().and_then(parse) {
        return ip.to_string();
    }
    req.headers()
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(parse)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// 计数加一，返回 (本窗口计数, 窗口剩余秒数)
async fn hit(key: String, window: Duration) -> (u32, u64) {
    let entry = WINDOWS
        .entry(key)
        .and_upsert_with(|existing| async move {
            let now = Instant::now();
            match existing.map(|e| e.into_value()) {
                Some(w) if now.duration_since(w.started) < window => Window {
                    started: w.started,
                    count: w.count.saturating_add(1),
                },
                _ => Window {
                    started: now,
                    count: 1,
                },
            }
        })
        .await;

    let current = entry.into_value();
    let remaining = window.saturating_sub(current.started.elapsed()).as_secs().max(1);
    (current.count, remaining)
}

fn too_many_requests(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header((RETRY_AFTER, retry_after.to_string()))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let limit = self.limit.clone();

        Box::pin(async move {
            let key = format!("{}:{}", limit.key_prefix, client_ip(&req));
            let (count, remaining) =
                hit(key.clone(), Duration::from_secs(limit.window_secs)).await;

            if count > limit.max_requests {
                warn!(
                    "Rate limit exceeded for {} ({}/{} in {}s window)",
                    key, count, limit.max_requests, limit.window_secs
                );
                return Ok(req.into_response(too_many_requests(remaining).map_into_right_body()));
            }

            let res = srv.call(req).await?.map_into_left_body();
            Ok(res)
        })
    }
}
