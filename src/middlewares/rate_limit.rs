//! 请求频率限制
//!
//! 固定窗口计数：窗口从某个键的第一次请求开始，到期后计数清零。
//! 已认证请求按 `商户:用户` 计数，匿名请求按客户端 IP 计数。
//!
//! ```rust,ignore
//! web::resource("/login")
//!     .wrap(RateLimit::login())
//!     .route(web::post().to(login));
//! ```

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{HeaderName, HeaderValue, RETRY_AFTER},
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::Duration;
use tracing::warn;

use super::create_error_response;
use crate::models::ErrorCode;
use crate::models::users::User;

// 空闲一小时的键直接淘汰，须长于任何窗口
static RATE_WINDOWS: Lazy<Cache<String, RateWindow>> = Lazy::new(|| {
    Cache::builder()
        .time_to_idle(Duration::from_secs(3600))
        .max_capacity(100_000)
        .build()
});

const LIMIT_HEADER: &str = "x-ratelimit-limit";
const REMAINING_HEADER: &str = "x-ratelimit-remaining";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RateWindow {
    /// 窗口起点（Unix 秒）
    started_at: i64,
    count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Admission {
    Allowed { remaining: u32 },
    Rejected { retry_after: u64 },
}

/// 计算一次请求后的窗口状态；被拒绝的请求不计数
fn admit(
    current: Option<RateWindow>,
    now: i64,
    max_requests: u32,
    window_secs: u64,
) -> (RateWindow, Admission) {
    let window_len = window_secs as i64;
    let window = match current {
        Some(w) if now - w.started_at < window_len => w,
        _ => RateWindow {
            started_at: now,
            count: 0,
        },
    };

    if window.count >= max_requests {
        let retry_after = (window.started_at + window_len - now).max(1) as u64;
        return (window, Admission::Rejected { retry_after });
    }

    let next = RateWindow {
        count: window.count + 1,
        ..window
    };
    (
        next,
        Admission::Allowed {
            remaining: max_requests - next.count,
        },
    )
}

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window_secs: u64,
    /// 区分不同端点的计数
    key_prefix: String,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs,
            key_prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.key_prefix = prefix.to_string();
        self
    }

    /// 5 次/分钟/IP
    pub fn login() -> Self {
        Self::new(5, 60).with_prefix("login")
    }

    /// 注册会新建商户，3 次/小时/IP
    pub fn register() -> Self {
        Self::new(3, 3600).with_prefix("register")
    }

    pub fn refresh_token() -> Self {
        Self::new(10, 60).with_prefix("refresh")
    }

    /// 学员导入较重，5 次/分钟/用户
    pub fn student_import() -> Self {
        Self::new(5, 60).with_prefix("import")
    }
}

/// 计数键：已认证用户优先，其次是客户端 IP
fn limit_key(prefix: &str, req: &ServiceRequest) -> String {
    let identity = match req.extensions().get::<User>() {
        Some(user) => format!("b{}:u{}", user.business_id, user.id),
        None => req
            .connection_info()
            .realip_remote_addr()
            .and_then(|addr| addr.trim().parse::<IpAddr>().ok())
            .map(|ip| format!("ip:{ip}"))
            .unwrap_or_else(|| "ip:unknown".to_string()),
    };
    format!("{prefix}:{identity}")
}

fn rejected_response(retry_after: u64) -> HttpResponse {
    let mut resp = create_error_response(
        StatusCode::TOO_MANY_REQUESTS,
        ErrorCode::RateLimitExceeded,
        "Too many requests, please retry later",
    );
    resp.headers_mut()
        .insert(RETRY_AFTER, HeaderValue::from(retry_after));
    resp.headers_mut().insert(
        HeaderName::from_static(REMAINING_HEADER),
        HeaderValue::from(0u32),
    );
    resp
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
            let key = limit_key(&limit.key_prefix, &req);
            let now = chrono::Utc::now().timestamp();

            // 读取与更新在同一个条目锁内完成
            let mut admission = Admission::Allowed {
                remaining: limit.max_requests,
            };
            RATE_WINDOWS
                .entry(key.clone())
                .and_upsert_with(|entry| {
                    let (window, verdict) = admit(
                        entry.map(|e| e.into_value()),
                        now,
                        limit.max_requests,
                        limit.window_secs,
                    );
                    admission = verdict;
                    ready(window)
                })
                .await;

            match admission {
                Admission::Rejected { retry_after } => {
                    warn!(
                        "Rate limit exceeded for {} ({} per {}s)",
                        key, limit.max_requests, limit.window_secs
                    );
                    Ok(req.into_response(rejected_response(retry_after).map_into_right_body()))
                }
                Admission::Allowed { remaining } => {
                    let mut res = srv.call(req).await?;
                    let headers = res.headers_mut();
                    headers.insert(
                        HeaderName::from_static(LIMIT_HEADER),
                        HeaderValue::from(limit.max_requests),
                    );
                    headers.insert(
                        HeaderName::from_static(REMAINING_HEADER),
                        HeaderValue::from(remaining),
                    );
                    Ok(res.map_into_left_body())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test, web};

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[::core::prelude::v1::test]
    fn test_window_counts_then_rejects() {
        let (w1, a1) = admit(None, 100, 2, 60);
        assert_eq!(a1, Admission::Allowed { remaining: 1 });
        let (w2, a2) = admit(Some(w1), 110, 2, 60);
        assert_eq!(a2, Admission::Allowed { remaining: 0 });
        let (w3, a3) = admit(Some(w2), 130, 2, 60);
        assert_eq!(a3, Admission::Rejected { retry_after: 30 });
        // 被拒绝的请求不延长窗口
        assert_eq!(w3, w2);
    }

    #[::core::prelude::v1::test]
    fn test_window_resets_after_expiry() {
        let full = RateWindow {
            started_at: 100,
            count: 5,
        };
        assert!(matches!(
            admit(Some(full), 159, 5, 60).1,
            Admission::Rejected { retry_after: 1 }
        ));
        let (window, admission) = admit(Some(full), 160, 5, 60);
        assert_eq!(admission, Admission::Allowed { remaining: 4 });
        assert_eq!(window.started_at, 160);
        assert_eq!(window.count, 1);
    }

    #[::core::prelude::v1::test]
    fn test_presets() {
        let register = RateLimit::register();
        assert_eq!(register.max_requests, 3);
        assert_eq!(register.window_secs, 3600);
        assert_eq!(RateLimit::student_import().key_prefix, "import");
    }

    #[actix_web::test]
    async fn test_middleware_returns_429_with_retry_after() {
        let app = test::init_service(
            App::new().service(
                web::resource("/limited")
                    .wrap(RateLimit::new(2, 60).with_prefix("limited-route"))
                    .route(web::get().to(ok)),
            ),
        )
        .await;

        for expected_remaining in ["1", "0"] {
            let resp =
                test::call_service(&app, test::TestRequest::get().uri("/limited").to_request())
                    .await;
            assert_eq!(resp.status(), StatusCode::OK);
            assert_eq!(
                resp.headers().get(REMAINING_HEADER).unwrap(),
                expected_remaining
            );
        }

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/limited").to_request()).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(resp.headers().contains_key(RETRY_AFTER));
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "rate_limit_exceeded");
    }
}
