//! 核心中间件模块

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::{sync::Arc, time::Instant};
use subtle::ConstantTimeEq;
use tracing::{debug, info};

use super::error::AppError;

/// 携带 API key 的请求头
pub const API_KEY_HEADER: &str = "x-api-key";

/// 需要认证的路径前缀
pub const PROTECTED_PREFIX: &str = "/api/products";

/// 请求日志中间件
///
/// 位于认证之外，所以被拒绝的产品请求同样会记录；`key_supplied` 只记录是否带了
/// 密钥头，不记录密钥本身。
pub async fn request_logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let protected = is_protected(uri.path());
    let key_supplied = req.headers().contains_key(API_KEY_HEADER);

    let response = next.run(req).await;
    let status = response.status();

    info!(
        protected,
        key_supplied,
        latency_ms = start.elapsed().as_millis() as u64,
        "{} {} -> {}",
        method,
        uri,
        status.as_u16()
    );

    response
}

/// 配置中的共享密钥
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    pub fn check(&self, supplied: Option<&HeaderValue>) -> AuthOutcome {
        // 空值等同于没带；非 ASCII 的值按字节比较，只会是 Invalid
        let Some(value) = supplied.filter(|v| !v.is_empty()) else {
            return AuthOutcome::Missing;
        };

        if bool::from(value.as_bytes().ct_eq(self.0.as_bytes())) {
            AuthOutcome::Valid
        } else {
            AuthOutcome::Invalid
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Missing,
    Invalid,
    Valid,
}

fn is_protected(path: &str) -> bool {
    path == PROTECTED_PREFIX
        || path
            .strip_prefix(PROTECTED_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// 认证中间件
///
/// 挂载在整个应用上，只检查 `/api/products` 及其子路径。
pub async fn auth_middleware(
    State(key): State<ApiKey>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if is_protected(req.uri().path()) {
        match key.check(req.headers().get(API_KEY_HEADER)) {
            AuthOutcome::Missing => return Err(AppError::MissingApiKey),
            AuthOutcome::Invalid => return Err(AppError::InvalidApiKey),
            AuthOutcome::Valid => debug!("API key accepted for {}", req.uri().path()),
        }
    }

    Ok(next.run(req).await)
}
