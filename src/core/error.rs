//! 核心错误处理模块
//!
//! 所有处理器和提取器都返回 [`AppError`]，由 `into_response` 统一转换成
//! `{"error": ..., "message": ...}` 结构和对应的状态码。

use axum::{
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::any::Any;
use tracing::{error, warn};

/// 核心错误类型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    #[error("Provide the API key in the x-api-key header")]
    MissingApiKey,

    #[error("The supplied x-api-key is not valid")]
    InvalidApiKey,

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Route {method} {path} not found")]
    RouteNotFound { method: String, path: String },

    #[error("{0}")]
    Internal(String),
}

/// 错误响应结构
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl AppError {
    pub fn product_not_found(id: &str) -> Self {
        AppError::NotFound(format!("Product with id {} not found", id))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingApiKey => StatusCode::UNAUTHORIZED,
            AppError::InvalidApiKey => StatusCode::FORBIDDEN,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) | AppError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 响应体中的 `error` 字段
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::MissingApiKey => "API key missing",
            AppError::InvalidApiKey => "Invalid API key",
            AppError::Validation(_) => "ValidationError",
            AppError::NotFound(_) | AppError::RouteNotFound { .. } => "NotFoundError",
            AppError::Internal(_) => "ServerError",
        }
    }

    /// 返回给客户端的消息，服务端错误不暴露内部细节
    pub fn public_message(&self) -> String {
        match self {
            AppError::Internal(_) => "Internal Server Error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(kind = self.kind(), "{}", self);
        } else {
            warn!(kind = self.kind(), "{}", self);
        }

        let body = ErrorResponse {
            error: self.kind().to_string(),
            message: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// `CatchPanicLayer` 的回调，把处理器中的 panic 渲染成 500
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}

/// 未匹配任何路由时的兜底处理器
pub async fn route_not_found(method: Method, uri: Uri) -> AppError {
    AppError::RouteNotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}
