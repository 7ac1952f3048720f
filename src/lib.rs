//! # Product API
//!
//! 基于 Axum 的产品 CRUD 服务，数据只保存在进程内存中。
//!
//! - `app`：产品模型、校验、存储和处理器
//! - `core`：统一错误映射、认证与日志中间件、响应结构
//! - `infrastructure`：配置加载和日志初始化

pub mod app;
pub mod core;
pub mod infrastructure;

use axum::{middleware, Router};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::app::{product::store::ProductStore, AppState};
use crate::core::{
    error::{panic_response, route_not_found},
    middleware::{auth_middleware, request_logging_middleware, ApiKey},
};

/// 组装完整的应用
///
/// 中间件由外到内：HTTP trace → 请求日志 → 认证 → panic 捕获 → 路由。
pub fn create_app(store: ProductStore, api_key: ApiKey) -> Router {
    app::routes()
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logging_middleware))
                .layer(middleware::from_fn_with_state(api_key, auth_middleware))
                .layer(CatchPanicLayer::custom(panic_response)),
        )
        .with_state(AppState::new(store))
}
