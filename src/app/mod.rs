//! 应用层：共享状态和路由表

pub mod product;

use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::core::error::route_not_found;
use product::{handler, store::ProductStore};

pub type SharedStore = Arc<RwLock<ProductStore>>;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
}

impl AppState {
    pub fn new(store: ProductStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }
}

pub const WELCOME_MESSAGE: &str =
    "Welcome to the Product API! Go to /api/products to see all products.";

/// 根路径欢迎信息
pub async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

/// 产品路由，认证由外层中间件统一负责
///
/// 已知路径上的其他方法走 `route_not_found`，返回 JSON 404 而不是空的 405。
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/products",
            get(handler::list_products)
                .post(handler::create_product)
                .fallback(route_not_found),
        )
        .route(
            "/api/products/stats",
            get(handler::product_stats).fallback(route_not_found),
        )
        .route(
            "/api/products/:id",
            get(handler::get_product)
                .put(handler::update_product)
                .delete(handler::delete_product)
                .fallback(route_not_found),
        )
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome).fallback(route_not_found))
        .merge(product_routes())
}
