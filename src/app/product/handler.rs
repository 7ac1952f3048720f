//! 产品处理器

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::info;

use super::{
    model::{Product, ProductFilter},
    pagination::Pagination,
    validation::ValidatedProduct,
};
use crate::app::AppState;
use crate::core::{
    error::AppError,
    response::{ListResponse, MessageResponse},
};

/// 列表查询参数，分页参数先按字符串接收再自行解析
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<ListResponse<Product>>, AppError> {
    let Query(query) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    let pagination = Pagination::from_query(query.page.as_deref(), query.limit.as_deref())?;
    let filter = ProductFilter::new(query.category, query.search);

    let matched = state.store.read().await.list(&filter);
    let total = matched.len();

    Ok(Json(ListResponse {
        page: pagination.page,
        limit: pagination.limit,
        total,
        results: pagination.apply(matched),
    }))
}

pub async fn product_stats(State(state): State<AppState>) -> Json<HashMap<String, usize>> {
    Json(state.store.read().await.statistics())
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    let product = state.store.read().await.get(&id)?;
    Ok(Json(product))
}

pub async fn create_product(
    State(state): State<AppState>,
    ValidatedProduct(input): ValidatedProduct,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = state.store.write().await.append(input);
    info!("创建产品 {}", product.id);
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedProduct(input): ValidatedProduct,
) -> Result<Json<Product>, AppError> {
    let product = state.store.write().await.replace(&id, input)?;
    info!("更新产品 {}", product.id);
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state.store.write().await.remove(&id)?;
    info!("删除产品 {}", id);
    Ok(Json(MessageResponse::new(format!("Product {} deleted", id))))
}
