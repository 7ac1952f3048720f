//! 产品请求体校验
//!
//! 任何问题（不是 JSON、缺字段、类型不对、空字符串）都归并成同一个
//! `ValidationError`，不返回字段级别的细节。

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde_json::Value;
use tracing::debug;
use validator::Validate;

use super::model::ProductInput;
use crate::core::error::AppError;

pub const PRODUCT_SHAPE_MESSAGE: &str = "Product must include name (string), description (string), \
price (number), category (string) and inStock (boolean); string fields must not be empty";

fn invalid_product() -> AppError {
    AppError::Validation(PRODUCT_SHAPE_MESSAGE.to_string())
}

/// 校验一个已解析的 JSON 值是否满足产品字段要求
pub fn validate_product(value: Value) -> Result<ProductInput, AppError> {
    let input: ProductInput = serde_json::from_value(value).map_err(|e| {
        debug!("产品字段解析失败: {}", e);
        invalid_product()
    })?;

    input.validate().map_err(|e| {
        debug!("产品字段校验失败: {}", e);
        invalid_product()
    })?;

    Ok(input)
}

/// 通过校验的产品请求体
#[derive(Debug)]
pub struct ValidatedProduct(pub ProductInput);

#[async_trait]
impl<S> FromRequest<S> for ValidatedProduct
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| {
                debug!("请求体不是有效的 JSON: {}", rejection);
                invalid_product()
            })?;

        validate_product(value).map(ValidatedProduct)
    }
}
