//! 内存中的产品存储
//!
//! 保持插入顺序，所有查询都是线性扫描。并发访问由外层的 `RwLock` 负责。

use serde_json::Number;
use std::collections::HashMap;
use uuid::Uuid;

use super::model::{Product, ProductFilter, ProductInput};
use crate::core::error::AppError;

#[derive(Debug, Default)]
pub struct ProductStore {
    products: Vec<Product>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 每次启动都会重新创建的三条示例数据
    pub fn seeded() -> Self {
        let seeds = [
            (
                "1",
                "Laptop",
                "High-performance laptop with 16GB RAM",
                1200,
                "electronics",
                true,
            ),
            (
                "2",
                "Smartphone",
                "Latest model with 128GB storage",
                800,
                "electronics",
                true,
            ),
            (
                "3",
                "Coffee Maker",
                "Programmable coffee maker with timer",
                50,
                "kitchen",
                false,
            ),
        ];

        let products = seeds
            .into_iter()
            .map(|(id, name, description, price, category, in_stock)| Product {
                id: id.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                price: Number::from(price),
                category: category.to_string(),
                in_stock,
            })
            .collect();

        Self { products }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }

    fn next_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }

    pub fn append(&mut self, input: ProductInput) -> Product {
        let product = Product::from_input(self.next_id(), input);
        self.products.push(product.clone());
        product
    }

    pub fn get(&self, id: &str) -> Result<Product, AppError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::product_not_found(id))
    }

    pub fn replace(&mut self, id: &str, input: ProductInput) -> Result<Product, AppError> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::product_not_found(id))?;

        product.overwrite(input);
        Ok(product.clone())
    }

    pub fn remove(&mut self, id: &str) -> Result<(), AppError> {
        let index = self
            .position(id)
            .ok_or_else(|| AppError::product_not_found(id))?;

        self.products.remove(index);
        Ok(())
    }

    pub fn list(&self, filter: &ProductFilter) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    /// 按小写分类统计数量
    pub fn statistics(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for product in &self.products {
            *counts.entry(product.category.to_lowercase()).or_insert(0) += 1;
        }
        counts
    }
}
