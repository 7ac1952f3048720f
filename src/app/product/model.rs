//! 产品数据模型

use serde::{Deserialize, Serialize};
use serde_json::Number;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    /// 保留提交时的数字形式（整数或小数）
    pub price: Number,
    pub category: String,
    pub in_stock: bool,
}

/// 创建和整体更新时提交的产品字段（不含 id）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    pub price: Number,
    #[validate(length(min = 1))]
    pub category: String,
    pub in_stock: bool,
}

impl Product {
    pub fn from_input(id: String, input: ProductInput) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            in_stock: input.in_stock,
        }
    }

    /// 用新字段覆盖除 id 之外的全部内容
    pub fn overwrite(&mut self, input: ProductInput) {
        self.name = input.name;
        self.description = input.description;
        self.price = input.price;
        self.category = input.category;
        self.in_stock = input.in_stock;
    }
}

/// 列表过滤条件
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// 分类，忽略大小写的精确匹配
    pub category: Option<String>,
    /// 名称关键字，忽略大小写的子串匹配
    pub search: Option<String>,
}

impl ProductFilter {
    pub fn new(category: Option<String>, search: Option<String>) -> Self {
        Self {
            category: category.map(|c| c.to_lowercase()),
            search: search.map(|s| s.to_lowercase()),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .map_or(true, |c| product.category.to_lowercase() == c);
        let search_ok = self
            .search
            .as_deref()
            .map_or(true, |s| product.name.to_lowercase().contains(s));

        category_ok && search_ok
    }
}
