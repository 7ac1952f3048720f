//! 产品模块：模型、校验、存储、分页和处理器

pub mod handler;
pub mod model;
pub mod pagination;
pub mod store;
pub mod validation;
