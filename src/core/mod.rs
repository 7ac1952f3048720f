//! 核心层：错误映射、中间件和通用响应结构

pub mod error;
pub mod middleware;
pub mod response;
