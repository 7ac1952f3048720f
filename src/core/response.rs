//! 核心响应处理模块

use serde::{Deserialize, Serialize};

/// 列表响应信封，携带分页信息
#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub results: Vec<T>,
}

/// 只包含一条消息的响应，例如删除确认
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
