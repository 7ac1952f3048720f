//! 列表分页

use crate::core::error::AppError;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// 缺省或空字符串取默认值，其余必须是正整数
fn parse_positive(name: &str, raw: Option<&str>, default: usize) -> Result<usize, AppError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(default),
        Some(raw) => raw,
    };

    match raw.parse::<usize>() {
        Ok(value) if value >= 1 => Ok(value),
        _ => Err(AppError::Validation(format!(
            "{} must be a positive integer",
            name
        ))),
    }
}

impl Pagination {
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Result<Self, AppError> {
        Ok(Self {
            page: parse_positive("page", page, DEFAULT_PAGE)?,
            limit: parse_positive("limit", limit, DEFAULT_LIMIT)?,
        })
    }

    pub fn start(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// 取出 `[start, start + limit)`，越界部分自然截断
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.start())
            .take(self.limit)
            .collect()
    }
}
