//! 配置加载
//!
//! 顺序：`PRODUCT_API_CONFIG` 指定的文件 → `config.toml` / `config/config.toml`
//! → 内置默认值，最后用环境变量 `PORT`、`HOST`、`API_KEY`、`LOG_LEVEL` 覆盖。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "PRODUCT_API_CONFIG";

const CONFIG_PATHS: [&str; 2] = ["config.toml", "./config/config.toml"];

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 绑定地址
    pub host: String,
    /// 监听端口
    pub port: u16,
}

/// 认证配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// 与请求头 `x-api-key` 比较的共享密钥
    pub api_key: String,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误 {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("配置解析错误: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("环境变量 {name} 无效: {value}")]
    InvalidEnv { name: &'static str, value: String },
    #[error("配置验证错误: {0}")]
    Validation(String),
}

/// 配置的来源，启动时打印
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "配置文件 {}", path.display()),
            ConfigSource::Defaults => write!(f, "内置默认配置"),
        }
    }
}

impl Config {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::FileRead {
            path: path.as_ref().to_path_buf(),
            source,
        })?;

        Ok(toml::from_str(&content)?)
    }

    /// 用环境变量覆盖配置，`lookup` 通常是 `std::env::var(..).ok()`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(api_key) = lookup("API_KEY") {
            self.auth.api_key = api_key;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level.to_lowercase();
        }
        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("端口必须大于0".to_string()));
        }
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }
        if self.auth.api_key.is_empty() {
            return Err(ConfigError::Validation(
                "未配置 API key，请设置 auth.api_key 或环境变量 API_KEY".to_string(),
            ));
        }
        if !VALID_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, VALID_LEVELS
            )));
        }
        Ok(())
    }
}

/// 从文件或默认值加载配置，应用环境变量覆盖并验证
pub fn load_config() -> Result<(Config, ConfigSource), ConfigError> {
    let explicit = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
    load_config_with(explicit, |name| std::env::var(name).ok())
}

pub fn load_config_with<F>(
    explicit: Option<PathBuf>,
    lookup: F,
) -> Result<(Config, ConfigSource), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let found = explicit.or_else(|| {
        CONFIG_PATHS
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    });

    let (mut config, source) = match found {
        Some(path) => (Config::load_from_file(&path)?, ConfigSource::File(path)),
        None => (Config::default(), ConfigSource::Defaults),
    };

    config.apply_overrides(lookup)?;
    config.validate()?;

    Ok((config, source))
}
