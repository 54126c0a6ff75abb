//! 错误类型定义

use thiserror::Error;

/// RatWebkit 错误类型
#[derive(Debug, Error)]
pub enum RatError {
    /// 参数无效
    #[error("无效参数: {0}")]
    InvalidArgument(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// IO 错误
    #[error("IO错误: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<toml::de::Error> for RatError {
    fn from(err: toml::de::Error) -> Self {
        RatError::ConfigError(err.to_string())
    }
}

/// 统一结果类型
pub type RatResult<T> = Result<T, RatError>;
