//! 配置
//!
//! 支持代码构建和 TOML 文件加载，缺省字段使用默认值

use std::path::Path;

use serde::Deserialize;

use crate::error::RatResult;
use crate::utils::addr::ListenAddress;

/// ETag 配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EtagConfig {
    /// 是否启用 ETag
    pub enabled: bool,
    /// 是否生成弱标签
    pub weak: bool,
}

impl Default for EtagConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            weak: false,
        }
    }
}

impl EtagConfig {
    /// 创建新的 ETag 配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 启用 ETag
    pub fn enable(mut self) -> Self {
        self.enabled = true;
        self
    }

    /// 禁用 ETag
    pub fn disable(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// 设置是否使用弱标签
    pub fn weak(mut self, weak: bool) -> Self {
        self.weak = weak;
        self
    }
}

/// 顶层配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WebkitConfig {
    /// 监听地址，`host:port` 或 unix socket 路径
    pub listen: String,
    /// ETag 配置
    pub etag: EtagConfig,
}

impl Default for WebkitConfig {
    fn default() -> Self {
        Self {
            listen: ":3000".to_string(),
            etag: EtagConfig::default(),
        }
    }
}

impl WebkitConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置监听地址
    pub fn listen(mut self, addr: impl Into<String>) -> Self {
        self.listen = addr.into();
        self
    }

    /// 设置 ETag 配置
    pub fn etag(mut self, etag: EtagConfig) -> Self {
        self.etag = etag;
        self
    }

    /// 从 TOML 文本加载
    pub fn from_toml_str(content: &str) -> RatResult<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// 从 TOML 文件加载
    pub fn from_file(path: impl AsRef<Path>) -> RatResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 解析监听地址
    pub fn listen_address(&self) -> RatResult<ListenAddress> {
        ListenAddress::parse(&self.listen)
    }
}
