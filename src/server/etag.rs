//! ETag 生成与条件请求匹配
//!
//! 标签格式为 `"<长度>-<CRC32>"`，弱标签加 `W/` 前缀。两个数字都是十进制，
//! CRC32 使用反射多项式 0xD5828281，同样的响应体总是得到同样的标签。

use std::fmt;

use crc::{Algorithm, Crc};
use hyper::header::{HeaderValue, ETAG, IF_NONE_MATCH};
use hyper::StatusCode;

use super::config::EtagConfig;
use super::exchange::HttpExchange;
use crate::utils::logger::{debug, warn};

/// 反射多项式 0xD5828281 对应的 CRC-32 参数
const ETAG_CRC_ALGORITHM: Algorithm<u32> = Algorithm {
    width: 32,
    poly: 0x8141_41ab,
    init: 0xffff_ffff,
    refin: true,
    refout: true,
    xorout: 0xffff_ffff,
    check: 0xa9cc_8179,
    residue: 0x4ac2_a509,
};

static ETAG_CRC: Crc<u32> = Crc::<u32>::new(&ETAG_CRC_ALGORITHM);

/// 计算响应体校验值
pub fn checksum(data: &[u8]) -> u32 {
    ETAG_CRC.checksum(data)
}

/// 实体标签
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityTag {
    /// 是否为弱标签
    pub weak: bool,
    /// 引号内的不透明部分
    tag: String,
}

impl EntityTag {
    pub fn new(weak: bool, tag: impl Into<String>) -> Self {
        Self { weak, tag: tag.into() }
    }

    pub fn strong(tag: impl Into<String>) -> Self {
        Self::new(false, tag)
    }

    pub fn weak(tag: impl Into<String>) -> Self {
        Self::new(true, tag)
    }

    /// 根据响应体计算标签
    pub fn from_body(body: &[u8], weak: bool) -> Self {
        Self::new(weak, format!("{}-{}", body.len(), checksum(body)))
    }

    /// 解析 `"xyz"` 或 `W/"xyz"`，格式不合法时返回 None
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (weak, quoted) = match raw.strip_prefix("W/") {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let inner = quoted.strip_prefix('"')?.strip_suffix('"')?;
        if inner.contains('"') {
            return None;
        }
        Some(Self::new(weak, inner))
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// 强比较：双方都是强标签且内容相同
    pub fn strong_eq(&self, other: &EntityTag) -> bool {
        !self.weak && !other.weak && self.tag == other.tag
    }

    /// 弱比较：忽略 `W/` 前缀，只比较内容
    pub fn weak_eq(&self, other: &EntityTag) -> bool {
        self.tag == other.tag
    }

    pub fn to_header_value(&self) -> Result<HeaderValue, hyper::header::InvalidHeaderValue> {
        HeaderValue::from_str(&self.to_string())
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.weak {
            write!(f, "W/\"{}\"", self.tag)
        } else {
            write!(f, "\"{}\"", self.tag)
        }
    }
}

/// 计算响应体的 ETag
pub fn compute_etag(body: &[u8], weak: bool) -> EntityTag {
    EntityTag::from_body(body, weak)
}

/// 按逗号拆分 If-None-Match，引号内的逗号不拆分
fn split_tag_list(header: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (idx, ch) in header.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                items.push(header[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    items.push(header[start..].trim());

    items.into_iter().filter(|item| !item.is_empty()).collect()
}

/// 判断 If-None-Match 是否命中当前标签
///
/// 完全相同即命中；任一方为弱标签时，去掉 `W/` 后内容相同也命中；`*` 匹配任意标签。
pub fn if_none_match_hit(header: &str, etag: &EntityTag) -> bool {
    let header = header.trim();
    if header == "*" {
        return true;
    }

    let rendered = etag.to_string();
    split_tag_list(header).into_iter().any(|candidate| {
        if candidate == rendered {
            return true;
        }
        match EntityTag::parse(candidate) {
            Some(client) => (client.weak || etag.weak) && client.weak_eq(etag),
            None => false,
        }
    })
}

/// 为响应设置 ETag 并处理条件请求
///
/// 只处理状态码 200 且响应体非空的响应。If-None-Match 命中时响应改为 304，
/// 移除 ETag 头并清空响应体；否则写入 ETag 头，状态码和响应体保持不变。
pub fn set_etag(exchange: &mut HttpExchange, weak: bool) {
    if exchange.status() != StatusCode::OK {
        return;
    }
    if exchange.body().is_empty() {
        return;
    }

    let etag = EntityTag::from_body(exchange.body(), weak);

    let hit = exchange
        .request_header(IF_NONE_MATCH)
        .map_or(false, |client| if_none_match_hit(client, &etag));

    if hit {
        debug!("ETag {} 命中 If-None-Match，返回 304", etag);
        exchange.set_status(StatusCode::NOT_MODIFIED);
        exchange.headers_mut().remove(ETAG);
        exchange.reset_body();
        return;
    }

    match etag.to_header_value() {
        Ok(value) => {
            exchange.set_header(ETAG, value);
        }
        Err(e) => warn!("ETag {} 无法写入响应头: {}", etag, e),
    }
}

/// 按配置应用 ETag，未启用时不做任何处理
pub fn apply_etag(exchange: &mut HttpExchange, config: &EtagConfig) {
    if config.enabled {
        set_etag(exchange, config.weak);
    }
}
