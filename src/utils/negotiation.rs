//! 内容协商
//!
//! 根据 Accept 系列请求头，从服务端可提供的候选中选出最合适的一项

use std::cmp::Ordering;

use hyper::header::{HeaderMap, HeaderName, ACCEPT, ACCEPT_CHARSET, ACCEPT_ENCODING, ACCEPT_LANGUAGE};

/// 扩展名对应的首选 MIME 类型，允许带前导 `.`
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    let ext = ext.trim_start_matches('.');
    if ext.is_empty() {
        return None;
    }
    new_mime_guess::from_ext(ext).first_raw()
}

/// 请求方声明的一项偏好
#[derive(Debug, Clone, PartialEq)]
struct AcceptSpec<'a> {
    value: &'a str,
    quality: f32,
}

/// 解析 Accept 风格的头部值，按 q 值降序排列，q=0 的项被丢弃
fn parse_accept(accept: &str) -> Vec<AcceptSpec<'_>> {
    let mut specs = Vec::new();

    for part in accept.split(',') {
        let mut pieces = part.split(';');
        let value = pieces.next().unwrap_or("").trim();
        if value.is_empty() {
            continue;
        }

        let mut quality = 1.0_f32;
        for param in pieces {
            let param = param.trim();
            if let Some(q) = param.strip_prefix("q=").or_else(|| param.strip_prefix("Q=")) {
                quality = q.trim().parse().unwrap_or(0.0);
            }
        }

        if quality > 0.0 {
            specs.push(AcceptSpec { value, quality });
        }
    }

    // sort_by 是稳定排序，同权重保持声明顺序
    specs.sort_by(|a, b| b.quality.partial_cmp(&a.quality).unwrap_or(Ordering::Equal));
    specs
}

fn offer_mime(offer: &str) -> &str {
    if offer.contains('/') {
        offer
    } else {
        mime_for_extension(offer).unwrap_or(offer)
    }
}

/// 从候选中选出满足请求偏好的第一项
///
/// - 没有候选时返回空串
/// - `accept` 为空时返回第一个候选
/// - `*` 或 `*/*` 匹配第一个候选，`type/*` 匹配同主类型的候选
/// - 其余情况按忽略大小写的完全相等匹配，扩展名形式的候选先映射为 MIME 类型
///
/// 都不匹配时返回空串。
pub fn get_offer<'a, S: AsRef<str>>(accept: &str, offers: &'a [S]) -> &'a str {
    let first = match offers.iter().map(|o| o.as_ref()).find(|o| !o.is_empty()) {
        Some(first) => first,
        None => return "",
    };

    if accept.trim().is_empty() {
        return first;
    }

    for spec in parse_accept(accept) {
        if spec.value == "*" || spec.value == "*/*" {
            return first;
        }

        if let Some(kind) = spec.value.strip_suffix("/*") {
            let found = offers.iter().map(|o| o.as_ref()).find(|offer| {
                offer_mime(offer)
                    .split_once('/')
                    .map_or(false, |(main, _)| main.eq_ignore_ascii_case(kind))
            });
            if let Some(offer) = found {
                return offer;
            }
            continue;
        }

        let found = offers.iter().map(|o| o.as_ref()).find(|offer| {
            !offer.is_empty()
                && (offer.eq_ignore_ascii_case(spec.value)
                    || offer_mime(offer).eq_ignore_ascii_case(spec.value))
        });
        if let Some(offer) = found {
            return offer;
        }
    }

    ""
}

fn header_str<'h>(headers: &'h HeaderMap, name: HeaderName) -> &'h str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}

/// 按 Accept 头选择内容类型
pub fn accepts<'a, S: AsRef<str>>(headers: &HeaderMap, offers: &'a [S]) -> &'a str {
    get_offer(header_str(headers, ACCEPT), offers)
}

/// 按 Accept-Charset 头选择字符集
pub fn accepts_charsets<'a, S: AsRef<str>>(headers: &HeaderMap, offers: &'a [S]) -> &'a str {
    get_offer(header_str(headers, ACCEPT_CHARSET), offers)
}

/// 按 Accept-Encoding 头选择编码
pub fn accepts_encodings<'a, S: AsRef<str>>(headers: &HeaderMap, offers: &'a [S]) -> &'a str {
    get_offer(header_str(headers, ACCEPT_ENCODING), offers)
}

/// 按 Accept-Language 头选择语言
pub fn accepts_languages<'a, S: AsRef<str>>(headers: &HeaderMap, offers: &'a [S]) -> &'a str {
    get_offer(header_str(headers, ACCEPT_LANGUAGE), offers)
}
