//! 监听地址解析
//!
//! 识别 IPv6 字面量、拆分 host:port，以及区分 TCP 地址与 unix socket 路径

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV6};
use std::path::PathBuf;

use crate::error::{RatError, RatResult};
use crate::utils::logger::debug;

/// 判断地址是否为 IPv6 字面量
///
/// 支持裸地址（可带 `::` 缩写、`%zone`、内嵌 IPv4 尾部、`:port`）
/// 以及 `[...]` 括号形式。只判断形态，不校验端口。
pub fn is_ipv6(address: &str) -> bool {
    if let Some(rest) = address.strip_prefix('[') {
        return match rest.find(']') {
            Some(end) => looks_like_ipv6(&rest[..end]),
            None => false,
        };
    }
    looks_like_ipv6(address)
}

fn looks_like_ipv6(literal: &str) -> bool {
    // zone 索引内容任意，只检查 % 之前的部分
    let literal = match literal.find('%') {
        Some(idx) => &literal[..idx],
        None => literal,
    };

    let colons = literal.bytes().filter(|b| *b == b':').count();
    colons >= 2
        && literal
            .bytes()
            .all(|b| b.is_ascii_hexdigit() || b == b':' || b == b'.')
}

/// 拆分地址为 (host, port)
///
/// 只有最后一个冒号之后是合法端口号时才拆分，括号保留在 host 中；
/// 否则视为 unix socket 路径，原样返回且端口为空。
///
/// 未加括号的 IPv6 地址最后一段会被当作端口，带端口的 IPv6 地址应写成 `[host]:port`。
pub fn parse_addr(raw: &str) -> (&str, &str) {
    if let Some(idx) = raw.rfind(':') {
        let port = &raw[idx + 1..];
        if is_valid_port(port) {
            return (&raw[..idx], port);
        }
    }
    (raw, "")
}

fn is_valid_port(port: &str) -> bool {
    !port.is_empty()
        && port.len() <= 5
        && port.bytes().all(|b| b.is_ascii_digit())
        && port.parse::<u16>().is_ok()
}

/// 监听网络类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Tcp4,
    Tcp6,
    Unix,
}

impl Network {
    /// 网络名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Tcp4 => "tcp4",
            Self::Tcp6 => "tcp6",
            Self::Unix => "unix",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 未加括号且整体就是一个 IPv6 地址（可带 zone）
///
/// 这类输入的最后一段无法和端口区分，作为监听地址时必须写成 `[host]:port`。
fn is_bare_ipv6(addr: &str) -> bool {
    let literal = match addr.find('%') {
        Some(idx) => &addr[..idx],
        None => addr,
    };
    literal.parse::<Ipv6Addr>().is_ok()
}

/// 根据地址形态推断监听网络
///
/// 裸 IPv6 地址为 `Tcp6`；其余输入没有端口时为 `Unix`，有端口时按是否 IPv6 区分。
pub fn detect_network(addr: &str) -> Network {
    if is_bare_ipv6(addr) {
        return Network::Tcp6;
    }
    let (_, port) = parse_addr(addr);
    if port.is_empty() {
        Network::Unix
    } else if is_ipv6(addr) {
        Network::Tcp6
    } else {
        Network::Tcp4
    }
}

/// 解析后的监听地址
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenAddress {
    /// TCP 地址
    Tcp(SocketAddr),
    /// unix socket 路径
    Unix(PathBuf),
}

impl ListenAddress {
    /// 解析监听地址
    ///
    /// host 为空时绑定全部网卡；host 只接受 IP 字面量或 `localhost`，不做 DNS 解析。
    /// 未加括号的 IPv6 地址被拒绝，解析成功时网络类型与 [`detect_network`] 一致。
    pub fn parse(addr: &str) -> RatResult<Self> {
        if addr.is_empty() {
            return Err(RatError::InvalidArgument("监听地址为空".to_string()));
        }
        if is_bare_ipv6(addr) {
            return Err(RatError::InvalidArgument(format!(
                "IPv6 地址需写成 [host]:port: {}",
                addr
            )));
        }

        let (host, port) = parse_addr(addr);
        if port.is_empty() {
            debug!("地址 {} 不含端口，按 unix socket 路径处理", addr);
            return Ok(Self::Unix(PathBuf::from(addr)));
        }

        let port: u16 = port
            .parse()
            .map_err(|e| RatError::InvalidArgument(format!("无效端口 {}: {}", port, e)))?;

        let bracketed = host.starts_with('[') && host.ends_with(']');
        let host = if bracketed { &host[1..host.len() - 1] } else { host };

        if host.is_empty() {
            return Ok(Self::Tcp(SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port)));
        }
        if host.eq_ignore_ascii_case("localhost") {
            return Ok(Self::Tcp(SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), port)));
        }

        let (ip_part, zone) = match host.find('%') {
            Some(idx) => (&host[..idx], Some(&host[idx + 1..])),
            None => (host, None),
        };

        let ip: IpAddr = ip_part
            .parse()
            .map_err(|e| RatError::InvalidArgument(format!("无效主机地址 {}: {}", host, e)))?;

        match (ip, zone) {
            (IpAddr::V6(v6), Some(zone)) => {
                let scope_id = zone
                    .parse::<u32>()
                    .map_err(|_| RatError::InvalidArgument(format!("不支持的 zone 索引: {}", zone)))?;
                Ok(Self::Tcp(SocketAddr::V6(SocketAddrV6::new(v6, port, 0, scope_id))))
            }
            (IpAddr::V4(_), Some(zone)) => Err(RatError::InvalidArgument(format!(
                "IPv4 地址不能携带 zone 索引: {}",
                zone
            ))),
            (ip, None) => Ok(Self::Tcp(SocketAddr::new(ip, port))),
        }
    }

    /// 监听网络类型
    pub fn network(&self) -> Network {
        match self {
            Self::Tcp(SocketAddr::V4(_)) => Network::Tcp4,
            Self::Tcp(SocketAddr::V6(_)) => Network::Tcp6,
            Self::Unix(_) => Network::Unix,
        }
    }

    /// 绑定全部 IPv6 网卡的地址
    pub fn ipv6_any(port: u16) -> Self {
        Self::Tcp(SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), port))
    }
}

impl fmt::Display for ListenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp(addr) => write!(f, "{}", addr),
            Self::Unix(path) => write!(f, "{}", path.display()),
        }
    }
}
