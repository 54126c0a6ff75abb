//! 网络连接能力抽象

use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::time::Instant;

use tokio::io::{AsyncRead, AsyncWrite};

use super::addr::ListenAddress;

/// 网络地址
pub trait NetAddr: fmt::Display + Send + Sync {
    /// 网络名称，例如 "tcp"、"unix"
    fn network(&self) -> &str;
}

impl NetAddr for SocketAddr {
    fn network(&self) -> &str {
        "tcp"
    }
}

impl NetAddr for ListenAddress {
    fn network(&self) -> &str {
        ListenAddress::network(self).name()
    }
}

/// 网络连接
///
/// 在异步读写之上补充地址信息和截止时间设置，`None` 表示取消截止时间。
pub trait Conn: AsyncRead + AsyncWrite + Unpin + Send {
    fn local_addr(&self) -> Box<dyn NetAddr>;

    fn remote_addr(&self) -> Box<dyn NetAddr>;

    fn set_deadline(&mut self, deadline: Option<Instant>) -> io::Result<()>;

    fn set_read_deadline(&mut self, deadline: Option<Instant>) -> io::Result<()>;

    fn set_write_deadline(&mut self, deadline: Option<Instant>) -> io::Result<()>;
}
