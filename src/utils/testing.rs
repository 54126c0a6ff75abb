//! 测试用网络原语
//!
//! 不依赖真实 socket 的地址与连接实现，供测试时直接交给 hyper 处理请求

use std::fmt;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

use super::net::{Conn, NetAddr};

/// 测试地址，网络名称即其自身标签
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestAddr(pub String);

impl TestAddr {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }
}

impl NetAddr for TestAddr {
    fn network(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TestAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 内存连接
///
/// 读取预先写入的请求数据，写入的内容保存在输出缓冲区。读完后返回 EOF。
#[derive(Debug, Default)]
pub struct TestConn {
    input: BytesMut,
    output: BytesMut,
}

impl TestConn {
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用给定请求数据创建连接
    pub fn with_input(input: impl AsRef<[u8]>) -> Self {
        let mut conn = Self::new();
        conn.feed(input);
        conn
    }

    /// 追加待读取的数据
    pub fn feed(&mut self, data: impl AsRef<[u8]>) {
        self.input.put_slice(data.as_ref());
    }

    /// 已写出的数据
    pub fn written(&self) -> &[u8] {
        &self.output
    }

    /// 取走已写出的数据
    pub fn take_written(&mut self) -> Bytes {
        self.output.split().freeze()
    }
}

impl AsyncRead for TestConn {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let to_copy = std::cmp::min(self.input.len(), buf.remaining());
        buf.put_slice(&self.input[..to_copy]);
        self.input.advance(to_copy);
        Poll::Ready(Ok(()))
    }
}

impl AsyncWrite for TestConn {
    fn poll_write(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<Result<usize, io::Error>> {
        self.output.put_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
        Poll::Ready(Ok(()))
    }
}

impl Conn for TestConn {
    fn local_addr(&self) -> Box<dyn NetAddr> {
        Box::new(TestAddr::new("local-addr"))
    }

    fn remote_addr(&self) -> Box<dyn NetAddr> {
        Box::new(TestAddr::new("remote-addr"))
    }

    fn set_deadline(&mut self, _deadline: Option<Instant>) -> io::Result<()> {
        Ok(())
    }

    fn set_read_deadline(&mut self, _deadline: Option<Instant>) -> io::Result<()> {
        Ok(())
    }

    fn set_write_deadline(&mut self, _deadline: Option<Instant>) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[test]
    fn test_addr_network() {
        let addr = TestAddr::new("addr");
        assert_eq!(addr.network(), "addr");
        assert_eq!(addr.to_string(), "addr");
    }

    #[test]
    fn test_conn_deadline() {
        let mut conn = TestConn::new();
        assert!(conn.set_deadline(None).is_ok());
        assert!(conn.set_read_deadline(Some(Instant::now())).is_ok());
        assert!(conn.set_write_deadline(Some(Instant::now())).is_ok());
    }

    #[test]
    fn test_conn_addrs() {
        let conn = TestConn::new();
        assert_eq!(conn.local_addr().to_string(), "local-addr");
        assert_eq!(conn.remote_addr().network(), "remote-addr");
    }

    #[tokio::test]
    async fn test_conn_read_write() {
        let mut conn = TestConn::with_input(b"ping");

        let mut buf = Vec::new();
        conn.read_to_end(&mut buf).await.unwrap();
        assert_eq!(buf, b"ping");

        conn.write_all(b"pong").await.unwrap();
        conn.flush().await.unwrap();
        assert_eq!(conn.written(), b"pong");
        assert_eq!(conn.take_written(), Bytes::from_static(b"pong"));
        assert!(conn.written().is_empty());
    }
}
