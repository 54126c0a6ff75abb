//! ETag 端到端测试
//!
//! 通过内存连接把原始 HTTP 请求交给 hyper，验证响应中的 ETag 与 304 处理

use std::convert::Infallible;

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::{TokioIo, TokioTimer};
use rat_webkit::server::{apply_etag, EtagConfig, HttpExchange};
use rat_webkit::utils::{Conn, TestConn};

async fn hello(request: Request<Incoming>, etag: EtagConfig) -> Result<Response<Full<Bytes>>, Infallible> {
    let mut exchange = HttpExchange::from_request(&request);
    exchange.send("Hello, World!");
    apply_etag(&mut exchange, &etag);
    Ok(exchange.into_response())
}

async fn serve_raw(raw_request: &str, etag: EtagConfig) -> String {
    let conn = TestConn::with_input(raw_request);
    assert_eq!(conn.remote_addr().to_string(), "remote-addr");

    let service = service_fn(move |request| hello(request, etag.clone()));
    let parts = http1::Builder::new()
        .timer(TokioTimer::new())
        .keep_alive(false)
        .serve_connection(TokioIo::new(conn), service)
        .without_shutdown()
        .await
        .expect("处理请求失败");

    let mut conn = parts.io.into_inner();
    String::from_utf8(conn.take_written().to_vec()).expect("响应不是 UTF-8")
}

#[tokio::test]
async fn test_strong_etag_over_conn() {
    let response = serve_raw(
        "GET / HTTP/1.1\r\nHost: localhost\r\n\r\n",
        EtagConfig::new().enable(),
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "响应: {}", response);
    assert!(response.contains("etag: \"13-1831710635\"\r\n"), "响应: {}", response);
    assert!(response.ends_with("Hello, World!"), "响应: {}", response);
}

#[tokio::test]
async fn test_weak_etag_over_conn() {
    let response = serve_raw(
        "GET / HTTP/1.1\r\nHost: localhost\r\n\r\n",
        EtagConfig::new().enable().weak(true),
    )
    .await;

    assert!(response.contains("etag: W/\"13-1831710635\"\r\n"), "响应: {}", response);
}

#[tokio::test]
async fn test_not_modified_over_conn() {
    let response = serve_raw(
        "GET / HTTP/1.1\r\nHost: localhost\r\nIf-None-Match: \"13-1831710635\"\r\n\r\n",
        EtagConfig::new().enable(),
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 304 Not Modified\r\n"), "响应: {}", response);
    assert!(!response.contains("etag:"), "响应: {}", response);
    assert!(!response.contains("Hello, World!"), "响应: {}", response);
}

#[tokio::test]
async fn test_etag_disabled_over_conn() {
    let response = serve_raw(
        "GET / HTTP/1.1\r\nHost: localhost\r\nIf-None-Match: \"13-1831710635\"\r\n\r\n",
        EtagConfig::default(),
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "响应: {}", response);
    assert!(!response.contains("etag:"), "响应: {}", response);
}
