//! 请求/响应交换对象
//!
//! 在响应写出之前承载状态码、响应头和响应体，供 ETag 等响应后处理修改

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{AsHeaderName, HeaderMap, HeaderValue, IntoHeaderName};
use hyper::{Request, Response, StatusCode};

/// 一次请求的交换对象
///
/// 请求头只读，响应部分可变。HeaderMap 的键统一为小写，查找不区分大小写。
#[derive(Debug, Clone)]
pub struct HttpExchange {
    request_headers: HeaderMap,
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl Default for HttpExchange {
    fn default() -> Self {
        Self::new(HeaderMap::new())
    }
}

impl HttpExchange {
    /// 使用请求头创建，响应默认 200 且无响应体
    pub fn new(request_headers: HeaderMap) -> Self {
        Self {
            request_headers,
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// 从 hyper 请求复制请求头创建
    pub fn from_request<B>(request: &Request<B>) -> Self {
        Self::new(request.headers().clone())
    }

    pub fn request_headers(&self) -> &HeaderMap {
        &self.request_headers
    }

    pub fn request_headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.request_headers
    }

    /// 读取请求头，非 ASCII 可见字符的值视为不存在
    pub fn request_header<K: AsHeaderName>(&self, name: K) -> Option<&str> {
        self.request_headers
            .get(name)
            .and_then(|value| value.to_str().ok())
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn set_status(&mut self, status: StatusCode) -> &mut Self {
        self.status = status;
        self
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// 设置响应头，覆盖同名旧值
    pub fn set_header<K: IntoHeaderName>(&mut self, name: K, value: HeaderValue) -> &mut Self {
        self.headers.insert(name, value);
        self
    }

    /// 读取响应头
    pub fn header<K: AsHeaderName>(&self, name: K) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// 设置响应体
    pub fn send(&mut self, body: impl Into<Bytes>) -> &mut Self {
        self.body = body.into();
        self
    }

    /// 清空响应体
    pub fn reset_body(&mut self) {
        self.body = Bytes::new();
    }

    /// 转换为 hyper 响应
    pub fn into_response(self) -> Response<Full<Bytes>> {
        let mut response = Response::new(Full::new(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}
