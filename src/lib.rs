//! RAT Webkit
//!
//! HTTP 框架的响应与连接辅助工具：
//! - ETag 生成与 If-None-Match 条件请求处理
//! - 路由分组路径拼接
//! - IPv6 字面量识别与监听地址解析
//! - Accept 系列头部的内容协商
//! - 测试用的内存连接与地址

pub mod error;
pub mod server;
pub mod utils;

pub use error::{RatError, RatResult};
pub use server::{set_etag, EntityTag, EtagConfig, HttpExchange, WebkitConfig};
pub use utils::{get_offer, is_ipv6, join_group_path, parse_addr, ListenAddress};
