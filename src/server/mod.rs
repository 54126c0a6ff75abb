//! 响应处理相关组件

pub mod config;
pub mod etag;
pub mod exchange;

pub use config::{EtagConfig, WebkitConfig};
pub use etag::{apply_etag, compute_etag, if_none_match_hit, set_etag, EntityTag};
pub use exchange::HttpExchange;
