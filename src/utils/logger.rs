//! 日志门面
//!
//! 统一从 rat_logger 导出日志宏，日志器由宿主应用负责初始化

pub use rat_logger::{debug, error, info, warn};
