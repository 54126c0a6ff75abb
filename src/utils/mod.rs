pub mod addr;
pub mod logger;
pub mod negotiation;
pub mod net;
pub mod path;
pub mod testing;

pub use addr::{detect_network, is_ipv6, parse_addr, ListenAddress, Network};
pub use negotiation::{accepts, accepts_charsets, accepts_encodings, accepts_languages, get_offer};
pub use net::{Conn, NetAddr};
pub use path::join_group_path;
pub use testing::{TestAddr, TestConn};
