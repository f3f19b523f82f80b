//! 协议模块
//!
//! BGP 流水线引擎以及 SS-BGP 族的环路检测。

mod bgp;
mod config;
mod detection;

pub use bgp::Bgp;
pub use config::{BgpConfig, ProtocolKind};
