//! 网络模块
//!
//! 节点、有向链路、扩展器（链路策略）、每链路发送端、拓扑以及驱动协议的事件。

// 子模块声明
mod events;
mod exporter;
mod extender;
mod id;
mod link;
mod message;
mod node;
mod topology;

// 重新导出公共接口
pub use events::{Advertise, DeliverMessage, TimerExpired};
pub use exporter::Exporter;
pub use extender::{local_pref, Extender, Policy, Relation};
pub use id::{LinkId, NodeId};
pub use link::Link;
pub use message::Message;
pub use node::Node;
pub use topology::{Links, Topology, TopologyBuilder};
