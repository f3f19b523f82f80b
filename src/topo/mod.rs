//! 拓扑描述
//!
//! 从 JSON 描述构建 [`Topology`](crate::net::Topology) 与通告列表。

mod spec;

pub use spec::{AdvertisementSpec, LinkSpec, NodeSpec, ProtocolSpec, TopologySpec};
