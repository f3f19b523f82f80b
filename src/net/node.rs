//! 节点类型
//!
//! 每个节点持有且只持有一个协议实例。相等与哈希只看 ID。

use super::id::NodeId;
use crate::proto::{Bgp, BgpConfig};
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    protocol: Bgp,
}

impl Node {
    pub fn new(id: NodeId, config: BgpConfig) -> Self {
        Self {
            id,
            protocol: Bgp::new(config),
        }
    }

    /// 获取节点标识符
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn protocol(&self) -> &Bgp {
        &self.protocol
    }

    pub fn protocol_mut(&mut self) -> &mut Bgp {
        &mut self.protocol
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
