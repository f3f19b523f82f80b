//! 拓扑描述文件（JSON）
//!
//! ```json
//! {
//!     "policy": "shortest_path",
//!     "defaults": { "protocol": "issbgp", "mrai": 0 },
//!     "nodes": [ { "id": 0 }, { "id": 1, "protocol": { "reenable": 50 } } ],
//!     "links": [ { "from": 1, "to": 0, "label": "10" } ],
//!     "advertisements": [ { "node": 0, "time": 0 } ]
//! }
//! ```
//!
//! 链路 `from -> to` 表示 `from` 从 `to` 学习路由。

use crate::engine::Advertisement;
use crate::error::ConfigError;
use crate::net::{NodeId, Policy, Topology};
use crate::proto::{BgpConfig, ProtocolKind};
use crate::sim::SimTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologySpec {
    pub policy: Policy,
    #[serde(default)]
    pub defaults: Option<ProtocolSpec>,
    pub nodes: Vec<NodeSpec>,
    #[serde(default)]
    pub links: Vec<LinkSpec>,
    #[serde(default)]
    pub advertisements: Vec<AdvertisementSpec>,
}

/// 协议设置；未给出的字段沿用更低优先级的设置。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolSpec {
    #[serde(default)]
    pub protocol: Option<ProtocolKind>,
    #[serde(default)]
    pub mrai: Option<u64>,
    #[serde(default)]
    pub reenable: Option<u64>,
}

impl ProtocolSpec {
    /// `over` 中给出的字段覆盖 `self`。
    pub fn merged(&self, over: &ProtocolSpec) -> ProtocolSpec {
        ProtocolSpec {
            protocol: over.protocol.or(self.protocol),
            mrai: over.mrai.or(self.mrai),
            reenable: over.reenable.or(self.reenable),
        }
    }

    pub fn to_config(&self) -> BgpConfig {
        BgpConfig {
            kind: self.protocol.unwrap_or_default(),
            mrai: SimTime(self.mrai.unwrap_or(0)),
            reenable_interval: self.reenable.map(SimTime),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    pub id: usize,
    #[serde(default)]
    pub protocol: Option<ProtocolSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkSpec {
    pub from: usize,
    pub to: usize,
    /// 最短路径策略下为整数代价，域间策略下为 `C`/`R`/`P`/`R+`/`R*`/`S`
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvertisementSpec {
    pub node: usize,
    #[serde(default)]
    pub time: u64,
}

impl TopologySpec {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// 每个节点的协议设置：默认值 < 文件 `defaults` < 节点自身 < `overrides`。
    pub fn node_config(&self, node: &NodeSpec, overrides: &ProtocolSpec) -> BgpConfig {
        let base = self.defaults.clone().unwrap_or_default();
        let own = node.protocol.clone().unwrap_or_default();
        base.merged(&own).merged(overrides).to_config()
    }

    /// 构建拓扑和通告列表。通告的路由是策略的始发路由。
    pub fn build(
        &self,
        overrides: &ProtocolSpec,
    ) -> Result<(Topology, Vec<Advertisement>), ConfigError> {
        let mut builder = Topology::builder();
        for node in &self.nodes {
            builder.add_node(NodeId(node.id), self.node_config(node, overrides))?;
        }
        for link in &self.links {
            let extender = self.policy.extender(&link.label)?;
            builder.add_link(NodeId(link.from), NodeId(link.to), extender)?;
        }
        let topology = builder.build();

        let advertisements = self
            .advertisements
            .iter()
            .map(|adv| {
                let advertiser = NodeId(adv.node);
                if topology.node(advertiser).is_none() {
                    return Err(ConfigError::UnknownAdvertiser(advertiser));
                }
                Ok(Advertisement::new(
                    advertiser,
                    self.policy.self_route(),
                    SimTime(adv.time),
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((topology, advertisements))
    }
}
