//! 扩展器：链路上的导出/导入策略
//!
//! 链路 `u -> v` 表示 `u` 从 `v` 学习路由；扩展器把 `v` 的路由变换为 `u` 看到的路由，
//! 接受时把发送方 `v` 追加到 AS-PATH 末尾。

use super::id::NodeId;
use crate::error::ConfigError;
use crate::routing::{BgpRoute, Path};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 域间策略的 LOCAL-PREF 取值。兄弟（sibling）每跳减 1，仍落在同一档内。
pub mod local_pref {
    pub const PEER_PLUS: i32 = 500_000;
    pub const PEER_STAR: i32 = 400_000;
    pub const CUSTOMER: i32 = 300_000;
    pub const PEER: i32 = 200_000;
    pub const PROVIDER: i32 = 100_000;
}

/// 路由策略族
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// 链路标签为整数代价，累加到 LOCAL-PREF
    ShortestPath,
    /// 链路标签为商业关系 `C`/`R`/`P`/`R+`/`R*`/`S`
    Interdomain,
}

impl Policy {
    pub fn name(self) -> &'static str {
        match self {
            Policy::ShortestPath => "shortest-path",
            Policy::Interdomain => "interdomain",
        }
    }

    /// 目的节点始发的路由。
    pub fn self_route(self) -> BgpRoute {
        match self {
            Policy::ShortestPath => BgpRoute::new(0, Path::empty()),
            Policy::Interdomain => BgpRoute::new(local_pref::CUSTOMER, Path::empty()),
        }
    }

    /// 解析链路标签。
    pub fn extender(self, label: &str) -> Result<Extender, ConfigError> {
        let label = label.trim();
        let unknown = || ConfigError::UnknownLabel {
            label: label.to_string(),
            policy: self.name(),
        };
        match self {
            Policy::ShortestPath => label
                .parse::<i32>()
                .map(|cost| Extender::ShortestPath { cost })
                .map_err(|_| unknown()),
            Policy::Interdomain => {
                let relation = match label {
                    "C" => Relation::Customer,
                    "R" => Relation::Peer,
                    "P" => Relation::Provider,
                    "R+" => Relation::PeerPlus,
                    "R*" => Relation::PeerStar,
                    "S" => Relation::Sibling,
                    _ => return Err(unknown()),
                };
                Ok(Extender::Interdomain(relation))
            }
        }
    }
}

/// 链路另一端（发送方）相对于学习方的商业关系。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    Customer,
    Peer,
    Provider,
    PeerPlus,
    PeerStar,
    Sibling,
}

impl Relation {
    pub fn label(self) -> &'static str {
        match self {
            Relation::Customer => "C",
            Relation::Peer => "R",
            Relation::Provider => "P",
            Relation::PeerPlus => "R+",
            Relation::PeerStar => "R*",
            Relation::Sibling => "S",
        }
    }
}

/// 域间路由按 LOCAL-PREF 所在档位分类。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RouteClass {
    PeerPlus,
    PeerStar,
    Customer,
    Peer,
    Provider,
}

impl RouteClass {
    fn of(local_pref: i32) -> Option<RouteClass> {
        use local_pref::*;
        match local_pref {
            lp if lp > PEER_STAR => Some(RouteClass::PeerPlus),
            lp if lp > CUSTOMER => Some(RouteClass::PeerStar),
            lp if lp > PEER => Some(RouteClass::Customer),
            lp if lp > PROVIDER => Some(RouteClass::Peer),
            lp if lp > 0 => Some(RouteClass::Provider),
            _ => None,
        }
    }

    /// 客户路由与 peer+ 路由向所有邻居导出，其它只导出给客户。
    fn exported_to_all(self) -> bool {
        matches!(self, RouteClass::Customer | RouteClass::PeerPlus)
    }
}

/// 附着在有向链路上的纯函数 `(route, sender) -> route`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extender {
    ShortestPath { cost: i32 },
    Interdomain(Relation),
}

impl Extender {
    pub fn extend(&self, route: &BgpRoute, sender: NodeId) -> BgpRoute {
        if !route.is_valid() {
            return BgpRoute::invalid();
        }
        let local_pref = match *self {
            Extender::ShortestPath { cost } => route.local_pref().checked_add(cost),
            Extender::Interdomain(relation) => interdomain_local_pref(relation, route.local_pref()),
        };
        match local_pref {
            Some(lp) => BgpRoute::new(lp, route.as_path().append(sender)),
            None => BgpRoute::invalid(),
        }
    }
}

fn interdomain_local_pref(relation: Relation, local_pref: i32) -> Option<i32> {
    let class = RouteClass::of(local_pref)?;
    let exportable = class.exported_to_all();
    match relation {
        Relation::Customer => exportable.then_some(local_pref::CUSTOMER),
        Relation::Peer => exportable.then_some(local_pref::PEER),
        Relation::PeerPlus => exportable.then_some(local_pref::PEER_PLUS),
        Relation::PeerStar => exportable.then_some(local_pref::PEER_STAR),
        Relation::Provider => Some(local_pref::PROVIDER),
        Relation::Sibling => Some(local_pref - 1),
    }
}

impl fmt::Display for Extender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extender::ShortestPath { cost } => write!(f, "{cost}"),
            Extender::Interdomain(relation) => write!(f, "{}", relation.label()),
        }
    }
}
