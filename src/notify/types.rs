use crate::net::{Message, NodeId};
use crate::routing::BgpRoute;
use crate::sim::SimTime;
use serde::Serialize;

/// 随 Start/End 通知携带的拓扑概要
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopologySummary {
    pub nodes: Vec<NodeId>,
    pub links: usize,
}

/// 通知类型
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationKind {
    /// 一次仿真开始
    Start {
        seed: u64,
        topology: TopologySummary,
    },
    /// 事件队列在阈值之前自然排空
    End { topology: TopologySummary },
    /// 时钟到达阈值，仿真未终止
    ThresholdReached { threshold: SimTime },
    /// 扩展器变换后的路由
    Import {
        node: NodeId,
        route: BgpRoute,
        sender: NodeId,
    },
    /// 环路过滤后的路由
    Learn {
        node: NodeId,
        route: BgpRoute,
        sender: NodeId,
    },
    Select {
        node: NodeId,
        new_route: BgpRoute,
        previous_route: BgpRoute,
    },
    Export { node: NodeId, route: BgpRoute },
    /// 检测到复发性环路并禁用了 `sender`
    Detect {
        node: NodeId,
        learned_route: BgpRoute,
        alternative_route: BgpRoute,
        sender: NodeId,
    },
    ReEnable {
        node: NodeId,
        reenabled_neighbors: Vec<NodeId>,
    },
    MessageSent { message: Message },
    MessageReceived { message: Message },
}

/// 带时间戳的通知（时间戳为发出时的逻辑时钟）
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub time: SimTime,
    #[serde(flatten)]
    pub kind: NotificationKind,
}
