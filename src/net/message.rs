//! 路由通告消息

use super::id::NodeId;
use crate::routing::BgpRoute;
use serde::Serialize;

/// 不可变的消息：`sender` 把 `route` 通告给 `recipient`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub sender: NodeId,
    pub recipient: NodeId,
    pub route: BgpRoute,
}
