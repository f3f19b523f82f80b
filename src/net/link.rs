//! 链路类型

use super::exporter::Exporter;
use super::extender::Extender;
use super::id::NodeId;

/// 有向链路 `tail -> head`：`tail` 从 `head` 学习路由，路由沿 `head -> tail` 传播。
#[derive(Debug, Clone)]
pub struct Link {
    pub tail: NodeId,
    pub head: NodeId,
    pub extender: Extender,
    pub(crate) exporter: Exporter,
}

impl Link {
    /// 创建新链路
    pub fn new(tail: NodeId, head: NodeId, extender: Extender) -> Self {
        Self {
            tail,
            head,
            extender,
            exporter: Exporter::default(),
        }
    }

    pub fn exporter(&self) -> &Exporter {
        &self.exporter
    }
}
