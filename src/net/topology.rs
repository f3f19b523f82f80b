//! 网络拓扑
//!
//! 拓扑结构在构建后不可变：节点集合与带扩展器的有向链路。
//! 运行期的可变状态（协议实例、每条链路的发送端）随拓扑一起存放。

use std::collections::HashMap;

use super::id::{LinkId, NodeId};
use super::link::Link;
use super::message::Message;
use super::node::Node;
use super::extender::Extender;
use crate::error::{SimError, TopologyError};
use crate::notify::TopologySummary;
use crate::proto::BgpConfig;
use crate::routing::BgpRoute;
use crate::sim::{Context, TimerKind};
use tracing::{debug, trace};

/// 拓扑中的全部链路，按 `(tail, head)` 和 `head` 建索引。
#[derive(Debug, Default, Clone)]
pub struct Links {
    links: Vec<Link>,
    by_pair: HashMap<(NodeId, NodeId), LinkId>,
    /// head -> 从 head 学习路由的链路（即 head 的入邻居）
    learners: HashMap<NodeId, Vec<LinkId>>,
}

impl Links {
    pub fn get(&self, tail: NodeId, head: NodeId) -> Option<&Link> {
        self.by_pair.get(&(tail, head)).map(|id| &self.links[id.0])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.links.iter()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// 从 `head` 学习路由的链路，按添加顺序。
    pub fn learners_of(&self, head: NodeId) -> impl Iterator<Item = &Link> {
        self.learners
            .get(&head)
            .into_iter()
            .flatten()
            .map(|id| &self.links[id.0])
    }

    fn insert(&mut self, link: Link) -> Result<LinkId, TopologyError> {
        let key = (link.tail, link.head);
        if self.by_pair.contains_key(&key) {
            return Err(TopologyError::DuplicateLink {
                tail: link.tail,
                head: link.head,
            });
        }
        let id = LinkId(self.links.len());
        self.learners.entry(link.head).or_default().push(id);
        self.by_pair.insert(key, id);
        self.links.push(link);
        Ok(id)
    }

    /// 把 `route` 经由各自的发送端发给 `from` 的每个入邻居，返回消息数。
    pub(crate) fn send(
        &mut self,
        from: NodeId,
        route: &BgpRoute,
        ctx: &mut Context,
    ) -> Result<usize, SimError> {
        let Some(ids) = self.learners.get(&from) else {
            return Ok(0);
        };
        for id in ids {
            let link = &mut self.links[id.0];
            let message = Message {
                sender: from,
                recipient: link.tail,
                route: route.clone(),
            };
            link.exporter.export(message, ctx)?;
        }
        Ok(ids.len())
    }

    fn reset(&mut self) {
        for link in &mut self.links {
            link.exporter.reset();
        }
    }
}

/// 网络拓扑
#[derive(Debug, Default, Clone)]
pub struct Topology {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    links: Links,
}

impl Topology {
    pub fn builder() -> TopologyBuilder {
        TopologyBuilder::default()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.index.get(&id).map(|&i| &mut self.nodes[i])
    }

    /// 按添加顺序遍历节点
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn links(&self) -> &Links {
        &self.links
    }

    pub fn link(&self, tail: NodeId, head: NodeId) -> Option<&Link> {
        self.links.get(tail, head)
    }

    /// 节点当前选择的路由
    pub fn selected_route(&self, id: NodeId) -> Option<&BgpRoute> {
        self.node(id).map(|n| n.protocol().selected_route())
    }

    /// 节点当前选择的邻居
    pub fn selected_neighbor(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)
            .and_then(|n| n.protocol().selector().selected_neighbor())
    }

    /// 链路 `tail -> head` 是否启用（即 `tail` 是否仍接受来自 `head` 的路由）。
    pub fn is_link_enabled(&self, tail: NodeId, head: NodeId) -> bool {
        self.node(tail)
            .is_none_or(|n| n.protocol().selector().is_enabled(head))
    }

    /// 当前被禁用的链路 `(tail, head)`
    pub fn disabled_links(&self) -> Vec<(NodeId, NodeId)> {
        self.links
            .iter()
            .filter(|l| !self.is_link_enabled(l.tail, l.head))
            .map(|l| (l.tail, l.head))
            .collect()
    }

    pub fn summary(&self) -> TopologySummary {
        TopologySummary {
            nodes: self.nodes.iter().map(Node::id).collect(),
            links: self.links.len(),
        }
    }

    /// 重置所有协议实例与发送端，用于重复实验之间。
    pub fn reset(&mut self) {
        for node in &mut self.nodes {
            node.protocol_mut().reset();
        }
        self.links.reset();
        debug!(nodes = self.nodes.len(), links = self.links.len(), "拓扑已重置");
    }

    fn node_and_links(&mut self, id: NodeId) -> Result<(&mut Node, &mut Links), SimError> {
        let idx = *self.index.get(&id).ok_or(SimError::UnknownNode(id))?;
        Ok((&mut self.nodes[idx], &mut self.links))
    }

    /// 把消息交给接收节点的协议实例处理。
    #[tracing::instrument(level = "debug", skip(self, ctx, message), fields(sender = %message.sender, recipient = %message.recipient))]
    pub fn deliver(&mut self, message: Message, ctx: &mut Context) -> Result<(), SimError> {
        let (node, links) = self.node_and_links(message.recipient)?;
        let id = node.id();
        trace!("交付给协议实例");
        node.protocol_mut().process(id, message, links, ctx)
    }

    /// 节点始发 `route`。
    pub fn advertise(
        &mut self,
        advertiser: NodeId,
        route: BgpRoute,
        ctx: &mut Context,
    ) -> Result<(), SimError> {
        let (node, links) = self.node_and_links(advertiser)?;
        node.protocol_mut().advertise(advertiser, route, links, ctx)
    }

    /// 让节点尝试导出当前选择。
    pub fn export(&mut self, id: NodeId, ctx: &mut Context) -> Result<(), SimError> {
        let (node, links) = self.node_and_links(id)?;
        node.protocol_mut().export(id, links, ctx)
    }

    pub fn expire_timer(
        &mut self,
        id: NodeId,
        kind: TimerKind,
        epoch: u64,
        ctx: &mut Context,
    ) -> Result<(), SimError> {
        let (node, links) = self.node_and_links(id)?;
        node.protocol_mut().on_timer_expired(id, kind, epoch, links, ctx)
    }
}

/// 逐步构建拓扑；重复的节点或链路会被拒绝。
#[derive(Debug, Default)]
pub struct TopologyBuilder {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    links: Links,
}

impl TopologyBuilder {
    pub fn add_node(
        &mut self,
        id: NodeId,
        config: BgpConfig,
    ) -> Result<&mut Self, TopologyError> {
        if self.index.contains_key(&id) {
            return Err(TopologyError::DuplicateNode(id));
        }
        self.index.insert(id, self.nodes.len());
        self.nodes.push(Node::new(id, config));
        Ok(self)
    }

    /// 添加链路 `tail -> head`（`tail` 从 `head` 学习）。
    pub fn add_link(
        &mut self,
        tail: NodeId,
        head: NodeId,
        extender: Extender,
    ) -> Result<&mut Self, TopologyError> {
        for id in [tail, head] {
            if !self.index.contains_key(&id) {
                return Err(TopologyError::UnknownNode(id));
            }
        }
        if tail == head {
            return Err(TopologyError::SelfLink(tail));
        }
        self.links.insert(Link::new(tail, head, extender))?;
        Ok(self)
    }

    pub fn build(self) -> Topology {
        Topology {
            nodes: self.nodes,
            index: self.index,
            links: self.links,
        }
    }
}
