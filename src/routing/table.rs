//! 路由表：每个邻居一条候选路由和一个启用标志
//!
//! 不在表中的邻居视为"启用、候选路由无效"。条目在第一次
//! `update`/`set_enabled` 时惰性创建。按邻居 ID 升序保存，遍历顺序确定。

use super::route::Route;
use crate::net::NodeId;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
struct Entry<R> {
    route: R,
    enabled: bool,
}

#[derive(Debug, Clone)]
pub struct RoutingTable<R: Route> {
    entries: BTreeMap<NodeId, Entry<R>>,
}

impl<R: Route> Default for RoutingTable<R> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<R: Route> RoutingTable<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 更新 `neighbor` 的候选路由，不改变启用标志。
    pub fn update(&mut self, neighbor: NodeId, route: R) {
        match self.entries.get_mut(&neighbor) {
            Some(entry) => entry.route = route,
            None => {
                self.entries.insert(
                    neighbor,
                    Entry {
                        route,
                        enabled: true,
                    },
                );
            }
        }
    }

    /// 设置启用标志；邻居不存在时以无效路由创建。
    pub fn set_enabled(&mut self, neighbor: NodeId, enabled: bool) {
        self.entries
            .entry(neighbor)
            .or_insert_with(|| Entry {
                route: R::invalid(),
                enabled: true,
            })
            .enabled = enabled;
    }

    /// `neighbor` 的候选路由；不存在时为 `None`（语义上等同无效路由）。
    pub fn route(&self, neighbor: NodeId) -> Option<&R> {
        self.entries.get(&neighbor).map(|e| &e.route)
    }

    pub fn is_enabled(&self, neighbor: NodeId) -> bool {
        self.entries.get(&neighbor).is_none_or(|e| e.enabled)
    }

    /// 按邻居 ID 升序遍历 `(neighbor, route, enabled)`。
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &R, bool)> {
        self.entries.iter().map(|(&n, e)| (n, &e.route, e.enabled))
    }

    /// 当前被禁用的邻居（升序）。
    pub fn disabled_neighbors(&self) -> Vec<NodeId> {
        self.entries
            .iter()
            .filter(|(_, e)| !e.enabled)
            .map(|(&n, _)| n)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
