//! 路由选择器
//!
//! 包装一张 [`RoutingTable`]，缓存 `(selected_route, selected_neighbor)`。
//! 每个公开操作之后都满足：缓存等于所有**启用**条目在 `compare` 下的最大值；
//! 没有启用的有效候选时为 `(invalid, None)`。
//!
//! 只有 [`RouteSelector::reselect`] 是线性的，其它操作均摊 O(1)。
//! 平局规则：增量操作保留现任；`reselect` 按邻居 ID 升序扫描，保留第一个最大值。

use super::route::Route;
use super::table::RoutingTable;
use crate::net::NodeId;
use std::cmp::Ordering;

#[derive(Debug, Clone)]
pub struct RouteSelector<R: Route> {
    table: RoutingTable<R>,
    selected_route: R,
    selected_neighbor: Option<NodeId>,
}

impl<R: Route> Default for RouteSelector<R> {
    fn default() -> Self {
        Self {
            table: RoutingTable::new(),
            selected_route: R::invalid(),
            selected_neighbor: None,
        }
    }
}

impl<R: Route> RouteSelector<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> &RoutingTable<R> {
        &self.table
    }

    pub fn selected_route(&self) -> &R {
        &self.selected_route
    }

    pub fn selected_neighbor(&self) -> Option<NodeId> {
        self.selected_neighbor
    }

    pub fn is_enabled(&self, neighbor: NodeId) -> bool {
        self.table.is_enabled(neighbor)
    }

    /// 存入 `neighbor` 的新候选路由；返回选择是否改变。
    pub fn update(&mut self, neighbor: NodeId, route: R) -> bool {
        self.table.update(neighbor, route.clone());

        if self.selected_neighbor == Some(neighbor) {
            if route == self.selected_route {
                return false;
            }
            self.reselect();
            true
        } else if self.table.is_enabled(neighbor)
            && route.compare(&self.selected_route) == Ordering::Greater
        {
            self.adopt(neighbor, route);
            true
        } else {
            false
        }
    }

    /// 禁用 `neighbor`；若它是当前选择则重新选择。
    pub fn disable(&mut self, neighbor: NodeId) -> bool {
        self.table.set_enabled(neighbor, false);
        if self.selected_neighbor == Some(neighbor) {
            self.reselect();
            true
        } else {
            false
        }
    }

    /// 启用 `neighbor`；若它的候选路由优于当前选择则直接采用。
    pub fn enable(&mut self, neighbor: NodeId) -> bool {
        self.table.set_enabled(neighbor, true);
        let candidate = self.table.route(neighbor).cloned();
        match candidate {
            Some(route) if route.compare(&self.selected_route) == Ordering::Greater => {
                self.adopt(neighbor, route);
                true
            }
            _ => false,
        }
    }

    /// 重新启用所有被禁用的邻居；只在它们当中找最优，优于当前选择时采用。
    pub fn enable_all(&mut self) -> bool {
        let reenabled = self.table.disabled_neighbors();
        let mut best: Option<(NodeId, R)> = None;
        for neighbor in reenabled {
            self.table.set_enabled(neighbor, true);
            let Some(route) = self.table.route(neighbor) else {
                continue;
            };
            let better = match &best {
                Some((_, b)) => route.compare(b) == Ordering::Greater,
                None => true,
            };
            if better {
                best = Some((neighbor, route.clone()));
            }
        }

        match best {
            Some((neighbor, route))
                if route.compare(&self.selected_route) == Ordering::Greater =>
            {
                self.adopt(neighbor, route);
                true
            }
            _ => false,
        }
    }

    /// 从所有启用条目重新计算选择（O(邻居数)）。
    pub fn reselect(&mut self) {
        let mut best_route = R::invalid();
        let mut best_neighbor = None;
        for (neighbor, route, enabled) in self.table.iter() {
            if enabled && route.compare(&best_route) == Ordering::Greater {
                best_route = route.clone();
                best_neighbor = Some(neighbor);
            }
        }
        self.selected_route = best_route;
        self.selected_neighbor = best_neighbor;
    }

    /// 清空路由表与缓存。
    pub fn clear(&mut self) {
        self.table.clear();
        self.selected_route = R::invalid();
        self.selected_neighbor = None;
    }

    fn adopt(&mut self, neighbor: NodeId, route: R) {
        self.selected_route = route;
        self.selected_neighbor = Some(neighbor);
    }
}
