//! SS-BGP 族的环路检测
//!
//! 检测到环路后：经由发送方的候选路由作废；若变体的判定认为环路会复发，
//! 就禁用该发送方，并（可选地）启动重新启用定时器。

use super::bgp::Bgp;
use super::config::ProtocolKind;
use crate::error::SimError;
use crate::net::{Links, NodeId};
use crate::notify::NotificationKind;
use crate::routing::BgpRoute;
use crate::sim::{Context, TimerKind};
use tracing::{debug, trace};

impl ProtocolKind {
    /// 复发性环路判定。
    ///
    /// - `learned`：带环路的导入路由
    /// - `alternative`：作废经由发送方的路由之后的选择
    /// - `previous`：本次处理之前的选择
    pub fn is_recurrent(
        self,
        node: NodeId,
        learned: &BgpRoute,
        alternative: &BgpRoute,
        previous: &BgpRoute,
    ) -> bool {
        let weak = || learned.local_pref() > alternative.local_pref();
        let weak_v2 = || alternative.local_pref() < previous.local_pref();
        // 备选路由的路径恰好是环路路径重新进入 node 之前的前缀
        let same_prefix = || *alternative.as_path() == learned.as_path().sub_path_before(node);

        match self {
            ProtocolKind::Bgp => false,
            ProtocolKind::SsBgp => weak(),
            ProtocolKind::IssBgp => weak() && same_prefix(),
            ProtocolKind::SsBgp2 => weak_v2(),
            ProtocolKind::IssBgp2 => weak_v2() && same_prefix(),
        }
    }
}

impl Bgp {
    /// 环路检测钩子；普通 BGP 什么也不做。
    pub(super) fn on_loop_detected(
        &mut self,
        node: NodeId,
        sender: NodeId,
        learned: &BgpRoute,
        ctx: &mut Context,
    ) -> Result<(), SimError> {
        if !self.config.kind.detects_loops() {
            return Ok(());
        }
        if !self.selector.is_enabled(sender) {
            trace!(sender = %sender, "发送方已被禁用，忽略");
            return Ok(());
        }

        let previous = self.selector.selected_route().clone();
        self.selection_changed |= self.selector.update(sender, BgpRoute::invalid());
        let alternative = self.selector.selected_route().clone();

        if !self
            .config
            .kind
            .is_recurrent(node, learned, &alternative, &previous)
        {
            trace!(alternative = %alternative, "环路判定为暂时性");
            return Ok(());
        }

        self.selection_changed |= self.selector.disable(sender);
        debug!(
            sender = %sender,
            learned = %learned,
            alternative = %alternative,
            "🚫 复发性环路，禁用邻居"
        );
        ctx.notify(NotificationKind::Detect {
            node,
            learned_route: learned.clone(),
            alternative_route: alternative,
            sender,
        });

        if self.config.reenable_interval.is_some() {
            self.reenable_timer.cancel();
            self.reenable_timer.start(node, TimerKind::Reenable, ctx)?;
        }
        Ok(())
    }

    /// 重新启用定时器的回调：启用所有被禁用的邻居，选择变化时导出。
    pub(super) fn reenable(
        &mut self,
        node: NodeId,
        links: &mut Links,
        ctx: &mut Context,
    ) -> Result<(), SimError> {
        let neighbors = self.selector.table().disabled_neighbors();
        let updated = self.selector.enable_all();
        debug!(?neighbors, updated, "重新启用邻居");
        ctx.notify(NotificationKind::ReEnable {
            node,
            reenabled_neighbors: neighbors,
        });
        if updated {
            self.export(node, links, ctx)?;
        }
        Ok(())
    }
}
