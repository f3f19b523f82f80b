//! BGP 协议引擎
//!
//! 流水线：import → learn → select → export。
//! - import：链路扩展器变换收到的路由
//! - learn：AS-PATH 中含有自己即为环路，交给环路检测钩子并得到无效路由
//! - select：更新路由选择器
//! - export：选择变化后向所有入邻居通告，受 MRAI 定时器节流

use super::config::BgpConfig;
use crate::error::SimError;
use crate::net::{Links, Message, NodeId};
use crate::notify::NotificationKind;
use crate::routing::{BgpRoute, RouteSelector};
use crate::sim::{Context, Timer, TimerKind};
use tracing::{debug, trace};

/// 单个节点上的协议实例。
#[derive(Debug, Clone)]
pub struct Bgp {
    pub(super) config: BgpConfig,
    pub(super) selector: RouteSelector<BgpRoute>,
    mrai_timer: Timer,
    pub(super) reenable_timer: Timer,
    /// 自上次导出检查以来选择是否变化
    pub(super) selection_changed: bool,
    last_sent: BgpRoute,
}

impl Bgp {
    pub fn new(config: BgpConfig) -> Self {
        let mrai_timer = if config.mrai.is_zero() {
            Timer::disabled()
        } else {
            Timer::new(config.mrai)
        };
        let reenable_timer = config
            .reenable_interval
            .map(Timer::new)
            .unwrap_or_else(Timer::disabled);
        Self {
            config,
            selector: RouteSelector::new(),
            mrai_timer,
            reenable_timer,
            selection_changed: false,
            last_sent: BgpRoute::invalid(),
        }
    }

    pub fn config(&self) -> &BgpConfig {
        &self.config
    }

    pub fn selector(&self) -> &RouteSelector<BgpRoute> {
        &self.selector
    }

    pub fn selected_route(&self) -> &BgpRoute {
        self.selector.selected_route()
    }

    /// 最近一次实际发出的路由
    pub fn last_sent(&self) -> &BgpRoute {
        &self.last_sent
    }

    pub fn mrai_timer(&self) -> &Timer {
        &self.mrai_timer
    }

    pub fn reenable_timer(&self) -> &Timer {
        &self.reenable_timer
    }

    /// 处理一条到达的消息。
    #[tracing::instrument(level = "debug", skip_all, fields(node = %node, sender = %message.sender))]
    pub fn process(
        &mut self,
        node: NodeId,
        message: Message,
        links: &mut Links,
        ctx: &mut Context,
    ) -> Result<(), SimError> {
        let sender = message.sender;
        let extender = links
            .get(node, sender)
            .map(|link| link.extender)
            .ok_or(SimError::UnknownLink {
                tail: node,
                head: sender,
            })?;

        ctx.notify(NotificationKind::MessageReceived {
            message: message.clone(),
        });
        let previous = self.selector.selected_route().clone();

        let imported = extender.extend(&message.route, sender);
        trace!(route = %imported, "导入");
        ctx.notify(NotificationKind::Import {
            node,
            route: imported.clone(),
            sender,
        });

        let learned = self.learn(node, sender, imported, ctx)?;
        ctx.notify(NotificationKind::Learn {
            node,
            route: learned.clone(),
            sender,
        });

        self.selection_changed |= self.selector.update(sender, learned);
        self.flush(node, previous, links, ctx)
    }

    /// 节点自身始发 `route`，从 select 步骤进入流水线。
    #[tracing::instrument(level = "debug", skip_all, fields(node = %node, route = %route))]
    pub fn advertise(
        &mut self,
        node: NodeId,
        route: BgpRoute,
        links: &mut Links,
        ctx: &mut Context,
    ) -> Result<(), SimError> {
        let previous = self.selector.selected_route().clone();
        self.selection_changed |= self.selector.update(node, route);
        self.flush(node, previous, links, ctx)
    }

    /// AS-PATH 含有 `node` 时返回无效路由并触发环路检测钩子，否则原样返回。
    pub fn learn(
        &mut self,
        node: NodeId,
        sender: NodeId,
        route: BgpRoute,
        ctx: &mut Context,
    ) -> Result<BgpRoute, SimError> {
        if route.as_path().contains(node) {
            debug!(route = %route, sender = %sender, "🔁 检测到环路");
            self.on_loop_detected(node, sender, &route, ctx)?;
            Ok(BgpRoute::invalid())
        } else {
            Ok(route)
        }
    }

    /// 向所有入邻居通告当前选择。
    ///
    /// MRAI 定时器运行中、或选择与上次发出的路由相同时不做任何事。
    #[tracing::instrument(level = "debug", skip_all, fields(node = %node))]
    pub fn export(
        &mut self,
        node: NodeId,
        links: &mut Links,
        ctx: &mut Context,
    ) -> Result<(), SimError> {
        if self.mrai_timer.is_running() {
            trace!("MRAI 计时中，推迟导出");
            return Ok(());
        }
        let selected = self.selector.selected_route().clone();
        if selected == self.last_sent {
            trace!("选择未变化，无需导出");
            return Ok(());
        }

        let sent = links.send(node, &selected, ctx)?;
        debug!(route = %selected, neighbors = sent, "📤 导出路由");
        ctx.notify(NotificationKind::Export {
            node,
            route: selected.clone(),
        });
        self.last_sent = selected;

        if !self.config.mrai.is_zero() {
            self.mrai_timer.start(node, TimerKind::Mrai, ctx)?;
        }
        Ok(())
    }

    /// 定时器到期事件的回调分派。
    pub fn on_timer_expired(
        &mut self,
        node: NodeId,
        kind: TimerKind,
        epoch: u64,
        links: &mut Links,
        ctx: &mut Context,
    ) -> Result<(), SimError> {
        let timer = match kind {
            TimerKind::Mrai => &mut self.mrai_timer,
            TimerKind::Reenable => &mut self.reenable_timer,
        };
        if !timer.fire(epoch) {
            trace!(node = %node, ?kind, epoch, "忽略已取消的定时器事件");
            return Ok(());
        }
        match kind {
            TimerKind::Mrai => self.export(node, links, ctx),
            TimerKind::Reenable => self.reenable(node, links, ctx),
        }
    }

    /// 清空路由状态并取消所有定时器，用于重复实验之间。
    pub fn reset(&mut self) {
        self.selector.clear();
        self.mrai_timer.reset();
        self.reenable_timer.reset();
        self.selection_changed = false;
        self.last_sent = BgpRoute::invalid();
    }

    fn flush(
        &mut self,
        node: NodeId,
        previous: BgpRoute,
        links: &mut Links,
        ctx: &mut Context,
    ) -> Result<(), SimError> {
        if !self.selection_changed {
            return Ok(());
        }
        self.selection_changed = false;

        let selected = self.selector.selected_route().clone();
        debug!(previous = %previous, selected = %selected, "选择变化");
        ctx.notify(NotificationKind::Select {
            node,
            new_route: selected,
            previous_route: previous,
        });
        self.export(node, links, ctx)
    }
}
