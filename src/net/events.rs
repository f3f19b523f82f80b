//! 仿真事件：通告、消息交付、定时器到期

use super::id::NodeId;
use super::message::Message;
use super::topology::Topology;
use crate::error::SimError;
use crate::routing::BgpRoute;
use crate::sim::{Context, Event, TimerKind};
use tracing::trace;

/// 事件：`advertiser` 始发 `route`。
#[derive(Debug)]
pub struct Advertise {
    pub advertiser: NodeId,
    pub route: BgpRoute,
}

impl Event for Advertise {
    fn execute(self: Box<Self>, ctx: &mut Context, topology: &mut Topology) -> Result<(), SimError> {
        let Advertise { advertiser, route } = *self;
        trace!(advertiser = %advertiser, route = %route, now = %ctx.now(), "通告事件执行");
        topology.advertise(advertiser, route, ctx)
    }
}

/// 事件：把一条消息交给接收节点处理。
#[derive(Debug)]
pub struct DeliverMessage {
    pub message: Message,
}

impl Event for DeliverMessage {
    fn execute(self: Box<Self>, ctx: &mut Context, topology: &mut Topology) -> Result<(), SimError> {
        let DeliverMessage { message } = *self;
        trace!(
            sender = %message.sender,
            recipient = %message.recipient,
            route = %message.route,
            now = %ctx.now(),
            "📨 消息到达"
        );
        topology.deliver(message, ctx)
    }
}

/// 事件：定时器到期。`epoch` 不匹配或定时器已被取消时不触发回调。
#[derive(Debug)]
pub struct TimerExpired {
    pub node: NodeId,
    pub kind: TimerKind,
    pub epoch: u64,
}

impl Event for TimerExpired {
    fn execute(self: Box<Self>, ctx: &mut Context, topology: &mut Topology) -> Result<(), SimError> {
        let TimerExpired { node, kind, epoch } = *self;
        topology.expire_timer(node, kind, epoch, ctx)
    }
}
