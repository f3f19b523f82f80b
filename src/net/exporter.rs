//! 每条有向链路一个的发送端
//!
//! 交付时间 `max(now + delay, last) + 1` 严格递增，因此即使时延随机，
//! 同一链路上的消息也按 FIFO 顺序到达。

use super::events::DeliverMessage;
use super::message::Message;
use crate::error::SimError;
use crate::notify::NotificationKind;
use crate::sim::{Context, SimTime};
use tracing::trace;

#[derive(Debug, Clone, Default)]
pub struct Exporter {
    last_deliver_time: SimTime,
}

impl Exporter {
    pub fn last_deliver_time(&self) -> SimTime {
        self.last_deliver_time
    }

    /// 调度消息交付，返回交付时间。
    #[tracing::instrument(level = "trace", skip(self, ctx), fields(sender = %message.sender, recipient = %message.recipient))]
    pub fn export(&mut self, message: Message, ctx: &mut Context) -> Result<SimTime, SimError> {
        let now = ctx.now();
        let delay = ctx.next_delay();
        let deliver_at = now.after(delay).max(self.last_deliver_time).next();

        trace!(
            now = %now,
            delay = %delay,
            last_deliver_time = %self.last_deliver_time,
            deliver_at = %deliver_at,
            "计算交付时间"
        );

        ctx.notify(NotificationKind::MessageSent {
            message: message.clone(),
        });
        ctx.schedule(deliver_at, DeliverMessage { message })?;
        self.last_deliver_time = deliver_at;
        Ok(deliver_at)
    }

    /// 只能在该链路没有在途消息时调用。
    pub fn reset(&mut self) {
        self.last_deliver_time = SimTime::ZERO;
    }
}
