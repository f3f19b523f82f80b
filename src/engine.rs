//! 仿真驱动
//!
//! 持有仿真上下文：为每个通告调度一个 `Advertise` 事件，然后不断弹出事件，
//! 直到队列排空（协议收敛）或时钟到达阈值。

use crate::error::SimError;
use crate::net::{Advertise, NodeId, Topology};
use crate::notify::{Broadcast, NotificationKind, NotificationSink};
use crate::routing::BgpRoute;
use crate::sim::{Context, DelayGenerator, SimTime};
use tracing::{debug, info};

/// `advertiser` 在 `time` 始发 `route`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advertisement {
    pub advertiser: NodeId,
    pub route: BgpRoute,
    pub time: SimTime,
}

impl Advertisement {
    pub fn new(advertiser: NodeId, route: BgpRoute, time: SimTime) -> Self {
        Self {
            advertiser,
            route,
            time,
        }
    }
}

#[derive(Default)]
pub struct Engine {
    ctx: Context,
}

impl Engine {
    pub fn new(
        delays: impl DelayGenerator + 'static,
        sink: impl NotificationSink + 'static,
    ) -> Self {
        Self {
            ctx: Context::new(delays, sink),
        }
    }

    pub fn with_context(ctx: Context) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.ctx
    }

    pub fn now(&self) -> SimTime {
        self.ctx.now()
    }

    pub fn sink(&self) -> &dyn NotificationSink {
        self.ctx.sink()
    }

    /// 取出类型为 `T` 的接收端（直接注册的，或 [`Broadcast`] 中的）。
    pub fn sink_as<T: NotificationSink>(&self) -> Option<&T> {
        let any = self.ctx.sink().as_any();
        any.downcast_ref::<T>()
            .or_else(|| any.downcast_ref::<Broadcast>().and_then(|b| b.find::<T>()))
    }

    pub fn delays(&self) -> &dyn DelayGenerator {
        self.ctx.delays()
    }

    /// 运行一次仿真。
    ///
    /// 返回 `true` 表示事件队列在时钟到达 `threshold` 之前自然排空。
    #[tracing::instrument(skip_all, fields(threshold = %threshold, advertisements = advertisements.len()))]
    pub fn simulate(
        &mut self,
        topology: &mut Topology,
        advertisements: &[Advertisement],
        threshold: SimTime,
    ) -> Result<bool, SimError> {
        self.ctx.scheduler_mut().reset();

        let seed = self.ctx.delays().seed();
        info!(seed, nodes = topology.len(), links = topology.links().len(), "▶️  开始仿真");
        self.ctx.notify(NotificationKind::Start {
            seed,
            topology: topology.summary(),
        });

        for adv in advertisements {
            self.ctx.schedule(
                adv.time,
                Advertise {
                    advertiser: adv.advertiser,
                    route: adv.route.clone(),
                },
            )?;
        }

        let mut event_count: u64 = 0;
        while self.ctx.scheduler().has_events() {
            let item = self.ctx.scheduler_mut().next_event()?;
            if self.ctx.now() >= threshold {
                info!(now = %self.ctx.now(), event_count, "⏱️  到达阈值，仿真未终止");
                self.ctx.notify(NotificationKind::ThresholdReached { threshold });
                return Ok(false);
            }
            event_count += 1;
            item.execute(&mut self.ctx, topology)?;
        }

        info!(final_time = %self.ctx.now(), event_count, "✅ 仿真终止");
        self.ctx.notify(NotificationKind::End {
            topology: topology.summary(),
        });
        Ok(true)
    }

    /// 为下一次重复实验做准备：清空队列、重置拓扑、更换时延种子。
    pub fn next_repetition(&mut self, topology: &mut Topology) {
        self.ctx.scheduler_mut().reset();
        topology.reset();
        self.ctx.delays_mut().generate_new_seed();
        debug!(seed = self.ctx.delays().seed(), "准备下一次重复");
    }
}
