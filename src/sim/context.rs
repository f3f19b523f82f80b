//! 仿真上下文
//!
//! 每次运行构造一个，显式传给所有组件：调度器、时延生成器与通知接收端。

use super::delay::{DelayGenerator, NoDelay};
use super::event::Event;
use super::scheduler::Scheduler;
use super::time::SimTime;
use crate::error::SimError;
use crate::notify::{Discard, Notification, NotificationKind, NotificationSink};

pub struct Context {
    scheduler: Scheduler,
    delays: Box<dyn DelayGenerator>,
    sink: Box<dyn NotificationSink>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new(NoDelay, Discard)
    }
}

impl Context {
    pub fn new(
        delays: impl DelayGenerator + 'static,
        sink: impl NotificationSink + 'static,
    ) -> Self {
        Self::from_boxed(Box::new(delays), Box::new(sink))
    }

    pub fn from_boxed(
        delays: Box<dyn DelayGenerator>,
        sink: Box<dyn NotificationSink>,
    ) -> Self {
        Self {
            scheduler: Scheduler::default(),
            delays,
            sink,
        }
    }

    /// 当前逻辑时钟
    pub fn now(&self) -> SimTime {
        self.scheduler.now()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Scheduler {
        &mut self.scheduler
    }

    pub fn schedule<E: Event>(&mut self, at: SimTime, ev: E) -> Result<(), SimError> {
        self.scheduler.schedule(at, ev)
    }

    pub fn next_delay(&mut self) -> SimTime {
        self.delays.next_delay()
    }

    pub fn delays(&self) -> &dyn DelayGenerator {
        self.delays.as_ref()
    }

    pub fn delays_mut(&mut self) -> &mut dyn DelayGenerator {
        self.delays.as_mut()
    }

    pub fn sink(&self) -> &dyn NotificationSink {
        self.sink.as_ref()
    }

    pub fn sink_mut(&mut self) -> &mut dyn NotificationSink {
        self.sink.as_mut()
    }

    /// 以当前时钟为时间戳广播一条通知。
    pub fn notify(&mut self, kind: NotificationKind) {
        let n = Notification {
            time: self.scheduler.now(),
            kind,
        };
        self.sink.handle(&n);
    }
}
