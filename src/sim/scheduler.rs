//! 调度器
//!
//! 维护逻辑时钟与按时间排序的事件队列。时钟只在弹出事件时前进。

use super::event::Event;
use super::scheduled_event::ScheduledEvent;
use super::time::SimTime;
use crate::error::SimError;
use std::collections::BinaryHeap;
use tracing::{debug, trace};

/// 事件调度器：维护当前时间与事件队列。
#[derive(Default)]
pub struct Scheduler {
    now: SimTime,
    next_seq: u64,
    q: BinaryHeap<ScheduledEvent>,
}

impl Scheduler {
    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 队列中剩余的事件数
    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn has_events(&self) -> bool {
        !self.q.is_empty()
    }

    /// 调度事件在指定时间执行。
    ///
    /// `at` 早于当前时钟时返回 [`SimError::OutOfOrderScheduling`]。
    #[tracing::instrument(level = "trace", skip(self, ev), fields(event_type = std::any::type_name::<E>(), schedule_at = %at))]
    pub fn schedule<E: Event>(&mut self, at: SimTime, ev: E) -> Result<(), SimError> {
        if at < self.now {
            return Err(SimError::OutOfOrderScheduling { at, now: self.now });
        }

        let seq = self.next_seq;
        trace!(now = %self.now, seq, "调度事件");

        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push(ScheduledEvent {
            at,
            seq,
            ev: Box::new(ev),
        });

        trace!(queue_size = self.q.len(), "事件已加入队列");
        Ok(())
    }

    /// 弹出时间最早的事件，并把时钟推进到该事件的时间。
    pub fn next_event(&mut self) -> Result<ScheduledEvent, SimError> {
        let item = self.q.pop().ok_or(SimError::EmptyQueue)?;
        self.now = item.at;
        trace!(
            now = %self.now,
            seq = item.seq,
            remaining_queue = self.q.len(),
            "弹出事件"
        );
        Ok(item)
    }

    /// 清空队列并把时钟归零。
    pub fn reset(&mut self) {
        debug!(dropped = self.q.len(), "重置调度器");
        self.q.clear();
        self.now = SimTime::ZERO;
        self.next_seq = 0;
    }
}
