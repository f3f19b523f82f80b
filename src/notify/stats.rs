//! 单次运行的统计信息

use super::sink::NotificationSink;
use super::types::{Notification, NotificationKind};
use crate::sim::SimTime;
use serde::Serialize;
use std::any::Any;

/// 每次 Start 时清零。
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub seed: u64,
    /// `None` 表示运行尚未结束
    pub terminated: Option<bool>,
    pub end_time: SimTime,
    /// 最后一条消息到达的时间（收敛时间）
    pub last_message_time: SimTime,
    pub messages_sent: u64,
    pub messages_received: u64,
    pub exports: u64,
    pub selections: u64,
    pub detections: u64,
    pub reenables: u64,
}

impl NotificationSink for RunStats {
    fn handle(&mut self, n: &Notification) {
        match &n.kind {
            NotificationKind::Start { seed, .. } => {
                *self = RunStats {
                    seed: *seed,
                    ..RunStats::default()
                };
            }
            NotificationKind::End { .. } => {
                self.terminated = Some(true);
                self.end_time = n.time;
            }
            NotificationKind::ThresholdReached { .. } => {
                self.terminated = Some(false);
                self.end_time = n.time;
            }
            NotificationKind::MessageSent { .. } => self.messages_sent += 1,
            NotificationKind::MessageReceived { .. } => {
                self.messages_received += 1;
                self.last_message_time = n.time;
            }
            NotificationKind::Export { .. } => self.exports += 1,
            NotificationKind::Select { .. } => self.selections += 1,
            NotificationKind::Detect { .. } => self.detections += 1,
            NotificationKind::ReEnable { .. } => self.reenables += 1,
            NotificationKind::Import { .. } | NotificationKind::Learn { .. } => {}
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
