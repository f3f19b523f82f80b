//! 单次、可重启的倒计时定时器
//!
//! 定时器本身不持有回调闭包：到期事件携带 `(node, kind, epoch)`，
//! 由拥有该定时器的协议实例按 [`TimerKind`] 分派回调。

use super::context::Context;
use super::time::SimTime;
use crate::error::SimError;
use crate::net::{NodeId, TimerExpired};
use serde::Serialize;
use tracing::trace;

/// 定时器用途，决定到期时执行哪个回调。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// MRAI：到期后重新尝试导出
    Mrai,
    /// 环路检测后重新启用被禁用的邻居
    Reenable,
}

/// 定时器状态：`expired` 或 `running`。
#[derive(Debug, Clone)]
pub struct Timer {
    duration: SimTime,
    expired: bool,
    /// 每次 `start` 递增；用于丢弃已取消/过期的到期事件
    epoch: u64,
}

impl Timer {
    /// 创建一个禁用的定时器（时长为 0）。
    pub fn disabled() -> Self {
        Self::new(SimTime::ZERO)
    }

    /// 创建一个处于 expired 状态、时长为 `duration` 的定时器。
    pub fn new(duration: SimTime) -> Self {
        Self {
            duration,
            expired: true,
            epoch: 0,
        }
    }

    pub fn duration(&self) -> SimTime {
        self.duration
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    pub fn is_running(&self) -> bool {
        !self.expired
    }

    /// 启动定时器：在 `now + duration` 调度一次到期事件。
    ///
    /// 只能在 expired 状态下调用。
    pub fn start(
        &mut self,
        node: NodeId,
        kind: TimerKind,
        ctx: &mut Context,
    ) -> Result<(), SimError> {
        if !self.expired {
            return Err(SimError::TimerAlreadyRunning);
        }
        self.epoch = self.epoch.wrapping_add(1);
        let at = ctx.now().after(self.duration);
        ctx.schedule(
            at,
            TimerExpired {
                node,
                kind,
                epoch: self.epoch,
            },
        )?;
        self.expired = false;
        trace!(node = %node, ?kind, at = %at, epoch = self.epoch, "定时器启动");
        Ok(())
    }

    /// 强制回到 expired 状态，已排队的到期事件不会触发回调。
    pub fn cancel(&mut self) {
        self.expired = true;
    }

    /// 到期事件到达时调用：只有仍在运行且 epoch 匹配时才返回 `true`，
    /// 此时定时器先被标记为 expired，调用方随后执行回调。
    pub(crate) fn fire(&mut self, epoch: u64) -> bool {
        if self.expired || epoch != self.epoch {
            return false;
        }
        self.expired = true;
        true
    }

    /// 取消并恢复到初始状态（保留时长）。
    pub fn reset(&mut self) {
        self.cancel();
    }
}
