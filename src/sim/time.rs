//! 仿真时间类型
//!
//! 定义逻辑时钟使用的时间戳。时间单位是抽象的整数刻度。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 仿真时间（逻辑刻度）。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// `self + delta`，溢出时饱和。
    pub fn after(self, delta: SimTime) -> SimTime {
        SimTime(self.0.saturating_add(delta.0))
    }

    /// 下一个刻度。
    pub fn next(self) -> SimTime {
        SimTime(self.0.saturating_add(1))
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for SimTime {
    fn from(t: u64) -> Self {
        SimTime(t)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
