//! 仿真核心模块
//!
//! 此模块包含离散事件仿真的核心组件：仿真时间、事件、调度器、定时器、
//! 时延生成器以及把它们串起来的上下文。

// 子模块声明
mod context;
mod delay;
mod event;
mod scheduled_event;
mod scheduler;
mod time;
mod timer;

// 重新导出公共接口
pub use context::Context;
pub use delay::{DelayGenerator, NoDelay, RandomDelay};
pub use event::Event;
pub use scheduled_event::ScheduledEvent;
pub use scheduler::Scheduler;
pub use time::SimTime;
pub use timer::{Timer, TimerKind};
