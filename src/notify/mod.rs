//! 通知总线
//!
//! 核心在关键步骤发出不可变、带时间戳的通知记录，由外部数据收集器消费。
//! - **解耦**：核心只依赖 [`NotificationSink`] 接口
//! - **结构化**：记录可直接序列化为 JSON

mod sink;
mod stats;
mod types;

pub use sink::{Broadcast, Discard, NotificationLog, NotificationSink};
pub use stats::RunStats;
pub use types::{Notification, NotificationKind, TopologySummary};
