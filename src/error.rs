//! 错误类型
//!
//! - [`SimError`]：违反调用约定（致命，不做恢复）
//! - [`TopologyError`]：拓扑构建失败
//! - [`ConfigError`]：输入/配置层错误

use crate::net::NodeId;
use crate::sim::SimTime;
use thiserror::Error;

/// 仿真核心的契约错误。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    /// 试图把事件调度到当前时钟之前
    #[error("out-of-order scheduling: event at {at} but the clock is already at {now}")]
    OutOfOrderScheduling { at: SimTime, now: SimTime },
    /// 事件队列为空
    #[error("the event queue is empty")]
    EmptyQueue,
    /// 启动一个仍在运行的定时器
    #[error("timer is already running")]
    TimerAlreadyRunning,
    /// 事件引用了拓扑中不存在的节点
    #[error("node {0} is not part of the topology")]
    UnknownNode(NodeId),
    /// 消息沿着一条不存在的链路到达
    #[error("no link from {tail} to {head}")]
    UnknownLink { tail: NodeId, head: NodeId },
}

/// 拓扑构建错误。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopologyError {
    #[error("node {0} was already added")]
    DuplicateNode(NodeId),
    #[error("link from {tail} to {head} was already added")]
    DuplicateLink { tail: NodeId, head: NodeId },
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),
    #[error("node {0} cannot link to itself")]
    SelfLink(NodeId),
}

/// 配置/输入错误（由 I/O 层处理）。
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown extender label `{label}` for the {policy} policy")]
    UnknownLabel { label: String, policy: &'static str },
    #[error("unknown protocol `{0}`")]
    UnknownProtocol(String),
    #[error("invalid delay range: min {min} is greater than max {max}")]
    InvalidDelayRange { min: u64, max: u64 },
    #[error("invalid topology: {0}")]
    Topology(#[from] TopologyError),
    #[error("advertisement references unknown node {0}")]
    UnknownAdvertiser(NodeId),
    #[error("malformed topology file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cannot read topology file: {0}")]
    Io(#[from] std::io::Error),
}
