//! 标识符类型
//!
//! 定义节点和链路的唯一标识符。节点的相等与哈希只看 ID。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 节点标识符
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(pub usize);

/// 链路标识符（拓扑内的下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
