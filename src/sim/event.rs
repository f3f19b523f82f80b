//! 事件 trait
//!
//! 定义仿真事件接口。

use super::context::Context;
use crate::error::SimError;
use crate::net::Topology;

/// 事件：可被调度执行。使用 `self: Box<Self>` 以支持 move/所有权转移。
pub trait Event: Send + 'static {
    fn execute(self: Box<Self>, ctx: &mut Context, topology: &mut Topology)
    -> Result<(), SimError>;
}
