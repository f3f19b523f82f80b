//! 路由抽象

use std::cmp::Ordering;
use std::fmt::Debug;

/// 路由：要么有效，要么是唯一的无效路由（偏好序的最小元）。
///
/// `compare` 给出偏好全序（`Greater` 表示更偏好）。它与 `PartialEq` 不同：
/// 两条不同的路由可以同样偏好。
pub trait Route: Clone + PartialEq + Debug {
    fn invalid() -> Self;

    fn is_valid(&self) -> bool;

    fn compare(&self, other: &Self) -> Ordering;
}
