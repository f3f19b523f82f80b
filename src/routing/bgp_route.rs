//! BGP 路由：LOCAL-PREF + AS-PATH

use super::path::Path;
use super::route::Route;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// 不可变的 BGP 路由。
///
/// 偏好：LOCAL-PREF 越高越好；相同时 AS-PATH 越短越好。
/// 无效路由的 LOCAL-PREF 为 `i32::MIN`，路径为空。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BgpRoute {
    local_pref: i32,
    as_path: Path,
}

impl BgpRoute {
    /// 构造一条有效路由。`local_pref == i32::MIN` 会得到无效路由。
    pub fn new(local_pref: i32, as_path: impl Into<Path>) -> Self {
        if local_pref == i32::MIN {
            return Self::invalid();
        }
        Self {
            local_pref,
            as_path: as_path.into(),
        }
    }

    pub fn invalid() -> Self {
        Self {
            local_pref: i32::MIN,
            as_path: Path::empty(),
        }
    }

    pub fn local_pref(&self) -> i32 {
        self.local_pref
    }

    pub fn as_path(&self) -> &Path {
        &self.as_path
    }

    pub fn is_valid(&self) -> bool {
        self.local_pref != i32::MIN
    }
}

impl Route for BgpRoute {
    fn invalid() -> Self {
        BgpRoute::invalid()
    }

    fn is_valid(&self) -> bool {
        BgpRoute::is_valid(self)
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.local_pref
            .cmp(&other.local_pref)
            .then_with(|| other.as_path.len().cmp(&self.as_path.len()))
    }
}

impl fmt::Display for BgpRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "({}, {})", self.local_pref, self.as_path)
        } else {
            write!(f, "•")
        }
    }
}
