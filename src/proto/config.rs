//! 协议配置

use crate::error::ConfigError;
use crate::sim::SimTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 协议变体：决定环路被检测到之后是否（以及如何）判定为"复发性环路"。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolKind {
    /// 普通 BGP：检测到环路只丢弃路由
    #[default]
    Bgp,
    /// SS-BGP（弱条件）
    SsBgp,
    /// ISS-BGP（强条件）
    IssBgp,
    SsBgp2,
    IssBgp2,
}

impl ProtocolKind {
    pub const ALL: [ProtocolKind; 5] = [
        ProtocolKind::Bgp,
        ProtocolKind::SsBgp,
        ProtocolKind::IssBgp,
        ProtocolKind::SsBgp2,
        ProtocolKind::IssBgp2,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProtocolKind::Bgp => "bgp",
            ProtocolKind::SsBgp => "ssbgp",
            ProtocolKind::IssBgp => "issbgp",
            ProtocolKind::SsBgp2 => "ssbgp2",
            ProtocolKind::IssBgp2 => "issbgp2",
        }
    }

    /// 是否属于 SS-BGP 族（检测到环路后可能禁用邻居）。
    pub fn detects_loops(self) -> bool {
        self != ProtocolKind::Bgp
    }
}

impl fmt::Display for ProtocolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProtocolKind {
    type Err = ConfigError;

    /// 不区分大小写，忽略 `-`/`_`，例如 `SS-BGP2`、`iss_bgp`。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        ProtocolKind::ALL
            .into_iter()
            .find(|k| k.label() == normalized)
            .ok_or_else(|| ConfigError::UnknownProtocol(s.to_string()))
    }
}

/// 每个节点的协议配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BgpConfig {
    pub kind: ProtocolKind,
    /// 为 0 时不启用 MRAI
    pub mrai: SimTime,
    /// 禁用邻居后多久重新启用；`None` 表示永不
    pub reenable_interval: Option<SimTime>,
}

impl BgpConfig {
    pub fn new(kind: ProtocolKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_mrai(mut self, mrai: SimTime) -> Self {
        self.mrai = mrai;
        self
    }

    pub fn with_reenable_interval(mut self, interval: SimTime) -> Self {
        self.reenable_interval = Some(interval);
        self
    }
}
