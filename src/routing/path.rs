//! AS-PATH
//!
//! 节点按穿越顺序追加在末尾：第一个元素是目的节点，最后一个元素是最近的发送方。

use crate::net::NodeId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<NodeId>);

impl Path {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.0.iter()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.0.contains(&node)
    }

    /// 返回在末尾追加 `node` 后的新路径。
    pub fn append(&self, node: NodeId) -> Path {
        let mut nodes = Vec::with_capacity(self.0.len() + 1);
        nodes.extend_from_slice(&self.0);
        nodes.push(node);
        Path(nodes)
    }

    /// `node` 第一次出现之前的前缀（不含 `node`）；`node` 不在路径中时返回整条路径。
    pub fn sub_path_before(&self, node: NodeId) -> Path {
        match self.0.iter().position(|&n| n == node) {
            Some(idx) => Path(self.0[..idx].to_vec()),
            None => self.clone(),
        }
    }
}

impl From<Vec<NodeId>> for Path {
    fn from(nodes: Vec<NodeId>) -> Self {
        Path(nodes)
    }
}

impl FromIterator<NodeId> for Path {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, n) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{n}")?;
        }
        write!(f, "]")
    }
}
