//! 图快照 - 构图方交付的 JSON 格式
//!
//! ```json
//! {
//!   "nodes": [
//!     { "name": "x/a", "func_decls": 10, "calls": [{ "target": "x/b", "count": 3 }] },
//!     { "name": "x/b", "func_decls": 5 }
//!   ]
//! }
//! ```

use crate::graph::{GraphError, PkgGraph, Result};
use crate::types::PkgNode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub nodes: Vec<NodeSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// 完整名
    pub name: String,
    /// 短名，缺省时取完整名最后一段
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default)]
    pub func_decls: u32,
    #[serde(default)]
    pub calls: Vec<CallSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallSnapshot {
    /// 被调用包的完整名
    pub target: String,
    /// 调用点数量，缺省时不记录统计
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl TryFrom<GraphSnapshot> for PkgGraph {
    type Error = GraphError;

    fn try_from(snapshot: GraphSnapshot) -> Result<Self> {
        let mut graph = PkgGraph::new();
        let mut edges = Vec::new();

        for node in snapshot.nodes {
            let mut pkg = PkgNode::new(node.name.clone(), node.func_decls);
            if let Some(short) = node.short_name {
                pkg = pkg.with_short_name(short);
            }
            graph.insert(pkg)?;
            edges.extend(node.calls.into_iter().map(|c| (node.name.clone(), c)));
        }

        // 节点全部就位后再连边，调用目标可以出现在调用方之后
        for (parent, call) in edges {
            graph
                .add_edge(&parent, &call.target, call.count)
                .map_err(|e| match e {
                    GraphError::UnknownNode(child) if child == call.target => {
                        GraphError::DanglingChild { parent: parent.clone(), child }
                    }
                    other => other,
                })?;
        }

        tracing::debug!(
            nodes = graph.len(),
            edges = graph.edge_count(),
            "graph built from snapshot"
        );
        Ok(graph)
    }
}

impl PkgGraph {
    /// 从 JSON 快照构建图
    pub fn from_json_str(text: &str) -> Result<Self> {
        let snapshot: GraphSnapshot = serde_json::from_str(text)?;
        Self::try_from(snapshot)
    }
}
