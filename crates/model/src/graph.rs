use crate::types::PkgNode;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Duplicate package: {0}")]
    DuplicateNode(String),
    #[error("Unknown package: {0}")]
    UnknownNode(String),
    #[error("Package {parent} references missing child {child}")]
    DanglingChild { parent: String, child: String },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;

/// 包依赖图
///
/// 节点以完整名为键，迭代顺序无意义；需要稳定顺序时使用 [`PkgGraph::sorted_nodes`]。
/// 调用边允许成环，也允许自环。
#[derive(Debug, Clone, Default)]
pub struct PkgGraph {
    nodes: HashMap<String, PkgNode>,
}

impl PkgGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入节点，完整名重复时报错
    pub fn insert(&mut self, node: PkgNode) -> Result<()> {
        if self.nodes.contains_key(node.full_name()) {
            return Err(GraphError::DuplicateNode(node.full_name().to_string()));
        }
        self.nodes.insert(node.full_name().to_string(), node);
        Ok(())
    }

    /// 加入调用边 parent -> child
    ///
    /// `calls` 为 `None` 时不记录调用统计，权重取默认值。
    pub fn add_edge(&mut self, parent: &str, child: &str, calls: Option<u32>) -> Result<()> {
        let child_short = self
            .nodes
            .get(child)
            .map(|n| n.short_name().to_string())
            .ok_or_else(|| GraphError::UnknownNode(child.to_string()))?;

        let node = self
            .nodes
            .get_mut(parent)
            .ok_or_else(|| GraphError::UnknownNode(parent.to_string()))?;

        node.add_child(child);
        if let Some(count) = calls {
            node.record_calls(&child_short, count);
        }
        Ok(())
    }

    pub fn nodes(&self) -> &HashMap<String, PkgNode> {
        &self.nodes
    }

    pub fn node(&self, full_name: &str) -> Option<&PkgNode> {
        self.nodes.get(full_name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 全图函数声明总数，空图为 0
    pub fn total_func_decls(&self) -> u64 {
        self.nodes.values().map(|n| u64::from(n.func_decls())).sum()
    }

    /// 按完整名排序的节点
    pub fn sorted_nodes(&self) -> Vec<&PkgNode> {
        let mut sorted: Vec<_> = self.nodes.values().collect();
        sorted.sort_by(|a, b| a.full_name().cmp(b.full_name()));
        sorted
    }

    /// 解析节点的子节点，按完整名排序
    pub fn children(&self, node: &PkgNode) -> Result<Vec<&PkgNode>> {
        node.child_names()
            .map(|name| {
                self.nodes.get(name).ok_or_else(|| GraphError::DanglingChild {
                    parent: node.full_name().to_string(),
                    child: name.to_string(),
                })
            })
            .collect()
    }

    /// 边数 (parent, child) 对
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.child_names().count()).sum()
    }

    /// 检查悬空子节点引用，报告稳定顺序下的第一个
    pub fn validate(&self) -> Result<()> {
        for node in self.sorted_nodes() {
            self.children(node)?;
        }
        Ok(())
    }
}
