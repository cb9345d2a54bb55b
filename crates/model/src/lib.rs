//! model - 包依赖图
//!
//! 只读的包图快照：节点、调用边与渲染所需的查询

mod graph;
mod snapshot;
mod types;

pub use graph::{GraphError, PkgGraph, Result};
pub use snapshot::{CallSnapshot, GraphSnapshot, NodeSnapshot};
pub use types::{PkgNode, DEFAULT_CALL_WEIGHT};
