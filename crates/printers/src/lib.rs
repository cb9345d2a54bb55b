//! printers - 图输出
//!
//! 将包依赖图渲染为带 yEd 扩展的 GraphML

mod config;
mod graphml;
pub mod xml;

pub use config::RenderConfig;
pub use graphml::{GraphMlPrinter, NODE_GRAPHICS_KEY, WEIGHT_KEY};

use model::{GraphError, PkgGraph};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
    #[error("Invalid {name}: {value}")]
    InvalidSize { name: &'static str, value: f64 },
    #[error("Package name {name:?} contains character {ch:?} not allowed in XML")]
    InvalidName { name: String, ch: char },
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// 使用默认配置渲染 GraphML
pub fn render_graphml(graph: &PkgGraph) -> Result<String> {
    GraphMlPrinter::default().render(graph)
}
