use crate::config::RenderConfig;
use crate::xml::{self, XmlWriter};
use crate::{RenderError, Result};
use model::{PkgGraph, PkgNode, DEFAULT_CALL_WEIGHT};

const GRAPHML_NS: &str = "http://graphml.graphdrawing.org/xmlns";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const YFILES_NS: &str = "http://www.yworks.com/xml/graphml";
const YED_NS: &str = "http://www.yworks.com/xml/yed/3";
const SCHEMA_LOCATION: &str =
    "http://graphml.graphdrawing.org/xmlns http://www.yworks.com/xml/schema/graphml/1.1/ygraphml.xsd";

/// 节点图形数据的 key
pub const NODE_GRAPHICS_KEY: &str = "d1";
/// 边权重的 key
pub const WEIGHT_KEY: &str = "d2";

/// GraphML 生成器
///
/// 输出带 yEd 图形扩展的 GraphML 文档。节点为椭圆，边长随本包函数声明数在全图中的占比增长；
/// 边携带调用次数作为 `weight`。节点按完整名排序，边按 (父, 子) 完整名排序并从 0 编号，
/// 同一快照多次渲染得到逐字节相同的结果。
pub struct GraphMlPrinter {
    config: RenderConfig,
}

impl GraphMlPrinter {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// 渲染完整文档；悬空引用或名字含 XML 不允许的字符时整体失败，不产出部分文档
    pub fn render(&self, graph: &PkgGraph) -> Result<String> {
        self.check_config()?;
        graph.validate()?;
        Self::check_names(graph)?;

        let total = graph.total_func_decls();
        let nodes = graph.sorted_nodes();

        let mut w = XmlWriter::new();
        w.start(
            "graphml",
            &[
                ("xmlns", GRAPHML_NS),
                ("xmlns:xsi", XSI_NS),
                ("xmlns:y", YFILES_NS),
                ("xmlns:yed", YED_NS),
                ("xsi:schemaLocation", SCHEMA_LOCATION),
            ],
        );
        Self::write_keys(&mut w);

        w.start("graph", &[("id", "G"), ("edgedefault", "directed")]);

        for node in &nodes {
            let size = self.node_size(node.func_decls(), total);
            Self::write_node(&mut w, node, size);
        }

        let mut id = 0usize;
        for parent in &nodes {
            for child in graph.children(parent)? {
                let weight = parent.call_weight(child.short_name());
                Self::write_edge(&mut w, id, parent, child, weight);
                id += 1;
            }
        }

        w.end();

        tracing::debug!(
            nodes = nodes.len(),
            edges = id,
            total_func_decls = total,
            "graphml rendered"
        );

        Ok(w.build())
    }

    /// 节点边长: node_size + boost * (func_decls / total)，total 为 0 时只取基础边长
    pub fn node_size(&self, func_decls: u32, total: u64) -> f64 {
        let ratio = if total == 0 {
            0.0
        } else {
            f64::from(func_decls) / total as f64
        };
        self.config.node_size + self.config.node_size_boost * ratio
    }

    fn check_config(&self) -> Result<()> {
        for (name, value) in [
            ("node_size", self.config.node_size),
            ("node_size_boost", self.config.node_size_boost),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RenderError::InvalidSize { name, value });
            }
        }
        Ok(())
    }

    fn check_names(graph: &PkgGraph) -> Result<()> {
        for node in graph.sorted_nodes() {
            if let Some(ch) = xml::find_invalid_char(node.full_name()) {
                return Err(RenderError::InvalidName {
                    name: node.full_name().to_string(),
                    ch,
                });
            }
        }
        Ok(())
    }

    fn write_keys(w: &mut XmlWriter) {
        w.empty(
            "key",
            &[
                ("for", "node"),
                ("id", NODE_GRAPHICS_KEY),
                ("yfiles.type", "nodegraphics"),
            ],
        );
        w.start(
            "key",
            &[
                ("attr.name", "weight"),
                ("attr.type", "int"),
                ("for", "edge"),
                ("id", WEIGHT_KEY),
            ],
        );
        w.text("default", &[], &DEFAULT_CALL_WEIGHT.to_string());
        w.end();
    }

    fn write_node(w: &mut XmlWriter, node: &PkgNode, size: f64) {
        let size = format!("{size:.2}");
        w.start("node", &[("id", node.full_name())]);
        w.start("data", &[("key", NODE_GRAPHICS_KEY)]);
        w.start("y:ShapeNode", &[]);
        w.empty("y:Geometry", &[("height", size.as_str()), ("width", size.as_str())]);
        w.text("y:NodeLabel", &[], node.full_name());
        w.empty("y:Shape", &[("type", "ellipse")]);
        w.end().end().end();
    }

    fn write_edge(w: &mut XmlWriter, id: usize, source: &PkgNode, target: &PkgNode, weight: u32) {
        let id = id.to_string();
        w.start(
            "edge",
            &[
                ("id", id.as_str()),
                ("source", source.full_name()),
                ("target", target.full_name()),
            ],
        );
        w.text("data", &[("key", WEIGHT_KEY)], &weight.to_string());
        w.end();
    }
}

impl Default for GraphMlPrinter {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}
