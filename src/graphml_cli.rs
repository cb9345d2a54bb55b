//! graphml subcommand - GraphML export

use anyhow::Context;
use clap::Args;
use model::PkgGraph;
use printers::{GraphMlPrinter, RenderConfig};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

#[derive(Args, Debug)]
pub struct GraphmlArgs {
    /// Graph snapshot (JSON)
    pub input: PathBuf,
    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Base node size [env: GRAPHER_NODE_SIZE]
    #[arg(long)]
    pub node_size: Option<f64>,
    /// Max size added for a node's share of function declarations [env: GRAPHER_NODE_SIZE_BOOST]
    #[arg(long)]
    pub node_size_boost: Option<f64>,
}

impl GraphmlArgs {
    /// 命令行参数覆盖环境变量
    fn render_config(&self) -> RenderConfig {
        let mut config = RenderConfig::from_env();
        if let Some(size) = self.node_size {
            config.node_size = size;
        }
        if let Some(boost) = self.node_size_boost {
            config.node_size_boost = boost;
        }
        config
    }
}

pub async fn run(args: GraphmlArgs) -> anyhow::Result<()> {
    let graph = load_graph(&args.input).await?;
    tracing::info!(
        "Loaded {} packages, {} edges from {}",
        graph.len(),
        graph.edge_count(),
        args.input.display()
    );

    let printer = GraphMlPrinter::new(args.render_config());
    let document = printer
        .render(&graph)
        .with_context(|| format!("Failed to render {}", args.input.display()))?;

    match &args.output {
        Some(file) => {
            tokio::fs::write(file, &document)
                .await
                .with_context(|| format!("Failed to write {}", file.display()))?;
            tracing::info!("Saved to: {}", file.display());
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(document.as_bytes()).await?;
            stdout.flush().await?;
        }
    }

    Ok(())
}

async fn load_graph(path: &Path) -> anyhow::Result<PkgGraph> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    PkgGraph::from_json_str(&text).with_context(|| format!("Invalid graph snapshot {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SNAPSHOT: &str = r#"{
        "nodes": [
            { "name": "A", "func_decls": 10, "calls": [{ "target": "B", "count": 3 }] },
            { "name": "B", "func_decls": 5 }
        ]
    }"#;

    fn args(input: PathBuf, output: Option<PathBuf>) -> GraphmlArgs {
        GraphmlArgs {
            input,
            output,
            node_size: Some(20.0),
            node_size_boost: Some(10.0),
        }
    }

    #[test]
    fn test_flags_override_config() {
        let config = args(PathBuf::from("unused.json"), None).render_config();
        assert_eq!(config.node_size, 20.0);
        assert_eq!(config.node_size_boost, 10.0);
    }

    #[tokio::test]
    async fn test_run_writes_graphml_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("graph.json");
        let output = dir.path().join("graph.graphml");
        fs::write(&input, SNAPSHOT).unwrap();

        run(args(input, Some(output.clone()))).await.unwrap();

        let document = fs::read_to_string(&output).unwrap();
        assert!(document.contains(r#"<y:Geometry height="26.67" width="26.67"/>"#));
        assert!(document.contains(r#"<y:Geometry height="23.33" width="23.33"/>"#));
        assert!(document.contains(r#"<edge id="0" source="A" target="B">"#));
        assert!(document.contains(r#"<data key="d2">3</data>"#));
    }

    #[tokio::test]
    async fn test_run_rejects_dangling_snapshot() {
        let dir = tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("graph.json");
        let output = dir.path().join("graph.graphml");
        fs::write(&input, r#"{"nodes":[{"name":"A","calls":[{"target":"Z"}]}]}"#).unwrap();

        let err = run(args(input, Some(output.clone()))).await.unwrap_err();
        assert!(format!("{err:#}").contains("Z"));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_run_missing_input() {
        let dir = tempdir().expect("Failed to create temp dir");
        let err = run(args(dir.path().join("nope.json"), None)).await.unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
