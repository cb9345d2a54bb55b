//! grapher - package graph rendering toolkit

mod graphml_cli;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grapher")]
#[command(about = "Render package dependency graphs for graph editors", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a graph snapshot as GraphML (yEd)
    Graphml(graphml_cli::GraphmlArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout 只输出文档，日志走 stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Graphml(args) => graphml_cli::run(args).await?,
    }

    Ok(())
}
