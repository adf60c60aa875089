mod cli;
mod commands;
mod error;
mod mcp;
mod page_range;
mod pdf;
mod pipeline;
mod transform;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries text dumps and the MCP transport.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "pagecut=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Mcp => {
            mcp::run_server().await?;
        }
        Commands::Info { path } => {
            commands::info::run(&path).await?;
        }
        Commands::Extract {
            path,
            pages,
            output,
            output_dir,
        } => {
            commands::extract::run(&path, &pages, output, &output_dir).await?;
        }
        Commands::Text {
            path,
            pages,
            output,
        } => {
            commands::text::run(&path, &pages, output).await?;
        }
    }

    Ok(())
}
