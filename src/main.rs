//! dimg CLI entry point
//!
//! Find a Docker Hub tag interactively and pull it.

use clap::Parser;
use dimg::cli::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Keep the interactive screen quiet unless asked otherwise
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    dimg::cli::execute(cli).await
}
