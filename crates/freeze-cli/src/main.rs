//! freeze - module closure and bundle configuration CLI

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use freeze_cli::cmd;
use freeze_cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Configure(args) => cmd::configure::configure(args).await,
        Commands::Toc {
            entry,
            graphs,
            json,
        } => cmd::toc::toc(&entry, &graphs, json),
        Commands::Show { config } => cmd::show::show(config).await,
    }
}
