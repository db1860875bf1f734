use clap::Parser;
use anyhow::Result;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod modules;
mod payload;
mod error;

use cli::{Cli, Commands};
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).await?;

    // RUST_LOG wins, then --verbose, then the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new(&config.logging.level)
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!("🔮 Morph starting up...");

    match &cli.command {
        Commands::Payload(args) => {
            modules::payload::handle_command(args, &config).await?;
        }
        Commands::Config(args) => {
            crate::config::handle_command(args, cli.config.as_deref()).await?;
        }
        Commands::Version => {
            println!("Morph v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
