//! Market pulse CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use pulse_config::load_config;
use pulse_monitor::{setup_logging, LogFormat};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::ValidateConfig = cli.command {
        return cli::commands::validate::run(&cli.config).await;
    }

    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {:?}", cli.config))?;
    config.validate()?;

    // Setup logging
    let level = cli
        .log_level
        .map(|l| l.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    setup_logging(&level, LogFormat::resolve(cli.json_logs, &config.logging.format))
        .context("Failed to initialize logging")?;

    // Execute command
    match cli.command {
        Commands::Serve(args) => cli::commands::serve::run(args, config).await,
        Commands::Snapshot(args) => cli::commands::snapshot::run(args, &config).await,
        Commands::News => cli::commands::news::run(&config).await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config).await,
    }
}
