//! bourse CLI application.

mod cli;

use anyhow::{Context, Result};
use bourse_config::load_config;
use bourse_monitor::setup_logging;
use bourse_sync::CancellationFlag;
use clap::Parser;
use cli::{Cli, Commands};
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging settings come from the config file unless overridden on the
    // command line. A broken config file is reported by the command itself.
    let logging = load_config(&cli.config)
        .map(|c| c.logging)
        .unwrap_or_default();
    let level = cli
        .log_level
        .map(|l| l.as_str().to_string())
        .unwrap_or_else(|| logging.level.clone());
    let json = cli.json_logs || logging.is_json();
    let log_dir = cli
        .log_dir
        .clone()
        .or_else(|| logging.file.as_ref().map(Into::into));
    let _guard =
        setup_logging(&level, json, log_dir.as_deref()).context("Failed to initialise logging")?;

    // First Ctrl-C stops new chunks from starting.
    let cancel = CancellationFlag::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, stopping after in-flight requests");
                cancel.cancel();
            }
        });
    }

    match cli.command {
        Commands::Sync(args) => cli::commands::sync::run(args, &cli.config, cancel).await,
        Commands::Analyze(args) => cli::commands::analyze::run(args, &cli.config).await,
        Commands::Symbols(args) => cli::commands::symbols::run(args, &cli.config).await,
        Commands::Plan(args) => cli::commands::plan::run(args, &cli.config).await,
        Commands::Indicators => cli::commands::indicators::run().await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config).await,
    }
}
