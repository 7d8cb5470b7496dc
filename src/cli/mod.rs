//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bourse")]
#[command(author, version, about = "Incremental stock-exchange history sync and technical signals")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level (overrides the config file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    /// Also write daily rolling log files to this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch missing history for every symbol, or the given ones
    Sync(SyncArgs),
    /// Compute indicators and signals from stored history
    Analyze(AnalyzeArgs),
    /// List the symbols a sync would cover
    Symbols(SymbolsArgs),
    /// Show the chunks a sync would request for a symbol
    Plan(PlanArgs),
    /// List available indicators
    Indicators,
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct SyncArgs {
    /// Symbols to sync (comma-separated); defaults to the configured list or the exchange directory
    #[arg(short = 'S', long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Symbols synced at once
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Output format (text, json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Symbol to analyze
    pub symbol: String,

    /// Trailing period, e.g. "1 year", "1mo", "all"
    #[arg(short, long)]
    pub period: Option<String>,

    /// Output format (text, json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Save the JSON report to a file
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct SymbolsArgs {
    /// List symbols with stored history instead of asking the exchange
    #[arg(long)]
    pub stored: bool,
}

#[derive(clap::Args)]
pub struct PlanArgs {
    /// Symbol to plan
    pub symbol: String,
}
