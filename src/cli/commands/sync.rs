//! Sync command implementation.

use anyhow::{Context, Result};
use bourse_data::{CsvPriceStore, MseHistorySource};
use bourse_sync::{CancellationFlag, RunSummary, SyncRunner, Synchronizer};
use chrono::Local;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::cli::{OutputFormat, SyncArgs};

pub async fn run(args: SyncArgs, config_path: &Path, cancel: CancellationFlag) -> Result<()> {
    let config = super::load(config_path)?;

    let source = MseHistorySource::new(config.source.mse_config())
        .context("Failed to create history source")?;
    let store = CsvPriceStore::new(&config.storage.data_dir);
    info!(data_dir = %store.data_dir().display(), "Using CSV store");

    let synchronizer = Synchronizer::new(Arc::new(source), config.sync.policy())
        .with_retry(config.sync.retry_policy())
        .with_cancellation(cancel.clone());
    let runner = SyncRunner::new(synchronizer, Arc::new(store))
        .with_concurrency(args.concurrency.unwrap_or(config.sync.concurrency));

    let today = Local::now().date_naive();
    let summary = if args.symbols.is_empty() {
        runner
            .with_directory(super::directory(&config)?)
            .run_all(today)
            .await
            .context("Failed to list symbols")?
    } else {
        runner.run(super::parse_symbols(&args.symbols)?, today).await
    };

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => print_summary(&summary),
    }

    if cancel.is_cancelled() {
        anyhow::bail!("Sync interrupted");
    }
    if summary.has_failures() {
        anyhow::bail!("{} of {} symbols failed", summary.failed(), summary.total());
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("═══════════════════════════════════════════════════════════");
    println!("                        SYNC SUMMARY");
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!(
        "  {:<8} {:>8} {:>12} {:>6} {:>8}  {}",
        "Symbol", "New", "Frontier", "OK", "Skipped", "Status"
    );
    println!("  ───────────────────────────────────────────────────────");

    for report in &summary.reports {
        let frontier = report
            .frontier
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let status = match &report.error {
            None => "ok".to_string(),
            Some(e) => format!("FAILED: {}", e),
        };
        println!(
            "  {:<8} {:>8} {:>12} {:>6} {:>8}  {}",
            report.symbol.as_str(),
            report.new_records,
            frontier,
            report.chunks_ok,
            report.chunks_skipped,
            status
        );
    }

    println!();
    println!(
        "  Symbols: {}   Succeeded: {}   Failed: {}   New records: {}   Elapsed: {:.1}s",
        summary.total(),
        summary.succeeded(),
        summary.failed(),
        summary.new_records(),
        summary.elapsed.as_secs_f64()
    );
    println!("═══════════════════════════════════════════════════════════");
}
