//! Plan command: show the chunks a sync would request.

use anyhow::{Context, Result};
use bourse_core::date_format;
use bourse_core::traits::PriceStore;
use bourse_data::CsvPriceStore;
use bourse_sync::{SyncMode, SyncPlan};
use chrono::Local;
use std::path::Path;

use crate::cli::PlanArgs;

pub async fn run(args: PlanArgs, config_path: &Path) -> Result<()> {
    let config = super::load(config_path)?;
    let symbol = super::parse_symbol(&args.symbol)?;

    let store = CsvPriceStore::new(&config.storage.data_dir);
    let frontier = store
        .load_frontier(&symbol)
        .await
        .with_context(|| format!("Failed to read stored history for {}", symbol))?;

    let today = Local::now().date_naive();
    let plan = SyncPlan::new(frontier, today, &config.sync.policy());

    println!("Sync plan for {} (today {})", symbol, today);
    match plan.mode {
        SyncMode::Backfill => println!("Mode: backfill (no stored history)"),
        SyncMode::Resume { last_confirmed } => {
            println!("Mode: resume after {}", last_confirmed)
        }
    }
    println!();

    if plan.is_empty() {
        println!("Up to date, nothing to request.");
        return Ok(());
    }

    println!("  {:>3}  {:<12} {:<12} {:>6}", "#", "FromDate", "ToDate", "Days");
    for (i, range) in plan.chunks.iter().enumerate() {
        println!(
            "  {:>3}  {:<12} {:<12} {:>6}",
            i + 1,
            date_format::to_request_format(range.from()),
            date_format::to_request_format(range.to()),
            range.days()
        );
    }

    Ok(())
}
