//! Analyze command implementation.

use anyhow::{Context, Result};
use bourse_core::traits::PriceStore;
use bourse_core::types::TimePeriod;
use bourse_data::CsvPriceStore;
use bourse_indicators::IndicatorEngine;
use bourse_signals::Analyzer;
use chrono::Local;
use std::path::Path;
use tracing::info;

use crate::cli::{AnalyzeArgs, OutputFormat};

pub async fn run(args: AnalyzeArgs, config_path: &Path) -> Result<()> {
    let config = super::load(config_path)?;
    let symbol = super::parse_symbol(&args.symbol)?;
    let period = match &args.period {
        Some(label) => label.parse::<TimePeriod>().map_err(anyhow::Error::msg)?,
        None => config.analysis.default_period,
    };

    let store = CsvPriceStore::new(&config.storage.data_dir);
    let series = store
        .load_series(&symbol)
        .await
        .with_context(|| format!("Failed to load stored history for {}", symbol))?;
    if series.is_empty() {
        anyhow::bail!(
            "No stored history for {}. Run `bourse sync -S {}` first.",
            symbol,
            symbol
        );
    }
    info!(symbol = %symbol, records = series.len(), period = %period, "Analyzing");

    let analyzer = Analyzer::new(IndicatorEngine::new(), config.signals.clone());
    let report = analyzer.analyze(&series, period, Local::now().naive_local());

    match args.output {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => println!("{}", report.summary()),
    }

    if let Some(save_path) = &args.save {
        std::fs::write(save_path, report.to_json()?)
            .with_context(|| format!("Failed to write {:?}", save_path))?;
        info!("Report saved to {:?}", save_path);
    }

    Ok(())
}
