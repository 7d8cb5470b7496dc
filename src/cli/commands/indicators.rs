//! List indicators command.

use anyhow::Result;
use bourse_indicators::IndicatorEngine;

pub async fn run() -> Result<()> {
    let engine = IndicatorEngine::new();

    println!("Available Indicators");
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!("  {:<34} {:<16} {}", "Name", "Group", "Min records");
    println!("  ───────────────────────────────────────────────────────");

    for (kind, lookback) in engine.list() {
        println!("  {:<34} {:<16} {}", kind.name(), format!("{:?}", kind.group()), lookback);
    }

    println!();
    println!("Indicators with fewer records than their minimum report n/a and Hold.");

    Ok(())
}
