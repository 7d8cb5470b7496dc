//! Validate configuration command.

use anyhow::Result;
use bourse_config::load_config;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };
    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Source: {}", config.source.base_url);
    println!("Data directory: {}", config.storage.data_dir.display());
    println!(
        "Backfill: {} chunks of {} months",
        config.sync.backfill_chunks, config.sync.stride_months
    );
    println!("Concurrency: {}", config.sync.concurrency);
    match &config.sync.symbols {
        Some(symbols) => println!("Symbols: {}", symbols.join(", ")),
        None => println!("Symbols: exchange directory"),
    }
    println!();
    println!("Effective configuration");
    println!("───────────────────────────────────────────────────────────");
    print!("{}", config.to_toml_string()?);

    Ok(())
}
