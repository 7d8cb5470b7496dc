//! List symbols command.

use anyhow::{Context, Result};
use bourse_core::traits::SymbolDirectory;
use bourse_data::CsvPriceStore;
use std::path::Path;

use crate::cli::SymbolsArgs;

pub async fn run(args: SymbolsArgs, config_path: &Path) -> Result<()> {
    let config = super::load(config_path)?;

    let symbols = if args.stored {
        CsvPriceStore::new(&config.storage.data_dir)
            .stored_symbols()
            .context("Failed to list stored symbols")?
    } else {
        let directory = super::directory(&config)?;
        directory
            .list_symbols()
            .await
            .with_context(|| format!("Failed to list symbols from {}", directory.name()))?
    };

    for symbol in &symbols {
        println!("{}", symbol);
    }
    eprintln!("{} symbols", symbols.len());

    Ok(())
}
