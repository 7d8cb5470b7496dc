//! CLI command implementations.

pub mod analyze;
pub mod indicators;
pub mod plan;
pub mod symbols;
pub mod sync;
pub mod validate;

use anyhow::{Context, Result};
use bourse_config::{load_config, AppConfig};
use bourse_core::traits::SymbolDirectory;
use bourse_core::types::Symbol;
use bourse_data::{MseSymbolDirectory, StaticSymbolDirectory};
use std::path::Path;
use std::sync::Arc;

/// Load and validate the configuration file.
pub(crate) fn load(config_path: &Path) -> Result<AppConfig> {
    let config = load_config(config_path)
        .with_context(|| format!("Failed to load configuration from {:?}", config_path))?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

pub(crate) fn parse_symbol(code: &str) -> Result<Symbol> {
    Symbol::new(code).with_context(|| format!("Invalid symbol {:?}", code))
}

/// Parse user-supplied codes into symbols.
pub(crate) fn parse_symbols<S: AsRef<str>>(codes: &[S]) -> Result<Vec<Symbol>> {
    codes.iter().map(|c| parse_symbol(c.as_ref())).collect()
}

/// The configured symbol list, or the exchange directory when none is set.
pub(crate) fn directory(config: &AppConfig) -> Result<Arc<dyn SymbolDirectory>> {
    match &config.sync.symbols {
        Some(codes) => Ok(Arc::new(
            StaticSymbolDirectory::from_codes(codes).context("Invalid symbol in sync.symbols")?,
        )),
        None => Ok(Arc::new(
            MseSymbolDirectory::new(config.source.mse_config(), config.source.symbol_filter())
                .context("Failed to create symbol directory")?,
        )),
    }
}
