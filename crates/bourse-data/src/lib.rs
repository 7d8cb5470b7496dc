//! History sources, symbol directories and price stores.
//!
//! - [`MseHistorySource`]: range queries against the exchange's history page
//! - [`MseSymbolDirectory`] / [`StaticSymbolDirectory`]: the symbols to sync
//! - [`CsvPriceStore`] / [`MemoryPriceStore`]: append-only persistence

mod csv_store;
mod directory;
pub mod html;
mod memory;
mod mse_source;

pub use csv_store::CsvPriceStore;
pub use directory::{
    MseSymbolDirectory, StaticSymbolDirectory, SymbolFilter, DEFAULT_EXCLUDED_CODES,
    SYMBOL_SELECT_ID,
};
pub use memory::MemoryPriceStore;
pub use mse_source::{parse_number, parse_table, MseConfig, MseHistorySource, RESULTS_TABLE_ID};
