//! Core traits.

mod directory;
mod history_source;
mod indicator;
mod store;

pub use directory::SymbolDirectory;
pub use history_source::HistorySource;
pub use indicator::{round_value, Indicator};
pub use store::PriceStore;
