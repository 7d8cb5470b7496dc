//! Core types and traits for market history sync and analysis.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Symbol, PriceRecord, PriceSeries, DateRange)
//! - Trading signals and analysis periods
//! - The date-format boundary between storage, remote requests and internal dates
//! - Core traits for history sources, price stores, symbol directories and indicators

pub mod date_format;
pub mod error;
pub mod traits;
pub mod types;
pub mod window;

pub use error::{BourseError, BourseResult, DataError, StorageError};
pub use traits::*;
pub use types::*;
