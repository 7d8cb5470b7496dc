//! Core data types.

mod date_range;
mod indicator_kind;
mod period;
mod price;
mod signal;
mod symbol;

pub use date_range::DateRange;
pub use indicator_kind::{IndicatorGroup, IndicatorKind, IndicatorResult};
pub use period::TimePeriod;
pub use price::{PriceRecord, PriceSeries};
pub use signal::Signal;
pub use symbol::Symbol;
