//! Remote history source trait.

use async_trait::async_trait;

use crate::error::DataError;
use crate::types::{DateRange, PriceRecord, Symbol};

/// A paginated remote source of daily history.
///
/// Sources are unreliable: a request may fail in transport, come back without
/// a result table, or carry a table that cannot be parsed. Each of those is an
/// `Err`; an empty `Ok` means the source answered but had no trading days in
/// the range.
#[async_trait]
pub trait HistorySource: Send + Sync {
    /// Fetch records for one bounded, inclusive date range.
    ///
    /// # Arguments
    /// * `symbol` - The symbol to fetch
    /// * `range` - Inclusive date range; callers never pass future dates
    ///
    /// # Returns
    /// Records in whatever order the source delivers them
    async fn fetch_range(
        &self,
        symbol: &Symbol,
        range: DateRange,
    ) -> Result<Vec<PriceRecord>, DataError>;

    /// Get the source name.
    fn name(&self) -> &str;
}
