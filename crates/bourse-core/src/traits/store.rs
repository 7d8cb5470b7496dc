//! Price persistence trait.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::StorageError;
use crate::types::{PriceRecord, PriceSeries, Symbol};

/// Append-only persistence for per-symbol history.
#[async_trait]
pub trait PriceStore: Send + Sync {
    /// Load the full persisted series, ascending.
    async fn load_series(&self, symbol: &Symbol) -> Result<PriceSeries, StorageError>;

    /// Append records. Records already persisted must not be passed again.
    async fn append_records(
        &self,
        symbol: &Symbol,
        records: &[PriceRecord],
    ) -> Result<(), StorageError>;

    /// Most recent persisted date, `None` when the symbol has no history.
    async fn load_frontier(&self, symbol: &Symbol) -> Result<Option<NaiveDate>, StorageError> {
        Ok(self.load_series(symbol).await?.last_date())
    }

    /// Get the store name.
    fn name(&self) -> &str;
}
