//! In-memory price store.

use std::collections::HashMap;

use async_trait::async_trait;
use bourse_core::error::StorageError;
use bourse_core::traits::PriceStore;
use bourse_core::types::{PriceRecord, PriceSeries, Symbol};
use tokio::sync::RwLock;

/// Price store that keeps every series in memory.
#[derive(Debug, Default)]
pub struct MemoryPriceStore {
    series: RwLock<HashMap<Symbol, PriceSeries>>,
}

impl MemoryPriceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one series per symbol.
    pub fn with_series(series: impl IntoIterator<Item = PriceSeries>) -> Self {
        let series = series
            .into_iter()
            .map(|s| (s.symbol.clone(), s))
            .collect();
        Self {
            series: RwLock::new(series),
        }
    }

    /// Symbols with stored history.
    pub async fn symbols(&self) -> Vec<Symbol> {
        let mut symbols: Vec<_> = self.series.read().await.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    /// Drop a symbol's history.
    pub async fn clear(&self, symbol: &Symbol) {
        self.series.write().await.remove(symbol);
    }

    /// Drop all history.
    pub async fn clear_all(&self) {
        self.series.write().await.clear();
    }
}

#[async_trait]
impl PriceStore for MemoryPriceStore {
    async fn load_series(&self, symbol: &Symbol) -> Result<PriceSeries, StorageError> {
        Ok(self
            .series
            .read()
            .await
            .get(symbol)
            .cloned()
            .unwrap_or_else(|| PriceSeries::new(symbol.clone())))
    }

    async fn append_records(
        &self,
        symbol: &Symbol,
        records: &[PriceRecord],
    ) -> Result<(), StorageError> {
        let mut guard = self.series.write().await;
        guard
            .entry(symbol.clone())
            .or_insert_with(|| PriceSeries::new(symbol.clone()))
            .merge(records.iter().cloned());
        Ok(())
    }

    async fn load_frontier(
        &self,
        symbol: &Symbol,
    ) -> Result<Option<chrono::NaiveDate>, StorageError> {
        Ok(self
            .series
            .read()
            .await
            .get(symbol)
            .and_then(|s| s.last_date()))
    }

    fn name(&self) -> &str {
        "memory"
    }
}
