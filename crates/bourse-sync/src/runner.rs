//! Multi-symbol sync runner.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use bourse_core::error::DataError;
use bourse_core::traits::{PriceStore, SymbolDirectory};
use bourse_core::types::Symbol;
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::plan::SyncMode;
use crate::synchronizer::{ChunkOutcome, SkipReason, SyncOutcome};
use crate::Synchronizer;

/// Result of syncing and persisting one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolSyncReport {
    pub symbol: Symbol,
    pub previous_frontier: Option<NaiveDate>,
    /// Frontier after persistence; unchanged when persistence failed
    pub frontier: Option<NaiveDate>,
    pub new_records: usize,
    pub chunks_ok: usize,
    pub chunks_skipped: usize,
    /// Set when the symbol could not be synced or persisted
    pub error: Option<String>,
}

impl SymbolSyncReport {
    fn failed(symbol: Symbol, previous_frontier: Option<NaiveDate>, error: String) -> Self {
        Self {
            symbol,
            previous_frontier,
            frontier: previous_frontier,
            new_records: 0,
            chunks_ok: 0,
            chunks_skipped: 0,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Reports for one run, sorted by symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub reports: Vec<SymbolSyncReport>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.reports.len()
    }

    pub fn succeeded(&self) -> usize {
        self.reports.iter().filter(|r| r.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn new_records(&self) -> usize {
        self.reports.iter().map(|r| r.new_records).sum()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    pub fn report(&self, symbol: &Symbol) -> Option<&SymbolSyncReport> {
        self.reports.iter().find(|r| &r.symbol == symbol)
    }
}

/// Syncs many symbols over a bounded worker pool and persists the results.
pub struct SyncRunner {
    synchronizer: Synchronizer,
    store: Arc<dyn PriceStore>,
    directory: Option<Arc<dyn SymbolDirectory>>,
    concurrency: usize,
}

impl SyncRunner {
    pub fn new(synchronizer: Synchronizer, store: Arc<dyn PriceStore>) -> Self {
        Self {
            synchronizer,
            store,
            directory: None,
            concurrency: 4,
        }
    }

    pub fn with_directory(mut self, directory: Arc<dyn SymbolDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Number of symbols in flight at once; 1 syncs sequentially.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn synchronizer(&self) -> &Synchronizer {
        &self.synchronizer
    }

    /// Sync every symbol the directory lists.
    ///
    /// A directory failure aborts the run before any symbol starts.
    pub async fn run_all(&self, now: NaiveDate) -> Result<RunSummary, DataError> {
        let directory = self.directory.as_ref().ok_or_else(|| {
            DataError::DirectoryUnavailable("no symbol directory configured".into())
        })?;

        let symbols = directory.list_symbols().await.map_err(|e| {
            error!(directory = directory.name(), error = %e, "Failed to list symbols");
            e
        })?;

        Ok(self.run(symbols, now).await)
    }

    /// Sync the given symbols.
    pub async fn run(&self, symbols: Vec<Symbol>, now: NaiveDate) -> RunSummary {
        let started = Instant::now();
        let total = symbols.len();
        let done = AtomicUsize::new(0);
        let done = &done;

        info!(
            symbols = total,
            concurrency = self.concurrency,
            source = self.synchronizer.source_name(),
            store = self.store.name(),
            "Starting sync run"
        );

        let mut reports: Vec<SymbolSyncReport> = stream::iter(symbols)
            .map(|symbol| async move {
                let report = self.sync_symbol(symbol, now).await;
                let n = done.fetch_add(1, Ordering::SeqCst) + 1;
                match &report.error {
                    None => info!(
                        "[{}/{}] {}: {} new records, frontier {}",
                        n,
                        total,
                        report.symbol,
                        report.new_records,
                        report
                            .frontier
                            .map(|d| d.to_string())
                            .unwrap_or_else(|| "none".into())
                    ),
                    Some(e) => warn!("[{}/{}] {}: failed: {}", n, total, report.symbol, e),
                }
                report
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        reports.sort_by(|a, b| a.symbol.cmp(&b.symbol));

        let summary = RunSummary {
            reports,
            elapsed: started.elapsed(),
        };
        info!(
            total = summary.total(),
            succeeded = summary.succeeded(),
            failed = summary.failed(),
            new_records = summary.new_records(),
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Sync run complete"
        );
        summary
    }

    async fn sync_symbol(&self, symbol: Symbol, now: NaiveDate) -> SymbolSyncReport {
        if self.synchronizer.cancellation().is_cancelled() {
            return SymbolSyncReport::failed(symbol, None, "cancelled before start".into());
        }

        let previous = match self.store.load_frontier(&symbol).await {
            Ok(frontier) => frontier,
            Err(e) => {
                return SymbolSyncReport::failed(symbol, None, format!("loading frontier: {e}"));
            }
        };

        let outcome = self.synchronizer.sync(&symbol, previous, now).await;

        if outcome.was_cancelled() {
            return self.interrupted(symbol, previous, outcome).await;
        }

        if let Err(e) = self.store.append_records(&symbol, &outcome.records).await {
            error!(symbol = %symbol, error = %e, "Failed to persist records");
            return SymbolSyncReport {
                chunks_ok: outcome.chunks_ok(),
                chunks_skipped: outcome.chunks_skipped(),
                ..SymbolSyncReport::failed(symbol, previous, format!("persisting records: {e}"))
            };
        }

        let chunks_ok = outcome.chunks_ok();
        let chunks_skipped = outcome.chunks_skipped();
        SymbolSyncReport {
            symbol,
            previous_frontier: previous,
            frontier: outcome.frontier,
            new_records: outcome.records.len(),
            chunks_ok,
            chunks_skipped,
            error: None,
        }
    }

    /// Report a symbol whose sync was cut short by cancellation.
    ///
    /// A partial backfill is discarded so the next run backfills again. A
    /// partial resume is contiguous with the old frontier and is kept.
    async fn interrupted(
        &self,
        symbol: Symbol,
        previous: Option<NaiveDate>,
        outcome: SyncOutcome,
    ) -> SymbolSyncReport {
        let started = outcome
            .chunks
            .iter()
            .filter(|c| c.outcome != ChunkOutcome::Skipped(SkipReason::Cancelled))
            .count();
        let message = format!(
            "interrupted after {} of {} chunks",
            started,
            outcome.chunks.len()
        );
        let chunks_ok = outcome.chunks_ok();
        let chunks_skipped = outcome.chunks_skipped();

        let report = match outcome.mode {
            SyncMode::Backfill => {
                warn!(symbol = %symbol, "Backfill interrupted, discarding partial history");
                SymbolSyncReport::failed(symbol, previous, format!("{message}; backfill discarded"))
            }
            SyncMode::Resume { .. } => {
                if let Err(e) = self.store.append_records(&symbol, &outcome.records).await {
                    error!(symbol = %symbol, error = %e, "Failed to persist records");
                    SymbolSyncReport::failed(
                        symbol,
                        previous,
                        format!("{message}; persisting records: {e}"),
                    )
                } else {
                    SymbolSyncReport {
                        symbol,
                        previous_frontier: previous,
                        frontier: outcome.frontier,
                        new_records: outcome.records.len(),
                        chunks_ok: 0,
                        chunks_skipped: 0,
                        error: Some(message),
                    }
                }
            }
        };

        SymbolSyncReport {
            chunks_ok,
            chunks_skipped,
            ..report
        }
    }
}
