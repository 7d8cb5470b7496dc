//! Per-symbol incremental synchronization.

use std::sync::Arc;

use bourse_core::error::DataError;
use bourse_core::traits::HistorySource;
use bourse_core::types::{DateRange, PriceRecord, PriceSeries, Symbol};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::plan::{SyncMode, SyncPlan, SyncPolicy};
use crate::{CancellationFlag, RetryPolicy};

/// Why a chunk contributed nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The source had no rows for the range
    Empty,
    /// The source failed, after any retries
    Failed(String),
    /// Cancellation was requested before the chunk started
    Cancelled,
}

/// Result of one chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChunkOutcome {
    /// Records kept from this chunk
    Success { records: usize },
    Skipped(SkipReason),
}

impl ChunkOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ChunkOutcome::Success { .. })
    }
}

/// What happened to one planned range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkReport {
    pub range: DateRange,
    pub outcome: ChunkOutcome,
    /// Requests made for this chunk, 0 when cancelled
    pub attempts: u32,
}

/// Result of syncing one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncOutcome {
    pub symbol: Symbol,
    pub mode: SyncMode,
    /// New records, ascending and unique by date
    pub records: Vec<PriceRecord>,
    /// Most recent date known after this sync
    pub frontier: Option<NaiveDate>,
    pub chunks: Vec<ChunkReport>,
}

impl SyncOutcome {
    pub fn chunks_ok(&self) -> usize {
        self.chunks.iter().filter(|c| c.outcome.is_success()).count()
    }

    pub fn chunks_skipped(&self) -> usize {
        self.chunks.len() - self.chunks_ok()
    }

    pub fn chunks_failed(&self) -> usize {
        self.chunks
            .iter()
            .filter(|c| matches!(c.outcome, ChunkOutcome::Skipped(SkipReason::Failed(_))))
            .count()
    }

    pub fn was_cancelled(&self) -> bool {
        self.chunks
            .iter()
            .any(|c| c.outcome == ChunkOutcome::Skipped(SkipReason::Cancelled))
    }
}

/// Fetches the missing history of a symbol as a sequence of bounded chunks.
///
/// Chunks run strictly in plan order. A failed or empty chunk is skipped and
/// never stops the remaining ones.
pub struct Synchronizer {
    source: Arc<dyn HistorySource>,
    policy: SyncPolicy,
    retry: RetryPolicy,
    cancel: CancellationFlag,
}

impl Synchronizer {
    pub fn new(source: Arc<dyn HistorySource>, policy: SyncPolicy) -> Self {
        Self {
            source,
            policy,
            retry: RetryPolicy::default(),
            cancel: CancellationFlag::new(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn policy(&self) -> &SyncPolicy {
        &self.policy
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn cancellation(&self) -> &CancellationFlag {
        &self.cancel
    }

    /// The chunks a sync would request, without requesting them.
    pub fn plan(&self, last_confirmed: Option<NaiveDate>, now: NaiveDate) -> SyncPlan {
        SyncPlan::new(last_confirmed, now, &self.policy)
    }

    /// Sync one symbol from its last confirmed date up to `now`.
    ///
    /// Records outside their chunk's range, and in resume mode records not
    /// after `last_confirmed`, are discarded. The frontier is the later of
    /// `last_confirmed` and the newest record kept.
    pub async fn sync(
        &self,
        symbol: &Symbol,
        last_confirmed: Option<NaiveDate>,
        now: NaiveDate,
    ) -> SyncOutcome {
        let plan = self.plan(last_confirmed, now);
        debug!(symbol = %symbol, mode = ?plan.mode, chunks = plan.len(), "Planned sync");

        let mut collected: Vec<PriceRecord> = Vec::new();
        let mut chunks = Vec::with_capacity(plan.len());

        for range in plan.chunks {
            if self.cancel.is_cancelled() {
                chunks.push(ChunkReport {
                    range,
                    outcome: ChunkOutcome::Skipped(SkipReason::Cancelled),
                    attempts: 0,
                });
                continue;
            }

            let (result, attempts) = self.fetch_with_retry(symbol, range).await;
            let outcome = match result {
                Ok(records) => {
                    let received = records.len();
                    let kept: Vec<PriceRecord> = records
                        .into_iter()
                        .filter(|r| range.contains(r.date))
                        .filter(|r| last_confirmed.map_or(true, |last| r.date > last))
                        .collect();
                    if kept.len() < received {
                        debug!(
                            symbol = %symbol,
                            range = %range,
                            discarded = received - kept.len(),
                            "Discarded rows outside the requested window"
                        );
                    }

                    if kept.is_empty() {
                        debug!(symbol = %symbol, range = %range, "Empty chunk");
                        ChunkOutcome::Skipped(SkipReason::Empty)
                    } else {
                        let count = kept.len();
                        collected.extend(kept);
                        ChunkOutcome::Success { records: count }
                    }
                }
                Err(e) => {
                    warn!(symbol = %symbol, range = %range, attempts, error = %e, "Skipping chunk");
                    ChunkOutcome::Skipped(SkipReason::Failed(e.to_string()))
                }
            };
            chunks.push(ChunkReport {
                range,
                outcome,
                attempts,
            });
        }

        let records = PriceSeries::from_records(symbol.clone(), collected).into_records();
        let newest = records.last().map(|r| r.date);
        let frontier = match (last_confirmed, newest) {
            (Some(last), Some(newest)) => Some(last.max(newest)),
            (last, newest) => last.or(newest),
        };

        let outcome = SyncOutcome {
            symbol: symbol.clone(),
            mode: plan.mode,
            records,
            frontier,
            chunks,
        };
        info!(
            symbol = %symbol,
            records = outcome.records.len(),
            chunks_ok = outcome.chunks_ok(),
            chunks_skipped = outcome.chunks_skipped(),
            frontier = ?outcome.frontier,
            "Synced symbol"
        );
        outcome
    }

    async fn fetch_with_retry(
        &self,
        symbol: &Symbol,
        range: DateRange,
    ) -> (Result<Vec<PriceRecord>, DataError>, u32) {
        let mut attempt = 0;
        loop {
            let result = self.source.fetch_range(symbol, range).await;
            attempt += 1;

            match result {
                Err(e)
                    if e.is_transient()
                        && attempt <= self.retry.max_retries
                        && !self.cancel.is_cancelled() =>
                {
                    let delay = self.retry.delay_for_attempt(attempt - 1);
                    warn!(
                        symbol = %symbol,
                        range = %range,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Transient failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                other => return (other, attempt),
            }
        }
    }
}
