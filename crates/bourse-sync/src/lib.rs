//! Incremental history synchronization.
//!
//! Turns "everything for this symbol up to today" into a bounded sequence of
//! range queries:
//! - [`plan`]: backfill and resume chunk planning
//! - [`Synchronizer`]: sequential chunk execution, merge and frontier
//! - [`SyncRunner`]: many symbols over a bounded worker pool, with persistence

mod cancel;
pub mod plan;
mod retry;
mod runner;
mod synchronizer;

pub use cancel::CancellationFlag;
pub use plan::{SyncMode, SyncPlan, SyncPolicy};
pub use retry::{Backoff, RetryPolicy};
pub use runner::{RunSummary, SymbolSyncReport, SyncRunner};
pub use synchronizer::{ChunkOutcome, ChunkReport, SkipReason, SyncOutcome, Synchronizer};
