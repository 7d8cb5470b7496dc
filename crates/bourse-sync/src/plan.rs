//! Chunk planning.
//!
//! Planning is pure: given the last confirmed date and today it decides which
//! bounded ranges to request, without touching the network.

use bourse_core::types::DateRange;
use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// Chunking limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncPolicy {
    /// Number of strides walked back on a full backfill
    pub backfill_chunks: usize,
    /// Length of one stride in calendar months
    pub stride_months: u32,
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self {
            backfill_chunks: 10,
            stride_months: 12,
        }
    }
}

/// Which path a sync takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncMode {
    /// No history yet: walk back from today
    Backfill,
    /// Continue forward from the last persisted date
    Resume { last_confirmed: NaiveDate },
}

/// Ranges to request, in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncPlan {
    pub mode: SyncMode,
    pub chunks: Vec<DateRange>,
}

impl SyncPlan {
    /// Plan a sync from the last confirmed date, `None` meaning no history.
    pub fn new(last_confirmed: Option<NaiveDate>, now: NaiveDate, policy: &SyncPolicy) -> Self {
        match last_confirmed {
            None => Self {
                mode: SyncMode::Backfill,
                chunks: plan_backfill(now, policy),
            },
            Some(last) => Self {
                mode: SyncMode::Resume {
                    last_confirmed: last,
                },
                chunks: plan_resume(last, now, policy),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }
}

/// Walk backward from `now` in strides.
///
/// Chunk `i` covers `[to_i - stride, to_i]` with `to_0 = now` and
/// `to_{i+1}` the day before `from_i`, so adjacent chunks never overlap.
pub fn plan_backfill(now: NaiveDate, policy: &SyncPolicy) -> Vec<DateRange> {
    let mut chunks = Vec::with_capacity(policy.backfill_chunks);
    let mut to = now;

    for _ in 0..policy.backfill_chunks {
        let Some(from) = to.checked_sub_months(Months::new(policy.stride_months)) else {
            break;
        };
        let Ok(range) = DateRange::new(from, to) else {
            break;
        };
        chunks.push(range);

        match from.checked_sub_days(Days::new(1)) {
            Some(prev) => to = prev,
            None => break,
        }
    }

    chunks
}

/// Walk forward from the day after `last_confirmed` up to `now`.
///
/// The stride whose end would reach `now` is clamped to `now` and is the
/// last one. Nothing is planned when `last_confirmed` is today or later.
pub fn plan_resume(last_confirmed: NaiveDate, now: NaiveDate, policy: &SyncPolicy) -> Vec<DateRange> {
    let mut chunks = Vec::new();
    if last_confirmed >= now {
        return chunks;
    }
    let Some(mut from) = last_confirmed.succ_opt() else {
        return chunks;
    };

    loop {
        let to = from
            .checked_add_months(Months::new(policy.stride_months))
            .unwrap_or(now);

        if to >= now {
            if let Ok(range) = DateRange::new(from, now) {
                chunks.push(range);
            }
            break;
        }

        match DateRange::new(from, to) {
            Ok(range) => chunks.push(range),
            Err(_) => break,
        }
        match to.succ_opt() {
            Some(next) => from = next,
            None => break,
        }
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_backfill_shape() {
        let now = d(2024, 6, 15);
        let chunks = plan_backfill(now, &SyncPolicy::default());

        assert_eq!(chunks.len(), 10);
        assert_eq!(chunks[0], DateRange::new(d(2023, 6, 15), now).unwrap());
        assert_eq!(chunks[1], DateRange::new(d(2022, 6, 14), d(2023, 6, 14)).unwrap());
        assert!(chunks.iter().all(|c| c.to() <= now));
        for pair in chunks.windows(2) {
            assert_eq!(pair[1].to().succ_opt().unwrap(), pair[0].from());
        }
    }

    #[test]
    fn test_backfill_leap_day() {
        let chunks = plan_backfill(d(2024, 2, 29), &SyncPolicy::default());

        assert_eq!(chunks[0].from(), d(2023, 2, 28));
        assert_eq!(chunks[1].to(), d(2023, 2, 27));
    }

    #[test]
    fn test_backfill_respects_chunk_limit() {
        let policy = SyncPolicy {
            backfill_chunks: 3,
            stride_months: 6,
        };
        let chunks = plan_backfill(d(2024, 6, 15), &policy);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].from(), d(2022, 12, 13));
    }

    #[test]
    fn test_resume_single_stride() {
        let chunks = plan_resume(d(2024, 1, 10), d(2024, 6, 15), &SyncPolicy::default());

        assert_eq!(chunks, vec![DateRange::new(d(2024, 1, 11), d(2024, 6, 15)).unwrap()]);
    }

    #[test]
    fn test_resume_multiple_strides() {
        let now = d(2024, 6, 15);
        let chunks = plan_resume(d(2021, 3, 1), now, &SyncPolicy::default());

        assert_eq!(
            chunks,
            vec![
                DateRange::new(d(2021, 3, 2), d(2022, 3, 2)).unwrap(),
                DateRange::new(d(2022, 3, 3), d(2023, 3, 3)).unwrap(),
                DateRange::new(d(2023, 3, 4), d(2024, 3, 4)).unwrap(),
                DateRange::new(d(2024, 3, 5), now).unwrap(),
            ]
        );
    }

    #[test]
    fn test_resume_up_to_date() {
        let now = d(2024, 6, 15);
        let policy = SyncPolicy::default();

        assert!(plan_resume(now, now, &policy).is_empty());
        assert!(plan_resume(d(2024, 7, 1), now, &policy).is_empty());
        assert_eq!(
            plan_resume(d(2024, 6, 14), now, &policy),
            vec![DateRange::new(now, now).unwrap()]
        );
    }

    #[test]
    fn test_plan_mode() {
        let now = d(2024, 6, 15);
        let policy = SyncPolicy::default();

        let backfill = SyncPlan::new(None, now, &policy);
        assert_eq!(backfill.mode, SyncMode::Backfill);
        assert_eq!(backfill.len(), 10);

        let resume = SyncPlan::new(Some(now), now, &policy);
        assert!(resume.is_empty());
        assert_eq!(
            resume.mode,
            SyncMode::Resume {
                last_confirmed: now
            }
        );
    }
}
