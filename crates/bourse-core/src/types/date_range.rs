//! Inclusive date ranges.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DataError;

/// Inclusive `[from, to]` range as sent to the remote source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Create a range; `from` must not be after `to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, DataError> {
        if from > to {
            return Err(DataError::InvalidDateRange { from, to });
        }
        Ok(Self { from, to })
    }

    #[inline]
    pub fn from(&self) -> NaiveDate {
        self.from
    }

    #[inline]
    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Check whether a date falls inside the range (both ends inclusive).
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Number of calendar days covered, counting both ends.
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_range_bounds_inclusive() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 31)).unwrap();
        assert!(range.contains(d(2024, 1, 1)));
        assert!(range.contains(d(2024, 1, 31)));
        assert!(!range.contains(d(2024, 2, 1)));
        assert_eq!(range.days(), 31);
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::new(d(2024, 5, 6), d(2024, 5, 6)).unwrap();
        assert_eq!(range.days(), 1);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = DateRange::new(d(2024, 2, 1), d(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, DataError::InvalidDateRange { .. }));
    }
}
