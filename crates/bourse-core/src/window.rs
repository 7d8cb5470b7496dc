//! Trailing time-window filter applied before indicators run.

use chrono::NaiveDateTime;

use crate::types::{PriceSeries, TimePeriod};

/// Keep only records dated within `period` of `now`.
///
/// A record's date counts as midnight of that day, so with `OneDay` a record
/// from today survives while one from yesterday (more than 24 hours before
/// `now`) does not. `AllTime` returns the series unchanged. The result is
/// always ascending.
pub fn filter(series: &PriceSeries, period: TimePeriod, now: NaiveDateTime) -> PriceSeries {
    let Some(window) = period.duration() else {
        return series.clone();
    };

    let cutoff = now - window;
    series.filtered(|record| record.date.and_time(chrono::NaiveTime::MIN) >= cutoff)
}

/// Same as [`filter`] but with a free-form period label; unknown labels mean all time.
pub fn filter_by_label(series: &PriceSeries, label: &str, now: NaiveDateTime) -> PriceSeries {
    filter(series, TimePeriod::parse_lenient(label), now)
}
