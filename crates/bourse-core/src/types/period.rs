//! Trailing analysis periods.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trailing window applied to a series before indicators run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimePeriod {
    #[serde(rename = "All time")]
    #[default]
    AllTime,
    #[serde(rename = "5 years")]
    FiveYears,
    #[serde(rename = "1 year")]
    OneYear,
    #[serde(rename = "1 month")]
    OneMonth,
    #[serde(rename = "1 week")]
    OneWeek,
    #[serde(rename = "1 day")]
    OneDay,
}

impl TimePeriod {
    /// Length of the window in days; fixed-day approximations, not calendar-aware.
    pub fn days(&self) -> Option<i64> {
        match self {
            TimePeriod::AllTime => None,
            TimePeriod::FiveYears => Some(5 * 365),
            TimePeriod::OneYear => Some(365),
            TimePeriod::OneMonth => Some(30),
            TimePeriod::OneWeek => Some(7),
            TimePeriod::OneDay => Some(1),
        }
    }

    /// Length of the window, `None` for all time.
    pub fn duration(&self) -> Option<Duration> {
        self.days().map(Duration::days)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimePeriod::AllTime => "All time",
            TimePeriod::FiveYears => "5 years",
            TimePeriod::OneYear => "1 year",
            TimePeriod::OneMonth => "1 month",
            TimePeriod::OneWeek => "1 week",
            TimePeriod::OneDay => "1 day",
        }
    }

    /// Parse a label, treating anything unrecognized as all time.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(TimePeriod::AllTime)
    }

    pub fn all() -> &'static [TimePeriod] {
        &[
            TimePeriod::AllTime,
            TimePeriod::FiveYears,
            TimePeriod::OneYear,
            TimePeriod::OneMonth,
            TimePeriod::OneWeek,
            TimePeriod::OneDay,
        ]
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimePeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all time" | "all" => Ok(TimePeriod::AllTime),
            "5 years" | "5y" => Ok(TimePeriod::FiveYears),
            "1 year" | "1y" => Ok(TimePeriod::OneYear),
            "1 month" | "1mo" => Ok(TimePeriod::OneMonth),
            "1 week" | "1w" => Ok(TimePeriod::OneWeek),
            "1 day" | "1d" => Ok(TimePeriod::OneDay),
            _ => Err(format!("Invalid time period: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_days() {
        assert_eq!(TimePeriod::FiveYears.days(), Some(1825));
        assert_eq!(TimePeriod::OneYear.days(), Some(365));
        assert_eq!(TimePeriod::OneMonth.days(), Some(30));
        assert_eq!(TimePeriod::OneWeek.days(), Some(7));
        assert_eq!(TimePeriod::OneDay.days(), Some(1));
        assert_eq!(TimePeriod::AllTime.days(), None);
    }

    #[test]
    fn test_period_parse() {
        assert_eq!(TimePeriod::from_str("1 year").unwrap(), TimePeriod::OneYear);
        assert_eq!(TimePeriod::from_str("5 Years").unwrap(), TimePeriod::FiveYears);
        assert_eq!(TimePeriod::from_str("1mo").unwrap(), TimePeriod::OneMonth);
        assert!(TimePeriod::from_str("fortnight").is_err());
    }

    #[test]
    fn test_period_parse_lenient() {
        assert_eq!(TimePeriod::parse_lenient("fortnight"), TimePeriod::AllTime);
        assert_eq!(TimePeriod::parse_lenient("1 week"), TimePeriod::OneWeek);
    }

    #[test]
    fn test_period_labels_round_trip() {
        for period in TimePeriod::all() {
            assert_eq!(TimePeriod::from_str(period.label()).unwrap(), *period);
        }
    }
}
