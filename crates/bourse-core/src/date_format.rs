//! Date format boundary.
//!
//! Two textual conventions exist outside the process: day-first
//! (`DD.MM.YYYY`) for persisted and displayed dates, and month-first
//! (`MM/DD/YYYY`) for remote request parameters and result tables. Inside the
//! process every date is a [`NaiveDate`]; these functions are the only place
//! either format is produced or parsed.

use chrono::NaiveDate;

use crate::error::DataError;

/// Storage/display format.
pub const STORAGE_FORMAT: &str = "%d.%m.%Y";

/// Remote request format.
pub const REQUEST_FORMAT: &str = "%m/%d/%Y";

/// Format a date for a remote request parameter.
pub fn to_request_format(date: NaiveDate) -> String {
    date.format(REQUEST_FORMAT).to_string()
}

/// Format a date for persistence and display.
pub fn to_storage_format(date: NaiveDate) -> String {
    date.format(STORAGE_FORMAT).to_string()
}

/// Parse a day-first storage date.
pub fn parse_storage_date(s: &str) -> Result<NaiveDate, DataError> {
    NaiveDate::parse_from_str(s.trim(), STORAGE_FORMAT)
        .map_err(|e| DataError::ParseError(format!("invalid storage date {:?}: {}", s, e)))
}

/// Parse a month-first date as it appears in remote responses.
pub fn parse_request_date(s: &str) -> Result<NaiveDate, DataError> {
    NaiveDate::parse_from_str(s.trim(), REQUEST_FORMAT)
        .map_err(|e| DataError::ParseError(format!("invalid request date {:?}: {}", s, e)))
}

/// Parse a date cell from a remote result table.
///
/// Slashes mean month-first, dots mean day-first; anything else is rejected.
pub fn parse_remote_date(s: &str) -> Result<NaiveDate, DataError> {
    let s = s.trim();
    if s.contains('/') {
        parse_request_date(s)
    } else if s.contains('.') {
        parse_storage_date(s)
    } else {
        Err(DataError::ParseError(format!("unrecognized date {:?}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_request_format() {
        assert_eq!(to_request_format(d(2024, 3, 5)), "03/05/2024");
    }

    #[test]
    fn test_storage_format() {
        assert_eq!(to_storage_format(d(2024, 3, 5)), "05.03.2024");
    }

    #[test]
    fn test_parse_both_conventions() {
        assert_eq!(parse_storage_date("05.03.2024").unwrap(), d(2024, 3, 5));
        assert_eq!(parse_request_date("03/05/2024").unwrap(), d(2024, 3, 5));
        // Remote cells are not always zero padded
        assert_eq!(parse_remote_date("3/5/2024").unwrap(), d(2024, 3, 5));
        assert_eq!(parse_remote_date(" 05.03.2024 ").unwrap(), d(2024, 3, 5));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_storage_date("2024-03-05").is_err());
        assert!(parse_remote_date("yesterday").is_err());
        assert!(parse_request_date("13/01/2024").is_err());
    }
}
