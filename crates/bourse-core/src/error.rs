//! Error types for the bourse system.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum BourseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors raised by remote history sources and symbol directories.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),

    #[error("Invalid date range: {from} is after {to}")]
    InvalidDateRange {
        from: chrono::NaiveDate,
        to: chrono::NaiveDate,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Result table '{0}' not found in response")]
    MissingTable(String),

    #[error("Malformed result table: {0}")]
    Malformed(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Symbol directory unavailable: {0}")]
    DirectoryUnavailable(String),
}

impl DataError {
    /// Whether retrying the same request could plausibly succeed.
    ///
    /// Only transport failures qualify; a page without a result table or with
    /// unparseable cells will look the same on the next attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, DataError::Transport(_))
    }
}

/// Persistence errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Corrupt record in {path}: {reason}")]
    Corrupt { path: String, reason: String },
}

/// Result type alias for bourse operations.
pub type BourseResult<T> = Result<T, BourseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(DataError::Transport("timeout".into()).is_transient());
        assert!(!DataError::MissingTable("resultsTable".into()).is_transient());
        assert!(!DataError::Malformed("bad cell".into()).is_transient());
    }

    #[test]
    fn test_error_conversion() {
        let err: BourseError = DataError::Transport("connection reset".into()).into();
        assert_eq!(err.to_string(), "Data error: Transport error: connection reset");

        let err: BourseError = StorageError::Csv("unequal lengths".into()).into();
        assert!(matches!(err, BourseError::Storage(StorageError::Csv(_))));
    }
}
