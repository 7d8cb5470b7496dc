//! Ticker symbols.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DataError;

/// Uppercase ticker code, the key for all per-symbol state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Create a symbol, trimming and uppercasing the input.
    pub fn new(code: &str) -> Result<Self, DataError> {
        let code = code.trim().to_uppercase();
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DataError::InvalidSymbol(code));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbol::new(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = DataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Symbol::new(&value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_normalization() {
        let symbol = Symbol::new("  alk ").unwrap();
        assert_eq!(symbol.as_str(), "ALK");
        assert_eq!(symbol.to_string(), "ALK");
    }

    #[test]
    fn test_symbol_rejects_invalid() {
        assert!(Symbol::new("").is_err());
        assert!(Symbol::new("KMB; DROP").is_err());
        assert!(Symbol::new("A-B").is_err());
    }

    #[test]
    fn test_symbol_serde() {
        let symbol: Symbol = serde_json::from_str("\"kmb\"").unwrap();
        assert_eq!(symbol.as_str(), "KMB");
        assert_eq!(serde_json::to_string(&symbol).unwrap(), "\"KMB\"");
        assert!(serde_json::from_str::<Symbol>("\"\"").is_err());
    }
}
