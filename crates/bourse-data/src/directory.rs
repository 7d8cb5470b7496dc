//! Symbol directories.

use async_trait::async_trait;
use bourse_core::error::DataError;
use bourse_core::traits::SymbolDirectory;
use bourse_core::types::Symbol;
use reqwest::Client;
use tracing::{debug, info};

use crate::html::HtmlExtractor;
use crate::mse_source::{build_client, MseConfig};

/// Id of the symbol picker on every history page.
pub const SYMBOL_SELECT_ID: &str = "Code";

/// Any history page carries the full symbol picker; this one is always listed.
const SEED_SYMBOL: &str = "ADIN";

/// Bond and other non-equity codes left out of the directory by default.
pub const DEFAULT_EXCLUDED_CODES: &[&str] = &["TTK", "TTKO", "CKB", "CKBKO", "SNBT", "SNBTO"];

/// Which raw codes count as syncable symbols.
#[derive(Debug, Clone)]
pub struct SymbolFilter {
    /// Codes containing a digit are excluded
    pub exclude_digits: bool,
    /// Exact codes to exclude, compared case-insensitively
    pub excluded: Vec<String>,
}

impl Default for SymbolFilter {
    fn default() -> Self {
        Self {
            exclude_digits: true,
            excluded: DEFAULT_EXCLUDED_CODES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl SymbolFilter {
    pub fn accepts(&self, code: &str) -> bool {
        if code.is_empty() {
            return false;
        }
        if self.exclude_digits && code.chars().any(|c| c.is_ascii_digit()) {
            return false;
        }
        !self.excluded.iter().any(|e| e.eq_ignore_ascii_case(code))
    }

    /// Filter raw codes into symbols, dropping duplicates and invalid codes.
    pub fn apply<I, S>(&self, codes: I) -> Vec<Symbol>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut symbols: Vec<Symbol> = Vec::new();
        for code in codes {
            let code = code.as_ref().trim();
            if !self.accepts(code) {
                debug!(code, "Excluding code");
                continue;
            }
            match Symbol::new(code) {
                Ok(symbol) if !symbols.contains(&symbol) => symbols.push(symbol),
                Ok(_) => {}
                Err(e) => debug!(code, error = %e, "Skipping invalid code"),
            }
        }
        symbols
    }
}

/// Directory scraped from the exchange's symbol picker.
pub struct MseSymbolDirectory {
    config: MseConfig,
    filter: SymbolFilter,
    client: Client,
    extractor: HtmlExtractor,
}

impl MseSymbolDirectory {
    pub fn new(config: MseConfig, filter: SymbolFilter) -> Result<Self, DataError> {
        let client = build_client(&config)?;
        Ok(Self {
            config,
            filter,
            client,
            extractor: HtmlExtractor::new()?,
        })
    }

    /// Extract and filter the symbols listed on a history page.
    pub fn parse_page(&self, html: &str) -> Result<Vec<Symbol>, DataError> {
        let codes = self.extractor.select_options(html, SYMBOL_SELECT_ID)?;
        Ok(self.filter.apply(codes))
    }
}

#[async_trait]
impl SymbolDirectory for MseSymbolDirectory {
    async fn list_symbols(&self) -> Result<Vec<Symbol>, DataError> {
        let seed = Symbol::new(SEED_SYMBOL)?;
        let url = self.config.history_url(&seed);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DataError::DirectoryUnavailable(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(DataError::DirectoryUnavailable(format!(
                "{}: HTTP {}",
                url,
                resp.status()
            )));
        }

        let html = resp
            .text()
            .await
            .map_err(|e| DataError::DirectoryUnavailable(e.to_string()))?;
        let symbols = self.parse_page(&html)?;

        info!(count = symbols.len(), "Listed symbols from exchange");
        Ok(symbols)
    }

    fn name(&self) -> &str {
        "mse"
    }
}

/// Directory serving a fixed list.
#[derive(Debug, Clone, Default)]
pub struct StaticSymbolDirectory {
    symbols: Vec<Symbol>,
}

impl StaticSymbolDirectory {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    /// Parse codes into symbols; any invalid code is an error.
    pub fn from_codes<I, S>(codes: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let symbols = codes
            .into_iter()
            .map(|c| Symbol::new(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(symbols))
    }
}

#[async_trait]
impl SymbolDirectory for StaticSymbolDirectory {
    async fn list_symbols(&self) -> Result<Vec<Symbol>, DataError> {
        Ok(self.symbols.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PICKER: &str = r#"
        <select id="Code" name="Code">
          <option value="ADIN">ADIN</option>
          <option value="ALK">ALK</option>
          <option value="RMDEN21">RMDEN21</option>
          <option value="TTK">TTK</option>
          <option value="SNBTO">SNBTO</option>
          <option value="KMB">KMB</option>
          <option value="ALK">ALK</option>
        </select>"#;

    fn codes(symbols: &[Symbol]) -> Vec<&str> {
        symbols.iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn test_filter() {
        let filter = SymbolFilter::default();

        assert!(filter.accepts("ALK"));
        assert!(!filter.accepts("RMDEN21"));
        assert!(!filter.accepts("ckbko"));
        assert!(!filter.accepts(""));
    }

    #[test]
    fn test_parse_picker() {
        let directory = MseSymbolDirectory::new(MseConfig::default(), SymbolFilter::default()).unwrap();
        let symbols = directory.parse_page(PICKER).unwrap();

        assert_eq!(codes(&symbols), vec!["ADIN", "ALK", "KMB"]);
    }

    #[test]
    fn test_parse_picker_custom_filter() {
        let filter = SymbolFilter {
            exclude_digits: false,
            excluded: vec!["ADIN".into()],
        };
        let directory = MseSymbolDirectory::new(MseConfig::default(), filter).unwrap();
        let symbols = directory.parse_page(PICKER).unwrap();

        assert_eq!(codes(&symbols), vec!["ALK", "RMDEN21", "TTK", "SNBTO", "KMB"]);
    }

    #[tokio::test]
    async fn test_static_directory() {
        let directory = StaticSymbolDirectory::from_codes(["alk", "KMB"]).unwrap();
        let symbols = directory.list_symbols().await.unwrap();

        assert_eq!(codes(&symbols), vec!["ALK", "KMB"]);
        assert!(StaticSymbolDirectory::from_codes(["AL-K"]).is_err());
    }
}
