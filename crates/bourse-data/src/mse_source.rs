//! Macedonian Stock Exchange symbol-history source.
//!
//! Each fetch is one form POST of a date range to
//! `{base_url}/stats/symbolhistory/{SYMBOL}`; the answer is an HTML page whose
//! `resultsTable` holds one row per trading day, newest first.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use bourse_core::date_format;
use bourse_core::error::DataError;
use bourse_core::traits::HistorySource;
use bourse_core::types::{DateRange, PriceRecord, Symbol};
use reqwest::{header, Client};
use rust_decimal::Decimal;
use tracing::debug;

use crate::html::{HtmlExtractor, HtmlTable};

/// Id of the result table on the history page.
pub const RESULTS_TABLE_ID: &str = "resultsTable";

/// Connection settings for the exchange website.
#[derive(Debug, Clone)]
pub struct MseConfig {
    /// Site root including the language segment, e.g. `https://www.mse.mk/en`
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    /// Drop rows whose total turnover is zero
    pub skip_zero_turnover: bool,
}

impl Default for MseConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.mse.mk/en".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("bourse/", env!("CARGO_PKG_VERSION")).to_string(),
            skip_zero_turnover: true,
        }
    }
}

impl MseConfig {
    pub fn history_url(&self, symbol: &Symbol) -> String {
        format!(
            "{}/stats/symbolhistory/{}",
            self.base_url.trim_end_matches('/'),
            symbol
        )
    }
}

/// Build the shared HTTP client for the exchange website.
pub(crate) fn build_client(config: &MseConfig) -> Result<Client, DataError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        header::HeaderValue::from_str(&config.user_agent)
            .map_err(|e| DataError::Transport(format!("invalid user agent: {e}")))?,
    );

    Client::builder()
        .default_headers(headers)
        .timeout(config.timeout)
        .build()
        .map_err(|e| DataError::Transport(e.to_string()))
}

/// History source backed by the exchange website.
pub struct MseHistorySource {
    config: MseConfig,
    client: Client,
    extractor: HtmlExtractor,
}

impl MseHistorySource {
    pub fn new(config: MseConfig) -> Result<Self, DataError> {
        let client = build_client(&config)?;
        Ok(Self {
            config,
            client,
            extractor: HtmlExtractor::new()?,
        })
    }

    pub fn config(&self) -> &MseConfig {
        &self.config
    }

    /// Parse a history page into records, in page order.
    pub fn parse_page(&self, html: &str) -> Result<Vec<PriceRecord>, DataError> {
        let table = self.extractor.table(html, RESULTS_TABLE_ID)?;
        parse_table(&table, self.config.skip_zero_turnover)
    }

    async fn post_range(&self, symbol: &Symbol, range: DateRange) -> Result<String, DataError> {
        let url = self.config.history_url(symbol);
        let params = [
            ("FromDate", date_format::to_request_format(range.from())),
            ("ToDate", date_format::to_request_format(range.to())),
            ("Code", symbol.to_string()),
        ];

        let resp = self
            .client
            .post(&url)
            .form(&params)
            .send()
            .await
            .map_err(|e| DataError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(DataError::Transport(format!("{}: HTTP {}", url, resp.status())));
        }

        resp.text()
            .await
            .map_err(|e| DataError::Transport(e.to_string()))
    }
}

#[async_trait]
impl HistorySource for MseHistorySource {
    async fn fetch_range(
        &self,
        symbol: &Symbol,
        range: DateRange,
    ) -> Result<Vec<PriceRecord>, DataError> {
        let html = self.post_range(symbol, range).await?;
        let records = self.parse_page(&html)?;
        debug!(symbol = %symbol, range = %range, rows = records.len(), "Fetched history page");
        Ok(records)
    }

    fn name(&self) -> &str {
        "mse"
    }
}

/// Column positions in the result table.
#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    last_price: usize,
    max: usize,
    min: usize,
    avg_price: usize,
    change_pct: usize,
    volume: usize,
    turnover_best: usize,
    total_turnover: usize,
}

impl Columns {
    /// Layout of the exchange's history table.
    const DEFAULT: Columns = Columns {
        date: 0,
        last_price: 1,
        max: 2,
        min: 3,
        avg_price: 4,
        change_pct: 5,
        volume: 6,
        turnover_best: 7,
        total_turnover: 8,
    };

    /// Locate columns by header, falling back to the default layout for any
    /// header that is missing.
    fn from_table(table: &HtmlTable) -> Self {
        let d = Self::DEFAULT;
        let find = |name: &str, default: usize| table.column(name).unwrap_or(default);
        Self {
            date: find("Date", d.date),
            last_price: find("Last trade price", d.last_price),
            max: find("Max", d.max),
            min: find("Min", d.min),
            avg_price: find("Avg. Price", d.avg_price),
            change_pct: find("%chg.", d.change_pct),
            volume: find("Volume", d.volume),
            turnover_best: find("Turnover in BEST in denars", d.turnover_best),
            total_turnover: find("Total turnover in denars", d.total_turnover),
        }
    }

    fn width(&self) -> usize {
        [
            self.date,
            self.last_price,
            self.max,
            self.min,
            self.avg_price,
            self.change_pct,
            self.volume,
            self.turnover_best,
            self.total_turnover,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
            + 1
    }
}

/// Convert result-table rows into records.
///
/// Single-cell rows (the site's "no data" placeholder) are ignored. Numbers
/// may carry `,` thousands separators and empty cells read as zero.
pub fn parse_table(table: &HtmlTable, skip_zero_turnover: bool) -> Result<Vec<PriceRecord>, DataError> {
    let columns = Columns::from_table(table);
    let width = columns.width();
    let mut records = Vec::with_capacity(table.rows.len());

    for row in &table.rows {
        if row.len() <= 1 {
            continue;
        }
        if row.len() < width {
            return Err(DataError::Malformed(format!(
                "expected {} cells, found {}: {:?}",
                width,
                row.len(),
                row
            )));
        }

        let record = PriceRecord {
            date: date_format::parse_remote_date(&row[columns.date])
                .map_err(|e| DataError::Malformed(e.to_string()))?,
            last_price: parse_number(&row[columns.last_price])?,
            max: parse_number(&row[columns.max])?,
            min: parse_number(&row[columns.min])?,
            avg_price: parse_number(&row[columns.avg_price])?,
            change_pct: parse_number(&row[columns.change_pct])?,
            volume: parse_number(&row[columns.volume])?,
            turnover_best: parse_number(&row[columns.turnover_best])?,
            total_turnover: parse_number(&row[columns.total_turnover])?,
        };

        if skip_zero_turnover && !record.is_traded() {
            debug!(date = %record.date, "Dropping row without turnover");
            continue;
        }
        records.push(record);
    }

    Ok(records)
}

/// Parse a number cell: thousands separators removed, empty means zero.
pub fn parse_number(cell: &str) -> Result<Decimal, DataError> {
    let cleaned: String = cell.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(&cleaned)
        .map_err(|e| DataError::Malformed(format!("bad number {cell:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    const HEADER: &str = "<tr><th>Date</th><th>Last trade price</th><th>Max</th><th>Min</th>\
        <th>Avg. Price</th><th>%chg.</th><th>Volume</th>\
        <th>Turnover in BEST in denars</th><th>Total turnover in denars</th></tr>";

    fn page(rows: &[&str]) -> String {
        let body: String = rows
            .iter()
            .map(|r| {
                let cells: String = r.split('|').map(|c| format!("<td>{c}</td>")).collect();
                format!("<tr>{cells}</tr>")
            })
            .collect();
        format!("<html><table id=\"resultsTable\"><thead>{HEADER}</thead><tbody>{body}</tbody></table></html>")
    }

    fn source() -> MseHistorySource {
        MseHistorySource::new(MseConfig::default()).unwrap()
    }

    #[test]
    fn test_parse_page() {
        let html = page(&[
            "3/5/2024|21,500.00|21,600.00|21,400.00|21,512.33|0.47|120|2,581,480|2,581,480",
            "3/4/2024|21,400.00|21,400.00|21,400.00|21,400.00|0.00|15|321,000|1,321,000",
        ]);
        let records = source().parse_page(&html).unwrap();

        assert_eq!(records.len(), 2);
        let first = &records[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(first.last_price, dec!(21500.00));
        assert_eq!(first.max, dec!(21600));
        assert_eq!(first.avg_price, dec!(21512.33));
        assert_eq!(first.change_pct, dec!(0.47));
        assert_eq!(first.volume, dec!(120));
        assert_eq!(first.total_turnover, dec!(2581480));
        assert_eq!(records[1].turnover_best, dec!(321000));
    }

    #[test]
    fn test_zero_turnover_rows_dropped() {
        let html = page(&[
            "3/5/2024|100|100|100|100|0|10|1,000|1,000",
            "3/4/2024|100|||||0||0",
        ]);

        let records = source().parse_page(&html).unwrap();
        assert_eq!(records.len(), 1);

        let table = HtmlExtractor::new().unwrap().table(&html, RESULTS_TABLE_ID).unwrap();
        let kept = parse_table(&table, false).unwrap();
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].max, Decimal::ZERO);
    }

    #[test]
    fn test_missing_and_malformed() {
        let src = source();

        assert_eq!(
            src.parse_page("<html>maintenance</html>").unwrap_err(),
            DataError::MissingTable(RESULTS_TABLE_ID.into())
        );
        assert!(matches!(
            src.parse_page(&page(&["3/5/2024|abc|1|1|1|0|1|1|1"])),
            Err(DataError::Malformed(_))
        ));
        assert!(matches!(
            src.parse_page(&page(&["3/5/2024|1|1"])),
            Err(DataError::Malformed(_))
        ));
        assert!(matches!(
            src.parse_page(&page(&["yesterday|1|1|1|1|0|1|1|1"])),
            Err(DataError::Malformed(_))
        ));
    }

    #[test]
    fn test_placeholder_row_ignored() {
        let records = source().parse_page(&page(&["No data"])).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("1,234,567.89").unwrap(), dec!(1234567.89));
        assert_eq!(parse_number("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_number(" -0.52 ").unwrap(), dec!(-0.52));
        assert!(parse_number("n/a").is_err());
    }

    #[test]
    fn test_history_url() {
        let config = MseConfig {
            base_url: "https://www.mse.mk/en/".into(),
            ..Default::default()
        };
        assert_eq!(
            config.history_url(&Symbol::new("alk").unwrap()),
            "https://www.mse.mk/en/stats/symbolhistory/ALK"
        );
    }
}
