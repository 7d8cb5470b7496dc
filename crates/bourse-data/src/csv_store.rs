//! Append-only per-symbol CSV store.
//!
//! Each symbol lives in `{data_dir}/{SYMBOL}.csv` with a header row and
//! day-first (`DD.MM.YYYY`) dates. Files are only ever appended to.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use async_trait::async_trait;
use bourse_core::date_format;
use bourse_core::error::StorageError;
use bourse_core::traits::PriceStore;
use bourse_core::types::{PriceRecord, PriceSeries, Symbol};
use csv::{ReaderBuilder, WriterBuilder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// On-disk row layout. Numbers are kept as text so they round-trip exactly.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "LastTradePrice")]
    last_price: String,
    #[serde(rename = "Max")]
    max: String,
    #[serde(rename = "Min")]
    min: String,
    #[serde(rename = "AvgPrice")]
    avg_price: String,
    #[serde(rename = "ChangePct")]
    change_pct: String,
    #[serde(rename = "Volume")]
    volume: String,
    #[serde(rename = "TurnoverBest")]
    turnover_best: String,
    #[serde(rename = "TotalTurnover")]
    total_turnover: String,
}

impl From<&PriceRecord> for CsvRow {
    fn from(r: &PriceRecord) -> Self {
        Self {
            date: date_format::to_storage_format(r.date),
            last_price: r.last_price.to_string(),
            max: r.max.to_string(),
            min: r.min.to_string(),
            avg_price: r.avg_price.to_string(),
            change_pct: r.change_pct.to_string(),
            volume: r.volume.to_string(),
            turnover_best: r.turnover_best.to_string(),
            total_turnover: r.total_turnover.to_string(),
        }
    }
}

impl CsvRow {
    fn into_record(self, path: &Path) -> Result<PriceRecord, StorageError> {
        let corrupt = |reason: String| StorageError::Corrupt {
            path: path.display().to_string(),
            reason,
        };
        let number = |field: &str, value: &str| {
            Decimal::from_str(value.trim())
                .map_err(|e| corrupt(format!("{field} {value:?}: {e}")))
        };

        Ok(PriceRecord {
            date: date_format::parse_storage_date(&self.date).map_err(|e| corrupt(e.to_string()))?,
            last_price: number("LastTradePrice", &self.last_price)?,
            max: number("Max", &self.max)?,
            min: number("Min", &self.min)?,
            avg_price: number("AvgPrice", &self.avg_price)?,
            change_pct: number("ChangePct", &self.change_pct)?,
            volume: number("Volume", &self.volume)?,
            turnover_best: number("TurnoverBest", &self.turnover_best)?,
            total_turnover: number("TotalTurnover", &self.total_turnover)?,
        })
    }
}

/// CSV-file price store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct CsvPriceStore {
    data_dir: PathBuf,
}

impl CsvPriceStore {
    /// Create a store; the directory is created on first append.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// File holding a symbol's history.
    pub fn path_for(&self, symbol: &Symbol) -> PathBuf {
        self.data_dir.join(format!("{}.csv", symbol))
    }

    /// Symbols that have a history file, sorted.
    pub fn stored_symbols(&self) -> Result<Vec<Symbol>, StorageError> {
        if !self.data_dir.exists() {
            return Ok(Vec::new());
        }
        let mut symbols = Vec::new();
        for entry in fs::read_dir(&self.data_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            if let Some(symbol) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| Symbol::new(s).ok())
            {
                symbols.push(symbol);
            }
        }
        symbols.sort();
        Ok(symbols)
    }
}

fn read_records(path: &Path) -> Result<Vec<PriceRecord>, StorageError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| StorageError::Csv(e.to_string()))?;

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result.map_err(|e| StorageError::Corrupt {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        records.push(row.into_record(path)?);
    }
    Ok(records)
}

fn append_rows(path: &Path, records: &[PriceRecord]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let write_header = file.metadata()?.len() == 0;

    let mut writer = WriterBuilder::new()
        .has_headers(write_header)
        .from_writer(file);
    for record in records {
        writer
            .serialize(CsvRow::from(record))
            .map_err(|e| StorageError::Csv(e.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

async fn blocking<T, F>(f: F) -> Result<T, StorageError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::Io(std::io::Error::other(e.to_string())))?
}

#[async_trait]
impl PriceStore for CsvPriceStore {
    async fn load_series(&self, symbol: &Symbol) -> Result<PriceSeries, StorageError> {
        let path = self.path_for(symbol);
        let records = blocking(move || read_records(&path)).await?;
        Ok(PriceSeries::from_records(symbol.clone(), records))
    }

    async fn append_records(
        &self,
        symbol: &Symbol,
        records: &[PriceRecord],
    ) -> Result<(), StorageError> {
        if records.is_empty() {
            return Ok(());
        }
        let path = self.path_for(symbol);
        let rows = records.to_vec();
        let count = rows.len();
        blocking(move || append_rows(&path, &rows)).await?;
        debug!(symbol = %symbol, count, "Appended records");
        Ok(())
    }

    fn name(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn record(day: u32, price: Decimal) -> PriceRecord {
        PriceRecord::new(d(day), price, price + dec!(10), price - dec!(10))
            .with_volume(dec!(120))
            .with_turnover(dec!(1500.50), dec!(2581480))
    }

    fn alk() -> Symbol {
        Symbol::new("ALK").unwrap()
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvPriceStore::new(dir.path());

        assert!(store.load_series(&alk()).await.unwrap().is_empty());
        assert_eq!(store.load_frontier(&alk()).await.unwrap(), None);
        assert!(store.stored_symbols().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_append_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvPriceStore::new(dir.path().join("data"));

        let first = vec![record(4, dec!(21400)), record(5, dec!(21500.25))];
        store.append_records(&alk(), &first).await.unwrap();
        store.append_records(&alk(), &[record(6, dec!(21600))]).await.unwrap();

        let series = store.load_series(&alk()).await.unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.records()[1], first[1]);
        assert_eq!(store.load_frontier(&alk()).await.unwrap(), Some(d(6)));
        assert_eq!(store.stored_symbols().unwrap(), vec![alk()]);

        let text = fs::read_to_string(store.path_for(&alk())).unwrap();
        assert_eq!(text.matches("Date,").count(), 1);
        assert!(text.contains("05.03.2024,21500.25"));
    }

    #[tokio::test]
    async fn test_corrupt_row() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvPriceStore::new(dir.path());
        fs::write(
            store.path_for(&alk()),
            "Date,LastTradePrice,Max,Min,AvgPrice,ChangePct,Volume,TurnoverBest,TotalTurnover\n\
             05.03.2024,1,1,1,1,0,1,1,1\n\
             2024-03-06,1,1,1,1,0,1,1,1\n",
        )
        .unwrap();

        assert!(matches!(
            store.load_series(&alk()).await,
            Err(StorageError::Corrupt { .. })
        ));
    }
}
