//! Daily price records and per-symbol series.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Symbol;

/// One trading day for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Trading date
    pub date: NaiveDate,
    /// Last trade price
    pub last_price: Decimal,
    /// Highest price of the day
    pub max: Decimal,
    /// Lowest price of the day
    pub min: Decimal,
    /// Average price
    pub avg_price: Decimal,
    /// Percent change against the previous day
    pub change_pct: Decimal,
    /// Shares traded
    pub volume: Decimal,
    /// Turnover on the regular (BEST) market
    pub turnover_best: Decimal,
    /// Total turnover including block trades
    pub total_turnover: Decimal,
}

impl PriceRecord {
    /// Create a record with the price fields set and everything else zero.
    pub fn new(date: NaiveDate, last_price: Decimal, max: Decimal, min: Decimal) -> Self {
        Self {
            date,
            last_price,
            max,
            min,
            avg_price: Decimal::ZERO,
            change_pct: Decimal::ZERO,
            volume: Decimal::ZERO,
            turnover_best: Decimal::ZERO,
            total_turnover: Decimal::ZERO,
        }
    }

    pub fn with_volume(mut self, volume: Decimal) -> Self {
        self.volume = volume;
        self
    }

    pub fn with_turnover(mut self, turnover_best: Decimal, total_turnover: Decimal) -> Self {
        self.turnover_best = turnover_best;
        self.total_turnover = total_turnover;
        self
    }

    /// Typical price (HLC average) as used by CCI.
    #[inline]
    pub fn typical_price(&self) -> f64 {
        (to_f64(self.max) + to_f64(self.min) + to_f64(self.last_price)) / 3.0
    }

    /// Median price (HL average) as used by the Awesome Oscillator.
    #[inline]
    pub fn median_price(&self) -> f64 {
        (to_f64(self.max) + to_f64(self.min)) / 2.0
    }

    /// A day with no turnover had no trades.
    pub fn is_traded(&self) -> bool {
        !self.total_turnover.is_zero()
    }
}

#[inline]
fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Chronologically ascending records for one symbol, unique by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Symbol identifier
    pub symbol: Symbol,
    records: Vec<PriceRecord>,
}

impl PriceSeries {
    /// Create an empty series.
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            records: Vec::new(),
        }
    }

    /// Build a series from records in any order.
    ///
    /// Records are sorted ascending; when a date repeats, the first
    /// occurrence in the input wins.
    pub fn from_records(symbol: Symbol, mut records: Vec<PriceRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        records.dedup_by_key(|r| r.date);
        Self { symbol, records }
    }

    /// Merge records, skipping dates already present. Returns the number added.
    pub fn merge(&mut self, records: impl IntoIterator<Item = PriceRecord>) -> usize {
        let mut added = 0;
        for record in records {
            if let Err(pos) = self.records.binary_search_by_key(&record.date, |r| r.date) {
                self.records.insert(pos, record);
                added += 1;
            }
        }
        added
    }

    /// Copy of the series keeping only records that match the predicate.
    pub fn filtered(&self, predicate: impl Fn(&PriceRecord) -> bool) -> Self {
        Self {
            symbol: self.symbol.clone(),
            records: self.records.iter().filter(|r| predicate(r)).cloned().collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<PriceRecord> {
        self.records
    }

    pub fn first(&self) -> Option<&PriceRecord> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&PriceRecord> {
        self.records.last()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.last().map(|r| r.date)
    }

    /// Last trade price of the most recent record.
    pub fn latest_price(&self) -> Option<Decimal> {
        self.last().map(|r| r.last_price)
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.records.binary_search_by_key(&date, |r| r.date).is_ok()
    }

    /// Last trade prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.records.iter().map(|r| to_f64(r.last_price)).collect()
    }

    /// Daily highs as a vector.
    pub fn highs(&self) -> Vec<f64> {
        self.records.iter().map(|r| to_f64(r.max)).collect()
    }

    /// Daily lows as a vector.
    pub fn lows(&self) -> Vec<f64> {
        self.records.iter().map(|r| to_f64(r.min)).collect()
    }

    pub fn typical_prices(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.typical_price()).collect()
    }

    pub fn median_prices(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.median_price()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriceRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn symbol() -> Symbol {
        Symbol::new("ALK").unwrap()
    }

    #[test]
    fn test_record_calculations() {
        let record = PriceRecord::new(d(1), dec!(105), dec!(110), dec!(95));

        assert!((record.typical_price() - 103.333333).abs() < 0.001);
        assert!((record.median_price() - 102.5).abs() < 1e-10);
        assert!(!record.is_traded());
        assert!(record
            .with_turnover(dec!(1000), dec!(1500))
            .is_traded());
    }

    #[test]
    fn test_from_records_sorts_descending_input() {
        let records = vec![
            PriceRecord::new(d(3), dec!(3), dec!(3), dec!(3)),
            PriceRecord::new(d(2), dec!(2), dec!(2), dec!(2)),
            PriceRecord::new(d(1), dec!(1), dec!(1), dec!(1)),
        ];
        let series = PriceSeries::from_records(symbol(), records);

        assert_eq!(series.first_date(), Some(d(1)));
        assert_eq!(series.last_date(), Some(d(3)));
        assert_eq!(series.latest_price(), Some(dec!(3)));
    }

    #[test]
    fn test_from_records_keeps_first_duplicate() {
        let records = vec![
            PriceRecord::new(d(2), dec!(20), dec!(20), dec!(20)),
            PriceRecord::new(d(1), dec!(1), dec!(1), dec!(1)),
            PriceRecord::new(d(2), dec!(99), dec!(99), dec!(99)),
        ];
        let series = PriceSeries::from_records(symbol(), records);

        assert_eq!(series.len(), 2);
        assert_eq!(series.latest_price(), Some(dec!(20)));
    }

    #[test]
    fn test_merge_skips_existing_dates() {
        let mut series = PriceSeries::from_records(
            symbol(),
            vec![
                PriceRecord::new(d(1), dec!(1), dec!(1), dec!(1)),
                PriceRecord::new(d(3), dec!(3), dec!(3), dec!(3)),
            ],
        );

        let added = series.merge(vec![
            PriceRecord::new(d(2), dec!(2), dec!(2), dec!(2)),
            PriceRecord::new(d(3), dec!(30), dec!(30), dec!(30)),
        ]);

        assert_eq!(added, 1);
        assert_eq!(series.len(), 3);
        assert!(series.contains_date(d(2)));
        assert_eq!(series.latest_price(), Some(dec!(3)));
    }

    #[test]
    fn test_series_extractions() {
        let series = PriceSeries::from_records(
            symbol(),
            vec![
                PriceRecord::new(d(1), dec!(100.5), dec!(101), dec!(99)),
                PriceRecord::new(d(2), dec!(101.5), dec!(102), dec!(100)),
            ],
        );

        assert_eq!(series.closes(), vec![100.5, 101.5]);
        assert_eq!(series.highs(), vec![101.0, 102.0]);
        assert_eq!(series.lows(), vec![99.0, 100.0]);
    }
}
