//! Analysis pipeline: window filter, indicators, signals.

use bourse_core::types::{PriceSeries, TimePeriod};
use bourse_core::window;
use bourse_indicators::IndicatorEngine;
use chrono::NaiveDateTime;
use tracing::debug;

use crate::{AnalysisReport, IndicatorReading, SignalRules, SignalThresholds};

/// Runs the indicator engine and signal rules over a symbol's history.
#[derive(Debug, Default)]
pub struct Analyzer {
    engine: IndicatorEngine,
    rules: SignalRules,
}

impl Analyzer {
    pub fn new(engine: IndicatorEngine, thresholds: SignalThresholds) -> Self {
        Self {
            engine,
            rules: SignalRules::new(thresholds),
        }
    }

    pub fn engine(&self) -> &IndicatorEngine {
        &self.engine
    }

    /// Analyze the trailing `period` of a series as of `now`.
    ///
    /// Moving-average signals use the latest price of the filtered window, so
    /// an empty window holds on everything.
    pub fn analyze(&self, series: &PriceSeries, period: TimePeriod, now: NaiveDateTime) -> AnalysisReport {
        let windowed = window::filter(series, period, now);
        let latest_price = windowed.latest_price();

        debug!(
            symbol = %series.symbol,
            period = %period,
            total = series.len(),
            used = windowed.len(),
            "Analyzing series"
        );

        let mut report = AnalysisReport::new(series.symbol.clone(), period, now);
        report.records_used = windowed.len();
        report.latest_price = latest_price;

        for result in self.engine.evaluate_all(&windowed) {
            let signal = self.rules.decide(result.kind, result.value, latest_price);
            report.insert(
                result.kind,
                IndicatorReading {
                    value: result.value,
                    signal,
                },
            );
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bourse_core::types::{IndicatorKind, PriceRecord, Signal, Symbol};
    use chrono::{Duration, NaiveDate};
    use rust_decimal::Decimal;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap()
    }

    /// One record per day ending today, last price rising by 1 each day.
    fn rising_series(len: usize) -> PriceSeries {
        let today = now().date();
        let records = (0..len)
            .map(|i| {
                let price = Decimal::from(100 + i as i64);
                let date = today - Duration::days((len - 1 - i) as i64);
                PriceRecord::new(date, price, price + Decimal::ONE, price - Decimal::ONE)
            })
            .collect();
        PriceSeries::from_records(Symbol::new("ALK").unwrap(), records)
    }

    #[test]
    fn test_rising_series_signals() {
        let analyzer = Analyzer::default();
        let report = analyzer.analyze(&rising_series(60), TimePeriod::AllTime, now());
        let rec = report.recommendation();

        assert_eq!(report.records_used, 60);
        for kind in [IndicatorKind::Sma, IndicatorKind::Ema, IndicatorKind::Wma] {
            let reading = report.reading(kind).unwrap();
            assert!(reading.value.unwrap() < report.latest_price.unwrap());
            assert_eq!(reading.signal, Signal::Buy, "{kind}");
        }
        assert!(report.reading(IndicatorKind::Rsi).unwrap().value.unwrap() > Decimal::from(70));
        assert_eq!(rec.signal(IndicatorKind::Rsi), Some(Signal::Sell));
        assert_eq!(rec.tally().total(), 10);
    }

    #[test]
    fn test_short_window_holds() {
        let analyzer = Analyzer::default();
        let report = analyzer.analyze(&rising_series(60), TimePeriod::OneWeek, now());

        // Today plus the six days before it
        assert_eq!(report.records_used, 7);
        assert_eq!(report.reading(IndicatorKind::Rsi).unwrap().value, None);
        assert_eq!(report.reading(IndicatorKind::Sma).unwrap().signal, Signal::Buy);
        assert_eq!(report.reading(IndicatorKind::Ema).unwrap().signal, Signal::Hold);
    }

    #[test]
    fn test_empty_window() {
        let analyzer = Analyzer::default();
        let series = PriceSeries::new(Symbol::new("ALK").unwrap());
        let report = analyzer.analyze(&series, TimePeriod::OneDay, now());

        assert_eq!(report.records_used, 0);
        assert_eq!(report.latest_price, None);
        assert_eq!(report.recommendation().tally().hold, 10);
    }
}
