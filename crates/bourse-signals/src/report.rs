//! Analysis report generation.

use std::collections::BTreeMap;

use bourse_core::types::{IndicatorGroup, IndicatorKind, Signal, Symbol, TimePeriod};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Recommendation;

/// One indicator's value paired with its signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorReading {
    /// `None` when the window is shorter than the indicator's lookback
    pub value: Option<Decimal>,
    pub signal: Signal,
}

/// Complete analysis of one symbol over one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub symbol: Symbol,
    pub period: TimePeriod,
    pub as_of: NaiveDateTime,
    /// Records left after the time-window filter
    pub records_used: usize,
    pub latest_price: Option<Decimal>,
    pub oscillators: BTreeMap<IndicatorKind, IndicatorReading>,
    pub moving_averages: BTreeMap<IndicatorKind, IndicatorReading>,
}

impl AnalysisReport {
    pub fn new(symbol: Symbol, period: TimePeriod, as_of: NaiveDateTime) -> Self {
        Self {
            symbol,
            period,
            as_of,
            records_used: 0,
            latest_price: None,
            oscillators: BTreeMap::new(),
            moving_averages: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, kind: IndicatorKind, reading: IndicatorReading) {
        match kind.group() {
            IndicatorGroup::Oscillator => self.oscillators.insert(kind, reading),
            IndicatorGroup::MovingAverage => self.moving_averages.insert(kind, reading),
        };
    }

    pub fn reading(&self, kind: IndicatorKind) -> Option<&IndicatorReading> {
        self.oscillators
            .get(&kind)
            .or_else(|| self.moving_averages.get(&kind))
    }

    /// The signals alone.
    pub fn recommendation(&self) -> Recommendation {
        let mut rec = Recommendation::new(self.symbol.clone());
        for (kind, reading) in self.oscillators.iter().chain(&self.moving_averages) {
            rec.insert(*kind, reading.signal);
        }
        rec
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str(&format!("  ANALYSIS: {:<20} PERIOD: {}\n", self.symbol, self.period));
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str(&format!(
            "  As of:               {}\n",
            self.as_of.format("%Y-%m-%d %H:%M")
        ));
        s.push_str(&format!("  Records used:        {}\n", self.records_used));
        match self.latest_price {
            Some(price) => s.push_str(&format!("  Latest price:        {:.2}\n", price)),
            None => s.push_str("  Latest price:        n/a\n"),
        }
        s.push('\n');

        push_section(&mut s, "OSCILLATORS", &self.oscillators);
        push_section(&mut s, "MOVING AVERAGES", &self.moving_averages);

        let tally = self.recommendation().tally();
        s.push_str("SIGNALS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Buy: {}   Sell: {}   Hold: {}\n",
            tally.buy, tally.sell, tally.hold
        ));
        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn push_section(s: &mut String, title: &str, readings: &BTreeMap<IndicatorKind, IndicatorReading>) {
    s.push_str(title);
    s.push('\n');
    s.push_str("───────────────────────────────────────────────────────────\n");
    for (kind, reading) in readings {
        let value = reading
            .value
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "n/a".to_string());
        s.push_str(&format!(
            "  {:<36} {:>10}  {}\n",
            kind.name(),
            value,
            reading.signal
        ));
    }
    s.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn report() -> AnalysisReport {
        let as_of = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let mut report = AnalysisReport::new(Symbol::new("ALK").unwrap(), TimePeriod::OneYear, as_of);
        report.records_used = 120;
        report.latest_price = Some(dec!(25100));
        report.insert(
            IndicatorKind::Rsi,
            IndicatorReading {
                value: Some(dec!(72.5)),
                signal: Signal::Sell,
            },
        );
        report.insert(
            IndicatorKind::Ichimoku,
            IndicatorReading {
                value: None,
                signal: Signal::Hold,
            },
        );
        report
    }

    #[test]
    fn test_report_summary() {
        let summary = report().summary();

        assert!(summary.contains("ALK"));
        assert!(summary.contains("1 year"));
        assert!(summary.contains("Relative Strength Index"));
        assert!(summary.contains("72.50"));
        assert!(summary.contains("n/a"));
        assert!(summary.contains("Buy: 0   Sell: 1   Hold: 1"));
    }

    #[test]
    fn test_groups_and_recommendation() {
        let report = report();

        assert!(report.oscillators.contains_key(&IndicatorKind::Rsi));
        assert!(report.moving_averages.contains_key(&IndicatorKind::Ichimoku));
        assert_eq!(
            report.reading(IndicatorKind::Rsi).map(|r| r.signal),
            Some(Signal::Sell)
        );
        assert_eq!(report.recommendation().tally().total(), 2);
    }

    #[test]
    fn test_to_json() {
        let json = report().to_json().unwrap();

        assert!(json.contains("\"Relative Strength Index\""));
        assert!(json.contains("\"1 year\""));
    }
}
