//! Indicator identities.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which report section an indicator belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorGroup {
    Oscillator,
    MovingAverage,
}

/// The indicators computed for every analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IndicatorKind {
    #[serde(rename = "Relative Strength Index")]
    Rsi,
    #[serde(rename = "Stochastic RSI %D")]
    StochRsi,
    #[serde(rename = "Commodity Channel Index")]
    Cci,
    #[serde(rename = "Trix")]
    Trix,
    #[serde(rename = "Awesome Oscillator")]
    AwesomeOscillator,
    #[serde(rename = "Simple Moving Average")]
    Sma,
    #[serde(rename = "Exponential Moving Average")]
    Ema,
    #[serde(rename = "Weighted Moving Average")]
    Wma,
    #[serde(rename = "Kaufman's Adaptive Moving Average")]
    Kama,
    #[serde(rename = "Ichimoku")]
    Ichimoku,
}

impl IndicatorKind {
    pub fn name(&self) -> &'static str {
        match self {
            IndicatorKind::Rsi => "Relative Strength Index",
            IndicatorKind::StochRsi => "Stochastic RSI %D",
            IndicatorKind::Cci => "Commodity Channel Index",
            IndicatorKind::Trix => "Trix",
            IndicatorKind::AwesomeOscillator => "Awesome Oscillator",
            IndicatorKind::Sma => "Simple Moving Average",
            IndicatorKind::Ema => "Exponential Moving Average",
            IndicatorKind::Wma => "Weighted Moving Average",
            IndicatorKind::Kama => "Kaufman's Adaptive Moving Average",
            IndicatorKind::Ichimoku => "Ichimoku",
        }
    }

    pub fn group(&self) -> IndicatorGroup {
        match self {
            IndicatorKind::Rsi
            | IndicatorKind::StochRsi
            | IndicatorKind::Cci
            | IndicatorKind::Trix
            | IndicatorKind::AwesomeOscillator => IndicatorGroup::Oscillator,
            IndicatorKind::Sma
            | IndicatorKind::Ema
            | IndicatorKind::Wma
            | IndicatorKind::Kama
            | IndicatorKind::Ichimoku => IndicatorGroup::MovingAverage,
        }
    }

    /// Whether the signal compares the latest price against the value.
    pub fn is_trend_following(&self) -> bool {
        self.group() == IndicatorGroup::MovingAverage
    }

    pub fn all() -> &'static [IndicatorKind] {
        &[
            IndicatorKind::Rsi,
            IndicatorKind::StochRsi,
            IndicatorKind::Cci,
            IndicatorKind::Trix,
            IndicatorKind::AwesomeOscillator,
            IndicatorKind::Sma,
            IndicatorKind::Ema,
            IndicatorKind::Wma,
            IndicatorKind::Kama,
            IndicatorKind::Ichimoku,
        ]
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One indicator's value; `None` means the series was too short.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorResult {
    pub kind: IndicatorKind,
    pub value: Option<Decimal>,
}
