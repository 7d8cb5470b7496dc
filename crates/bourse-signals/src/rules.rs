//! Decision rules mapping an indicator value to a signal.

use bourse_core::error::BourseError;
use bourse_core::types::{IndicatorKind, Signal};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Exclusive oversold/overbought band for an oscillator.
///
/// Strictly above `upper` sells, strictly below `lower` buys, and anything
/// in between (bounds included) holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    /// Oversold level (buy below this)
    pub lower: Decimal,
    /// Overbought level (sell above this)
    pub upper: Decimal,
}

impl Band {
    pub const fn new(lower: Decimal, upper: Decimal) -> Self {
        Self { lower, upper }
    }

    pub fn classify(&self, value: Decimal) -> Signal {
        if value > self.upper {
            Signal::Sell
        } else if value < self.lower {
            Signal::Buy
        } else {
            Signal::Hold
        }
    }
}

/// Band thresholds for the oscillators that use them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalThresholds {
    pub rsi: Band,
    pub stoch_rsi: Band,
    pub cci: Band,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            rsi: Band::new(dec!(30), dec!(70)),
            stoch_rsi: Band::new(dec!(20), dec!(80)),
            cci: Band::new(dec!(-100), dec!(100)),
        }
    }
}

impl SignalThresholds {
    /// Every band must have `lower < upper`.
    pub fn validate(&self) -> Result<(), BourseError> {
        for (name, band) in [
            ("rsi", &self.rsi),
            ("stoch_rsi", &self.stoch_rsi),
            ("cci", &self.cci),
        ] {
            if band.lower >= band.upper {
                return Err(BourseError::Validation(format!(
                    "signals.{name}: lower ({}) must be below upper ({})",
                    band.lower, band.upper
                )));
            }
        }
        Ok(())
    }
}

/// Signal rules parameterised by thresholds.
#[derive(Debug, Clone, Default)]
pub struct SignalRules {
    thresholds: SignalThresholds,
}

impl SignalRules {
    pub fn new(thresholds: SignalThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &SignalThresholds {
        &self.thresholds
    }

    /// Decide a signal for one indicator.
    ///
    /// A missing value always holds. Moving averages compare the latest
    /// price against the average and hold when there is no latest price.
    pub fn decide(
        &self,
        kind: IndicatorKind,
        value: Option<Decimal>,
        latest_price: Option<Decimal>,
    ) -> Signal {
        let Some(value) = value else {
            return Signal::Hold;
        };

        match kind {
            IndicatorKind::Rsi => self.thresholds.rsi.classify(value),
            IndicatorKind::StochRsi => self.thresholds.stoch_rsi.classify(value),
            IndicatorKind::Cci => self.thresholds.cci.classify(value),
            IndicatorKind::Trix | IndicatorKind::AwesomeOscillator => by_sign(value),
            IndicatorKind::Sma
            | IndicatorKind::Ema
            | IndicatorKind::Wma
            | IndicatorKind::Kama
            | IndicatorKind::Ichimoku => match latest_price {
                Some(price) => by_sign(price - value),
                None => Signal::Hold,
            },
        }
    }
}

/// Decide with the default thresholds.
pub fn decide(kind: IndicatorKind, value: Option<Decimal>, latest_price: Option<Decimal>) -> Signal {
    SignalRules::default().decide(kind, value, latest_price)
}

fn by_sign(value: Decimal) -> Signal {
    if value.is_zero() {
        Signal::Hold
    } else if value.is_sign_positive() {
        Signal::Buy
    } else {
        Signal::Sell
    }
}
