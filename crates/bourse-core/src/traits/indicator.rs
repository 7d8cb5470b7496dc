//! Indicator trait definitions.

use rust_decimal::Decimal;

use crate::types::{IndicatorKind, IndicatorResult, PriceSeries};

/// Trait for technical indicators.
///
/// Indicators reduce an ascending price series to a single value. Every
/// indicator declares a minimum lookback; below it the result is `None`
/// instead of a degraded value.
pub trait Indicator: Send + Sync {
    /// Which indicator this is.
    fn kind(&self) -> IndicatorKind;

    /// Minimum number of records required.
    fn min_lookback(&self) -> usize;

    /// Raw computation. Only called with at least `min_lookback` records.
    fn compute(&self, series: &PriceSeries) -> Option<f64>;

    /// Gated, rounded value.
    ///
    /// # Returns
    /// `None` for a series shorter than the lookback or a non-finite result,
    /// otherwise the value rounded to 2 decimal digits
    fn calculate(&self, series: &PriceSeries) -> Option<Decimal> {
        if series.len() < self.min_lookback() {
            return None;
        }
        self.compute(series).and_then(round_value)
    }

    /// Gated value tagged with the indicator kind.
    fn evaluate(&self, series: &PriceSeries) -> IndicatorResult {
        IndicatorResult {
            kind: self.kind(),
            value: self.calculate(series),
        }
    }

    /// Get the name of the indicator.
    fn name(&self) -> &'static str {
        self.kind().name()
    }
}

/// Round to 2 decimal digits, half to even; `None` for NaN or infinity.
pub fn round_value(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::try_from(value).ok().map(|d| d.round_dp(2))
}
