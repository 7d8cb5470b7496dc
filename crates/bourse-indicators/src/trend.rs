//! Trend indicators: CCI, Trix and the Ichimoku conversion line.

use bourse_core::traits::Indicator;
use bourse_core::types::{IndicatorKind, PriceSeries};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::smoothing;

/// Commodity Channel Index (CCI).
///
/// Distance of the typical price from its mean, in units of
/// `constant * mean absolute deviation`. Zero deviation reads 0.
#[derive(Debug, Clone)]
pub struct Cci {
    period: usize,
    constant: f64,
}

impl Cci {
    pub fn new(period: usize, constant: f64) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period, constant }
    }
}

impl Default for Cci {
    fn default() -> Self {
        Self::new(20, 0.015)
    }
}

impl Indicator for Cci {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Cci
    }

    fn min_lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &PriceSeries) -> Option<f64> {
        let typical = series.typical_prices();
        let window = &typical[typical.len().checked_sub(self.period)?..];
        let mean = window.iter().sum::<f64>() / self.period as f64;
        let mad = window.iter().map(|tp| (tp - mean).abs()).sum::<f64>() / self.period as f64;

        if mad == 0.0 {
            return Some(0.0);
        }
        let last = *window.last()?;
        Some((last - mean) / (self.constant * mad))
    }
}

/// Trix: one-period percent change of a triple-smoothed EMA.
#[derive(Debug, Clone)]
pub struct Trix {
    period: usize,
}

impl Trix {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }
}

impl Default for Trix {
    fn default() -> Self {
        Self::new(15)
    }
}

impl Indicator for Trix {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Trix
    }

    fn min_lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &PriceSeries) -> Option<f64> {
        let alpha = smoothing::span_alpha(self.period);
        let ema1 = smoothing::ewm(&series.closes(), alpha);
        let ema2 = smoothing::ewm(&ema1, alpha);
        let ema3 = smoothing::ewm(&ema2, alpha);

        let [previous, current] = ema3.get(ema3.len().checked_sub(2)?..)? else {
            return None;
        };
        if *previous == 0.0 {
            return None;
        }
        Some((current - previous) / previous * 100.0)
    }
}

/// Ichimoku conversion line (Tenkan-sen): midpoint of the highest high and
/// lowest low over the window.
#[derive(Debug, Clone)]
pub struct Ichimoku {
    window: usize,
    min_lookback: usize,
}

impl Ichimoku {
    pub fn new(window: usize) -> Self {
        assert!(window > 0, "Window must be greater than 0");
        Self {
            window,
            min_lookback: window,
        }
    }

    /// Require more history than the conversion window before reporting.
    pub fn with_min_lookback(mut self, min_lookback: usize) -> Self {
        self.min_lookback = min_lookback.max(self.window);
        self
    }
}

impl Default for Ichimoku {
    fn default() -> Self {
        Self::new(9)
    }
}

impl Indicator for Ichimoku {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Ichimoku
    }

    fn min_lookback(&self) -> usize {
        self.min_lookback
    }

    fn compute(&self, series: &PriceSeries) -> Option<f64> {
        let start = series.len().checked_sub(self.window)?;
        let recent = &series.records()[start..];
        let high = recent.iter().map(|r| r.max).max()?;
        let low = recent.iter().map(|r| r.min).min()?;

        ((high + low) / Decimal::TWO).to_f64()
    }
}
