//! Moving average indicators.
//!
//! The signal for every indicator here compares the latest price against the
//! average, so they all report a price-level value.

use bourse_core::traits::Indicator;
use bourse_core::types::{IndicatorKind, PriceSeries};

use crate::smoothing;

/// Simple Moving Average (SMA).
///
/// Calculates the arithmetic mean of the last N values.
#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    min_lookback: usize,
}

impl Sma {
    /// Create a new SMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self {
            period,
            min_lookback: period,
        }
    }

    /// Require more history than the window itself before reporting.
    pub fn with_min_lookback(mut self, min_lookback: usize) -> Self {
        self.min_lookback = min_lookback.max(self.period);
        self
    }

    /// Full SMA series, one value per complete window.
    pub fn series(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        let mut result = Vec::with_capacity(data.len() - self.period + 1);
        let period_f64 = self.period as f64;

        let mut sum: f64 = data[..self.period].iter().sum();
        result.push(sum / period_f64);

        // Sliding window
        for i in self.period..data.len() {
            sum = sum - data[i - self.period] + data[i];
            result.push(sum / period_f64);
        }

        result
    }
}

impl Indicator for Sma {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Sma
    }

    fn min_lookback(&self) -> usize {
        self.min_lookback
    }

    fn compute(&self, series: &PriceSeries) -> Option<f64> {
        self.series(&series.closes()).last().copied()
    }
}

/// Exponential Moving Average (EMA).
///
/// Gives more weight to recent prices using an exponential decay.
#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    multiplier: f64,
}

impl Ema {
    /// Create a new EMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        let multiplier = 2.0 / (period as f64 + 1.0);
        Self { period, multiplier }
    }

    /// Full EMA series seeded with the SMA of the first `period` values.
    pub fn series(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        let mut result = Vec::with_capacity(data.len() - self.period + 1);

        let initial_sma: f64 = data[..self.period].iter().sum::<f64>() / self.period as f64;
        result.push(initial_sma);

        let mut ema = initial_sma;
        let one_minus_mult = 1.0 - self.multiplier;

        for &price in &data[self.period..] {
            ema = price * self.multiplier + ema * one_minus_mult;
            result.push(ema);
        }

        result
    }
}

impl Indicator for Ema {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Ema
    }

    fn min_lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &PriceSeries) -> Option<f64> {
        self.series(&series.closes()).last().copied()
    }
}

/// Weighted Moving Average (WMA).
///
/// Gives linearly decreasing weights to older prices.
#[derive(Debug, Clone)]
pub struct Wma {
    period: usize,
    weights_sum: f64,
}

impl Wma {
    /// Create a new WMA with the specified period.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        // 1 + 2 + ... + n
        let weights_sum = (period * (period + 1)) as f64 / 2.0;
        Self {
            period,
            weights_sum,
        }
    }

    pub fn series(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        data.windows(self.period)
            .map(|window| {
                let weighted_sum: f64 = window
                    .iter()
                    .enumerate()
                    .map(|(i, &price)| price * (i + 1) as f64)
                    .sum();
                weighted_sum / self.weights_sum
            })
            .collect()
    }
}

impl Indicator for Wma {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Wma
    }

    fn min_lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &PriceSeries) -> Option<f64> {
        self.series(&series.closes()).last().copied()
    }
}

/// Kaufman's Adaptive Moving Average (KAMA).
///
/// Smoothing speeds up when price moves efficiently in one direction and
/// slows down in choppy markets. The efficiency ratio over `period` bars
/// scales the smoothing constant between the `fast` and `slow` EMA factors.
#[derive(Debug, Clone)]
pub struct Kama {
    period: usize,
    fast: usize,
    slow: usize,
    min_lookback: usize,
}

impl Kama {
    /// Create a KAMA with the usual (10, 2, 30) parameters.
    pub fn new() -> Self {
        Self::with_params(10, 2, 30)
    }

    pub fn with_params(period: usize, fast: usize, slow: usize) -> Self {
        assert!(period > 0 && fast > 0 && slow > 0);
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            period,
            fast,
            slow,
            min_lookback: period + 1,
        }
    }

    /// Require more history than the efficiency window before reporting.
    pub fn with_min_lookback(mut self, min_lookback: usize) -> Self {
        self.min_lookback = min_lookback.max(self.period + 1);
        self
    }

    pub fn series(&self, data: &[f64]) -> Vec<f64> {
        if data.len() <= self.period {
            return vec![];
        }

        let fast_sc = smoothing::span_alpha(self.fast);
        let slow_sc = smoothing::span_alpha(self.slow);

        let mut kama = data[self.period - 1];
        let mut result = Vec::with_capacity(data.len() - self.period);

        for i in self.period..data.len() {
            let change = (data[i] - data[i - self.period]).abs();
            let volatility: f64 = ((i + 1 - self.period)..=i)
                .map(|j| (data[j] - data[j - 1]).abs())
                .sum();
            let efficiency = if volatility == 0.0 {
                0.0
            } else {
                change / volatility
            };
            let sc = (efficiency * (fast_sc - slow_sc) + slow_sc).powi(2);
            kama += sc * (data[i] - kama);
            result.push(kama);
        }

        result
    }
}

impl Default for Kama {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for Kama {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Kama
    }

    fn min_lookback(&self) -> usize {
        self.min_lookback
    }

    fn compute(&self, series: &PriceSeries) -> Option<f64> {
        self.series(&series.closes()).last().copied()
    }
}
