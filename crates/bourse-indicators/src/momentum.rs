//! Momentum oscillators: RSI, Stochastic RSI and the Awesome Oscillator.

use bourse_core::traits::Indicator;
use bourse_core::types::{IndicatorKind, PriceSeries};

use crate::smoothing;

/// Relative Strength Index (RSI).
///
/// Gains and losses are smoothed with Wilder's exponential average
/// (`alpha = 1 / period`). A series with neither gains nor losses reads 50.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// RSI value for every input position.
    ///
    /// The first position has no previous price and counts as neither a gain
    /// nor a loss.
    pub fn series(&self, closes: &[f64]) -> Vec<f64> {
        rsi_series(closes, self.period)
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(14)
    }
}

impl Indicator for Rsi {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Rsi
    }

    fn min_lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &PriceSeries) -> Option<f64> {
        self.series(&series.closes()).last().copied()
    }
}

pub(crate) fn rsi_series(closes: &[f64], period: usize) -> Vec<f64> {
    if closes.is_empty() {
        return vec![];
    }

    let mut gains = Vec::with_capacity(closes.len());
    let mut losses = Vec::with_capacity(closes.len());
    gains.push(0.0);
    losses.push(0.0);

    for pair in closes.windows(2) {
        let change = pair[1] - pair[0];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    let alpha = 1.0 / period as f64;
    let avg_gains = smoothing::ewm(&gains, alpha);
    let avg_losses = smoothing::ewm(&losses, alpha);

    avg_gains
        .iter()
        .zip(&avg_losses)
        .map(|(&gain, &loss)| {
            let total = gain + loss;
            if total == 0.0 {
                50.0
            } else {
                100.0 * gain / total
            }
        })
        .collect()
}

/// Stochastic RSI, reported as the %D line on a 0-100 scale.
///
/// The RSI is normalised against its own range over `period` values, then
/// smoothed twice: %K over `smooth_k` and %D over `smooth_d`.
#[derive(Debug, Clone)]
pub struct StochRsi {
    period: usize,
    smooth_k: usize,
    smooth_d: usize,
}

impl StochRsi {
    pub fn new(period: usize, smooth_k: usize, smooth_d: usize) -> Self {
        assert!(period > 0 && smooth_k > 0 && smooth_d > 0);
        Self {
            period,
            smooth_k,
            smooth_d,
        }
    }

    /// The %D line for every input position.
    pub fn series(&self, closes: &[f64]) -> Vec<f64> {
        let rsi = rsi_series(closes, self.period);
        let lowest = smoothing::rolling_min(&rsi, self.period);
        let highest = smoothing::rolling_max(&rsi, self.period);

        let stoch: Vec<f64> = rsi
            .iter()
            .zip(lowest.iter().zip(&highest))
            .map(|(&value, (&low, &high))| {
                let range = high - low;
                if range == 0.0 {
                    0.5
                } else {
                    (value - low) / range
                }
            })
            .collect();

        let k = smoothing::rolling_mean(&stoch, self.smooth_k);
        smoothing::rolling_mean(&k, self.smooth_d)
            .into_iter()
            .map(|d| d * 100.0)
            .collect()
    }
}

impl Default for StochRsi {
    fn default() -> Self {
        Self::new(14, 3, 3)
    }
}

impl Indicator for StochRsi {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::StochRsi
    }

    fn min_lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &PriceSeries) -> Option<f64> {
        self.series(&series.closes()).last().copied()
    }
}

/// Awesome Oscillator: fast minus slow mean of the median price.
#[derive(Debug, Clone)]
pub struct AwesomeOscillator {
    fast: usize,
    slow: usize,
}

impl AwesomeOscillator {
    pub fn new(fast: usize, slow: usize) -> Self {
        assert!(fast > 0, "Fast period must be greater than 0");
        assert!(fast < slow, "Fast period must be less than slow period");
        Self { fast, slow }
    }
}

impl Default for AwesomeOscillator {
    fn default() -> Self {
        Self::new(5, 34)
    }
}

impl Indicator for AwesomeOscillator {
    fn kind(&self) -> IndicatorKind {
        IndicatorKind::AwesomeOscillator
    }

    fn min_lookback(&self) -> usize {
        self.slow
    }

    fn compute(&self, series: &PriceSeries) -> Option<f64> {
        let medians = series.median_prices();
        let fast = smoothing::mean_of_last(&medians, self.fast)?;
        let slow = smoothing::mean_of_last(&medians, self.slow)?;
        Some(fast - slow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{rising_closes, series_from_closes};
    use rust_decimal_macros::dec;

    #[test]
    fn test_rsi_gate() {
        let rsi = Rsi::default();
        let closes = rising_closes(14);

        assert_eq!(rsi.calculate(&series_from_closes(&closes[..13])), None);
        assert!(rsi.calculate(&series_from_closes(&closes)).is_some());
    }

    #[test]
    fn test_rsi_extremes() {
        let rsi = Rsi::default();

        let up = rsi.calculate(&series_from_closes(&rising_closes(30))).unwrap();
        assert_eq!(up, dec!(100));

        let falling: Vec<f64> = rising_closes(30).into_iter().rev().collect();
        let down = rsi.calculate(&series_from_closes(&falling)).unwrap();
        assert_eq!(down, dec!(0));

        let flat = vec![25.0; 20];
        assert_eq!(rsi.calculate(&series_from_closes(&flat)), Some(dec!(50)));
    }

    #[test]
    fn test_rsi_wilder_smoothing() {
        // One gain of 1 then one loss of 1, alpha = 0.5:
        // gains  ewm: 0, 0.5, 0.25   losses ewm: 0, 0, 0.5
        let result = rsi_series(&[10.0, 11.0, 10.0], 2);
        assert_eq!(result.len(), 3);
        assert!((result[0] - 50.0).abs() < 1e-10);
        assert!((result[1] - 100.0).abs() < 1e-10);
        assert!((result[2] - 100.0 * 0.25 / 0.75).abs() < 1e-10);
    }

    #[test]
    fn test_stoch_rsi_range() {
        let stoch = StochRsi::default();
        let closes: Vec<f64> = (0..40)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0)
            .collect();

        let values = stoch.series(&closes);
        assert_eq!(values.len(), closes.len());
        assert!(values.iter().all(|v| *v > -1e-9 && *v < 100.0 + 1e-9));
    }

    #[test]
    fn test_stoch_rsi_flat_is_midpoint() {
        let stoch = StochRsi::default();
        let flat = vec![10.0; 14];

        assert_eq!(stoch.calculate(&series_from_closes(&flat[..13])), None);
        assert_eq!(stoch.calculate(&series_from_closes(&flat)), Some(dec!(50)));
    }

    #[test]
    fn test_awesome_oscillator() {
        let ao = AwesomeOscillator::default();
        let closes = rising_closes(34);

        assert_eq!(ao.calculate(&series_from_closes(&closes[..33])), None);
        // Medians rise by 1 per bar: mean of last 5 minus mean of last 34
        // is (34 - 5) / 2 = 14.5
        assert_eq!(ao.calculate(&series_from_closes(&closes)), Some(dec!(14.5)));
    }
}
