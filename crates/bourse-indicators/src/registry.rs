//! Indicator registry.
//!
//! The engine holds one boxed [`Indicator`] per kind. Adding an indicator to
//! the analysis means registering one more entry.

use std::collections::BTreeMap;

use bourse_core::traits::Indicator;
use bourse_core::types::{IndicatorGroup, IndicatorKind, IndicatorResult, PriceSeries};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::momentum::{AwesomeOscillator, Rsi, StochRsi};
use crate::moving_average::{Ema, Kama, Sma, Wma};
use crate::trend::{Cci, Ichimoku, Trix};

/// Values of every registered indicator, split by group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub oscillators: BTreeMap<IndicatorKind, Option<Decimal>>,
    pub moving_averages: BTreeMap<IndicatorKind, Option<Decimal>>,
}

impl IndicatorSnapshot {
    pub fn get(&self, kind: IndicatorKind) -> Option<Decimal> {
        let group = match kind.group() {
            IndicatorGroup::Oscillator => &self.oscillators,
            IndicatorGroup::MovingAverage => &self.moving_averages,
        };
        group.get(&kind).copied().flatten()
    }

    /// All entries, oscillators first.
    pub fn iter(&self) -> impl Iterator<Item = (IndicatorKind, Option<Decimal>)> + '_ {
        self.oscillators
            .iter()
            .chain(&self.moving_averages)
            .map(|(kind, value)| (*kind, *value))
    }

    /// Number of indicators that produced a value.
    pub fn available(&self) -> usize {
        self.iter().filter(|(_, value)| value.is_some()).count()
    }
}

/// Ordered collection of indicators evaluated together.
pub struct IndicatorEngine {
    indicators: Vec<Box<dyn Indicator>>,
}

impl IndicatorEngine {
    /// Engine with the ten standard indicators and their lookbacks.
    pub fn new() -> Self {
        let mut engine = Self::empty();
        engine
            .register(Rsi::default())
            .register(StochRsi::default())
            .register(Cci::default())
            .register(AwesomeOscillator::default())
            .register(Trix::default())
            .register(Sma::new(2).with_min_lookback(4))
            .register(Ema::new(14))
            .register(Wma::new(9))
            .register(Kama::new().with_min_lookback(40))
            .register(Ichimoku::default().with_min_lookback(52));
        engine
    }

    pub fn empty() -> Self {
        Self {
            indicators: Vec::new(),
        }
    }

    /// Register an indicator, replacing any existing entry of the same kind.
    pub fn register(&mut self, indicator: impl Indicator + 'static) -> &mut Self {
        let kind = indicator.kind();
        self.indicators.retain(|i| i.kind() != kind);
        self.indicators.push(Box::new(indicator));
        self
    }

    pub fn get(&self, kind: IndicatorKind) -> Option<&dyn Indicator> {
        self.indicators
            .iter()
            .find(|i| i.kind() == kind)
            .map(|i| i.as_ref())
    }

    /// Registered kinds, in registration order.
    pub fn kinds(&self) -> Vec<IndicatorKind> {
        self.indicators.iter().map(|i| i.kind()).collect()
    }

    /// `(kind, min_lookback)` pairs, in registration order.
    pub fn list(&self) -> Vec<(IndicatorKind, usize)> {
        self.indicators
            .iter()
            .map(|i| (i.kind(), i.min_lookback()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    /// Evaluate every registered indicator.
    pub fn evaluate_all(&self, series: &PriceSeries) -> Vec<IndicatorResult> {
        self.indicators.iter().map(|i| i.evaluate(series)).collect()
    }

    /// Evaluate every registered indicator, grouped.
    pub fn calc_all(&self, series: &PriceSeries) -> IndicatorSnapshot {
        let mut snapshot = IndicatorSnapshot::default();
        for result in self.evaluate_all(series) {
            let group = match result.kind.group() {
                IndicatorGroup::Oscillator => &mut snapshot.oscillators,
                IndicatorGroup::MovingAverage => &mut snapshot.moving_averages,
            };
            group.insert(result.kind, result.value);
        }
        snapshot
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IndicatorEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndicatorEngine")
            .field("indicators", &self.kinds())
            .finish()
    }
}
