//! Per-symbol recommendations.

use std::collections::BTreeMap;

use bourse_core::types::{IndicatorKind, Signal, Symbol};
use serde::{Deserialize, Serialize};

/// Count of each signal across indicators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalTally {
    pub buy: usize,
    pub sell: usize,
    pub hold: usize,
}

impl SignalTally {
    pub fn record(&mut self, signal: Signal) {
        match signal {
            Signal::Buy => self.buy += 1,
            Signal::Sell => self.sell += 1,
            Signal::Hold => self.hold += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.buy + self.sell + self.hold
    }
}

/// One signal per indicator for a symbol. Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub symbol: Symbol,
    pub per_indicator_signals: BTreeMap<IndicatorKind, Signal>,
}

impl Recommendation {
    pub fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            per_indicator_signals: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, kind: IndicatorKind, signal: Signal) {
        self.per_indicator_signals.insert(kind, signal);
    }

    pub fn signal(&self, kind: IndicatorKind) -> Option<Signal> {
        self.per_indicator_signals.get(&kind).copied()
    }

    pub fn tally(&self) -> SignalTally {
        let mut tally = SignalTally::default();
        for signal in self.per_indicator_signals.values() {
            tally.record(*signal);
        }
        tally
    }
}
