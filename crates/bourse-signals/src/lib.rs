//! Signal derivation.
//!
//! This crate turns indicator values into discrete recommendations:
//! - Threshold rules for oscillators and price-crossing rules for moving averages
//! - Per-symbol recommendations with a Buy/Sell/Hold tally
//! - The analysis pipeline (window filter, indicators, signals) and its report

mod analysis;
mod recommendation;
mod report;
mod rules;

pub use analysis::Analyzer;
pub use recommendation::{Recommendation, SignalTally};
pub use report::{AnalysisReport, IndicatorReading};
pub use rules::{decide, Band, SignalRules, SignalThresholds};
