//! Technical indicators over daily price series.
//!
//! This crate provides the indicators used for signal derivation:
//! - Momentum oscillators (RSI, Stochastic RSI %D, Awesome Oscillator)
//! - Trend indicators (CCI, Trix, Ichimoku conversion line)
//! - Moving averages (SMA, EMA, WMA, KAMA)
//!
//! Every indicator declares a minimum lookback and reports `None` below it.
//! [`IndicatorEngine`] evaluates the whole set at once.

pub mod momentum;
pub mod moving_average;
pub mod registry;
pub mod smoothing;
pub mod trend;

pub use momentum::{AwesomeOscillator, Rsi, StochRsi};
pub use moving_average::{Ema, Kama, Sma, Wma};
pub use registry::{IndicatorEngine, IndicatorSnapshot};
pub use trend::{Cci, Ichimoku, Trix};
