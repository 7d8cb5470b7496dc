//! Trading signals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete recommendation derived from one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Buy => "Buy",
            Signal::Sell => "Sell",
            Signal::Hold => "Hold",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
