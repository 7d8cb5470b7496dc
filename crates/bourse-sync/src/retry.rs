//! Retry with fixed or exponential backoff.

use std::time::Duration;

/// Backoff strategy between attempts of one chunk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    /// Same delay before every retry.
    Fixed { delay: Duration },
    /// `base * factor^attempt`, capped at `max`.
    Exponential {
        base: Duration,
        factor: f64,
        max: Duration,
    },
}

impl Default for Backoff {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_millis(500),
            factor: 2.0,
            max: Duration::from_secs(10),
        }
    }
}

impl Backoff {
    /// Delay before retry number `attempt` (0-based).
    pub fn delay(self, attempt: u32) -> Duration {
        match self {
            Self::Fixed { delay } => delay,
            Self::Exponential { base, factor, max } => {
                let seconds = base.as_secs_f64() * factor.powi(attempt as i32);
                let capped = seconds.min(max.as_secs_f64());
                if capped.is_finite() && capped >= 0.0 {
                    Duration::from_secs_f64(capped)
                } else {
                    max
                }
            }
        }
    }
}

/// How transient chunk failures are retried.
///
/// Total attempts per chunk are `max_retries + 1`. Only errors the source
/// reports as transient are retried.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff: Backoff::default(),
        }
    }
}

impl RetryPolicy {
    pub fn exponential(max_retries: u32, base: Duration, max: Duration) -> Self {
        Self {
            max_retries,
            backoff: Backoff::Exponential {
                base,
                factor: 2.0,
                max,
            },
        }
    }

    pub fn fixed(delay: Duration, max_retries: u32) -> Self {
        Self {
            max_retries,
            backoff: Backoff::Fixed { delay },
        }
    }

    /// One attempt per chunk.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.backoff.delay(attempt)
    }
}
