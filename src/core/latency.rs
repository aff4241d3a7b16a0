//! Artificial latency injection
//!
//! Each API operation sleeps for a uniformly random duration before touching
//! the store, so clients see the jittery response times of a remote service.
//! The sleep is a plain `tokio::time::sleep`: it parks only the calling
//! request and holds no store connection.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lower bound of the default delay window
pub const DEFAULT_MIN_MS: u64 = 50;
/// Upper bound of the default delay window
pub const DEFAULT_MAX_MS: u64 = 300;

/// Uniform random delay in `[min_ms, max_ms]` milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencySimulator {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl LatencySimulator {
    /// Create a simulator; the bounds are swapped if given in reverse.
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }

    /// A simulator that never sleeps (used by tests)
    pub fn disabled() -> Self {
        Self::new(0, 0)
    }

    pub fn is_disabled(&self) -> bool {
        self.max_ms == 0
    }

    /// Draw the next delay
    pub fn sample(&self) -> Duration {
        if self.min_ms == self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        let ms = rand::thread_rng().gen_range(self.min_ms..=self.max_ms);
        Duration::from_millis(ms)
    }

    /// Sleep for one sampled delay
    pub async fn pause(&self) {
        if self.is_disabled() {
            return;
        }
        let delay = self.sample();
        tracing::trace!(delay_ms = delay.as_millis() as u64, "simulating network latency");
        tokio::time::sleep(delay).await;
    }
}

impl Default for LatencySimulator {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_MS, DEFAULT_MAX_MS)
    }
}
