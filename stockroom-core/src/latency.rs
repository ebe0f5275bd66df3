//! Latency and failure model for the simulated backends.
//!
//! Every simulated call sleeps a whole number of time units drawn uniformly
//! from `min_units..=max_units`, then fails with probability `failure_rate`. Draws are
//! independent between calls.

use rand::Rng;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulatedLatency {
    /// Length of one time unit in milliseconds
    pub unit_ms: u64,
    /// Lower bound on the drawn units; raised no higher than `max_units`
    pub min_units: u32,
    pub max_units: u32,
    /// Probability in `[0, 1]` that a call fails after its delay
    pub failure_rate: f64,
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self {
            unit_ms: 1000,
            min_units: 0,
            max_units: 2,
            failure_rate: 0.1,
        }
    }
}

impl SimulatedLatency {
    /// No delay, no failures.
    pub fn instant() -> Self {
        Self {
            unit_ms: 0,
            min_units: 0,
            max_units: 0,
            failure_rate: 0.0,
        }
    }

    /// Every call sleeps exactly `delay_ms` and never fails.
    pub fn fixed(delay_ms: u64) -> Self {
        Self {
            unit_ms: delay_ms,
            min_units: 1,
            max_units: 1,
            failure_rate: 0.0,
        }
    }

    pub fn with_failure_rate(mut self, failure_rate: f64) -> Self {
        self.failure_rate = failure_rate;
        self
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.unit_ms.saturating_mul(u64::from(self.max_units)))
    }

    /// Draw the delay and the failure decision for one call.
    pub fn roll(&self) -> (Duration, bool) {
        let mut rng = rand::thread_rng();
        let units = rng.gen_range(self.min_units.min(self.max_units)..=self.max_units);
        let rate = if self.failure_rate.is_nan() {
            0.0
        } else {
            self.failure_rate.clamp(0.0, 1.0)
        };
        let fail = rng.gen_bool(rate);

        (Duration::from_millis(self.unit_ms.saturating_mul(u64::from(units))), fail)
    }

    /// Sleep for a random delay and report whether the call should fail.
    pub async fn simulate(&self) -> bool {
        let (delay, fail) = self.roll();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        fail
    }
}
