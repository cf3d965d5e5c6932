//! Configuration for status polling.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the adaptive polling schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Whether automatic polling runs at all (manual refresh always works)
    pub enabled: bool,
    /// Delay after the first failing cycle; doubles on every further one
    pub base_interval_ms: u64,
    /// Failing cycles before automatic polling stops
    pub max_attempts: u32,
    /// Deadline for each probe request
    pub probe_timeout_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_interval_ms: 5000,
            max_attempts: 3,
            probe_timeout_ms: 2000,
        }
    }
}

impl PollingConfig {
    pub fn base_interval(&self) -> Duration {
        Duration::from_millis(self.base_interval_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// Delay armed after failing cycle `attempt` (1-based):
    /// `base_interval * 2^(attempt - 1)`, saturating.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        let factor = 1u64.checked_shl(exponent).unwrap_or(u64::MAX);
        Duration::from_millis(self.base_interval_ms.saturating_mul(factor))
    }
}
