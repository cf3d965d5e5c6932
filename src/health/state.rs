//! Schedule state for one polling lifetime.

use super::config::PollingConfig;
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

/// Why automatic polling stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// At least one target answered
    AnyOnline,
    /// Every allowed attempt failed
    MaxAttempts,
}

/// Observable phase of the polling scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum SchedulerPhase {
    /// Not activated yet, or automatic polling disabled
    Idle,
    /// A cycle is probing every target
    Checking { attempt: u32 },
    /// Waiting for the backoff timer armed after `attempt`
    Scheduled {
        attempt: u32,
        #[serde(with = "duration_ms")]
        delay: Duration,
    },
    /// A due check was skipped because the host was hidden; the next
    /// visible transition resumes with an immediate check
    Suspended { attempt: u32 },
    /// No further automatic checks until a manual refresh
    Stopped { attempts: u32, reason: StopReason },
}

mod duration_ms {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }
}

/// Outcome of applying the stop/backoff rule after a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stop(StopReason),
    Backoff(Duration),
}

/// A scheduled-but-not-yet-fired check.
///
/// Only [`ScheduleState::arm`] creates one, and it cancels the previous one
/// first, so a lifetime never holds two.
#[derive(Debug)]
pub struct PendingCheck {
    deadline: Instant,
    delay: Duration,
}

impl PendingCheck {
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Drop the check without firing it.
    pub fn cancel(self) {
        tracing::trace!(delay_ms = self.delay.as_millis() as u64, "Pending check cancelled");
    }
}

/// Timer and attempt bookkeeping for one polling lifetime.
#[derive(Debug)]
pub struct ScheduleState {
    /// Cycles started in this lifetime
    pub attempt_count: u32,
    /// Cleared once the lifetime reaches its stop condition
    pub is_polling: bool,
    pending: Option<PendingCheck>,
}

impl Default for ScheduleState {
    fn default() -> Self {
        Self {
            attempt_count: 0,
            is_polling: true,
            pending: None,
        }
    }
}

impl ScheduleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh lifetime, cancelling any pending check of the old one.
    pub fn restart(&mut self) {
        self.cancel_pending();
        *self = Self::new();
    }

    /// Count a new cycle and return its attempt number.
    pub fn begin_cycle(&mut self) -> u32 {
        self.attempt_count = self.attempt_count.saturating_add(1);
        self.attempt_count
    }

    /// Apply the stop/backoff rule after a completed cycle.
    ///
    /// Stops when anything is online or the attempt budget is spent;
    /// otherwise backs off by `base * 2^(attempt - 1)`. Arming is left to
    /// the caller.
    pub fn after_cycle(&mut self, any_online: bool, config: &PollingConfig) -> Transition {
        if any_online {
            self.stop();
            Transition::Stop(StopReason::AnyOnline)
        } else if self.attempt_count >= config.max_attempts {
            self.stop();
            Transition::Stop(StopReason::MaxAttempts)
        } else {
            Transition::Backoff(config.backoff_delay(self.attempt_count))
        }
    }

    fn stop(&mut self) {
        self.is_polling = false;
        self.cancel_pending();
    }

    /// Arm the single pending check, replacing any previous one.
    pub fn arm(&mut self, delay: Duration) {
        self.cancel_pending();
        self.pending = Some(PendingCheck {
            deadline: Instant::now() + delay,
            delay,
        });
    }

    /// Returns `true` if a pending check was cancelled.
    pub fn cancel_pending(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.cancel();
                true
            }
            None => false,
        }
    }

    pub fn pending(&self) -> Option<&PendingCheck> {
        self.pending.as_ref()
    }

    /// Resolves when the pending check is due, consuming it. Never resolves
    /// while nothing is armed.
    pub async fn pending_fired(&mut self) {
        match &self.pending {
            Some(pending) => tokio::time::sleep_until(pending.deadline).await,
            None => std::future::pending::<()>().await,
        }
        self.pending = None;
    }
}
