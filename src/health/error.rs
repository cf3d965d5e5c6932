//! Error types for the health monitor handle.

use thiserror::Error;

/// Errors returned by [`super::HealthMonitor`] operations.
///
/// Probe failures are never errors; they show up as `false` in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonitorError {
    /// The scheduler task has shut down
    #[error("health monitor is shut down")]
    Closed,
}
