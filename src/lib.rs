//! Zenith - adaptive health-status polling for a dashboard of remote
//! inference services.
//!
//! The [`health::HealthMonitor`] probes every configured [`probe::Target`],
//! publishes combined snapshots into a shared [`status::StatusStore`], and
//! lets any number of consumers read or subscribe without running timers of
//! their own.

pub mod cli;
pub mod config;
pub mod health;
pub mod logging;
pub mod probe;
pub mod status;
