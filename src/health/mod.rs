//! Health status polling.
//!
//! [`HealthMonitor`] owns a background scheduler that probes every
//! configured target, publishes combined snapshots into a shared
//! [`StatusStore`], backs off while everything is unreachable, stops once
//! something answers, and pauses while the host is hidden. Consumers read
//! status and subscribe through the monitor; only the scheduler writes.

mod config;
mod error;
mod scheduler;
mod state;
mod visibility;


pub use config::*;
pub use error::*;
pub use state::*;
pub use visibility::*;

use crate::probe::{HttpProbe, Probe, Target};
use crate::status::{StatusSnapshot, StatusStore, Subscription};
use scheduler::{Command, PollingScheduler};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Queued manual refreshes beyond this wait for capacity.
const COMMAND_BUFFER: usize = 16;

/// Consumer-facing handle to a running status scheduler.
///
/// Cheap to clone; every clone talks to the same scheduler and store.
#[derive(Clone)]
pub struct HealthMonitor {
    store: Arc<StatusStore>,
    commands: mpsc::Sender<Command>,
    phase: watch::Receiver<SchedulerPhase>,
    cancel: CancellationToken,
}

impl HealthMonitor {
    /// Start polling `targets` with an HTTP probe built from `config`.
    ///
    /// Returns a JoinHandle that resolves when the scheduler stops.
    pub fn start(
        targets: Vec<Target>,
        config: PollingConfig,
        visibility: VisibilityReceiver,
    ) -> (Self, JoinHandle<()>) {
        let probe = Arc::new(HttpProbe::new(config.probe_timeout()));
        Self::with_probe(targets, probe, config, visibility)
    }

    /// Start polling with a custom probe (for testing).
    pub fn with_probe(
        targets: Vec<Target>,
        probe: Arc<dyn Probe>,
        config: PollingConfig,
        visibility: VisibilityReceiver,
    ) -> (Self, JoinHandle<()>) {
        Self::spawn(targets, probe, config, visibility, Arc::new(StatusStore::new()))
    }

    /// Start polling with `callback` registered before the first check.
    ///
    /// A subscriber attached after `start` can miss the initial snapshot on
    /// a multi-threaded runtime; this one hears every publication.
    pub fn with_subscriber<F>(
        targets: Vec<Target>,
        probe: Arc<dyn Probe>,
        config: PollingConfig,
        visibility: VisibilityReceiver,
        callback: F,
    ) -> (Self, Subscription, JoinHandle<()>)
    where
        F: Fn(&StatusSnapshot) + Send + Sync + 'static,
    {
        let store = Arc::new(StatusStore::new());
        let subscription = store.subscribe(callback);
        let (monitor, handle) = Self::spawn(targets, probe, config, visibility, store);
        (monitor, subscription, handle)
    }

    fn spawn(
        targets: Vec<Target>,
        probe: Arc<dyn Probe>,
        config: PollingConfig,
        visibility: VisibilityReceiver,
        store: Arc<StatusStore>,
    ) -> (Self, JoinHandle<()>) {
        let (commands, command_rx) = mpsc::channel(COMMAND_BUFFER);
        let (phase_tx, phase) = watch::channel(SchedulerPhase::Idle);
        let cancel = CancellationToken::new();

        let scheduler = PollingScheduler {
            targets: Arc::from(targets),
            probe,
            store: Arc::clone(&store),
            config,
            state: ScheduleState::new(),
            visibility,
            phase: phase_tx,
        };
        let handle = tokio::spawn(scheduler.run(command_rx, cancel.clone()));

        let monitor = Self {
            store,
            commands,
            phase,
            cancel,
        };
        (monitor, handle)
    }

    /// Last known reachability of `key`; `false` before its first probe.
    pub fn get_status(&self, key: &str) -> bool {
        self.store.get_status(key)
    }

    pub fn is_any_online(&self) -> bool {
        self.store.any_online()
    }

    pub fn online_count(&self) -> usize {
        self.store.online_count()
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        self.store.snapshot()
    }

    /// Invoke `callback` after every published snapshot.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&StatusSnapshot) + Send + Sync + 'static,
    {
        self.store.subscribe(callback)
    }

    /// Read-only access to the shared store.
    pub fn store(&self) -> &StatusStore {
        &self.store
    }

    pub fn phase(&self) -> SchedulerPhase {
        *self.phase.borrow()
    }

    /// Receiver that observes every phase change.
    pub fn watch_phase(&self) -> watch::Receiver<SchedulerPhase> {
        self.phase.clone()
    }

    /// Probe every target now and restart the backoff schedule.
    ///
    /// Cancels any pending automatic check, runs one cycle as the first
    /// attempt of a fresh lifetime, publishes it, and returns the snapshot.
    /// Works from any phase, including `Stopped`. Unreachable targets are
    /// `false` in the result, never an error.
    pub async fn refresh(&self) -> Result<StatusSnapshot, MonitorError> {
        if self.cancel.is_cancelled() {
            return Err(MonitorError::Closed);
        }
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Refresh(reply))
            .await
            .map_err(|_| MonitorError::Closed)?;
        response.await.map_err(|_| MonitorError::Closed)
    }

    /// Dispose the monitor.
    ///
    /// Cancels the pending check and detaches the visibility listener. A
    /// cycle already probing finishes, but its snapshot is discarded and no
    /// subscriber hears about it.
    pub fn shutdown(&self) {
        self.store.dispose();
        self.cancel.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
