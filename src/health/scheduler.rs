//! Polling scheduler task.
//!
//! Every state transition, probe cycle and store write happens on this one
//! task. Manual refreshes and visibility changes arrive as messages, so two
//! cycles can never race on the store.

use super::config::PollingConfig;
use super::state::{ScheduleState, SchedulerPhase, Transition};
use super::visibility::{Visibility, VisibilityReceiver};
use crate::probe::{Probe, Target};
use crate::status::{StatusSnapshot, StatusStore};
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio_util::sync::CancellationToken;

/// Requests sent to the scheduler task.
pub(crate) enum Command {
    Refresh(oneshot::Sender<StatusSnapshot>),
}

/// What started a check cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Trigger {
    Initial,
    Scheduled,
    Visibility,
    Refresh,
}

impl Trigger {
    fn as_str(self) -> &'static str {
        match self {
            Trigger::Initial => "initial",
            Trigger::Scheduled => "scheduled",
            Trigger::Visibility => "visibility",
            Trigger::Refresh => "refresh",
        }
    }
}

pub(crate) struct PollingScheduler {
    pub(crate) targets: Arc<[Target]>,
    pub(crate) probe: Arc<dyn Probe>,
    pub(crate) store: Arc<StatusStore>,
    pub(crate) config: PollingConfig,
    pub(crate) state: ScheduleState,
    pub(crate) visibility: VisibilityReceiver,
    pub(crate) phase: watch::Sender<SchedulerPhase>,
}

impl PollingScheduler {
    pub(crate) async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        cancel: CancellationToken,
    ) {
        tracing::info!(
            targets = self.targets.len(),
            enabled = self.config.enabled,
            base_interval_ms = self.config.base_interval_ms,
            max_attempts = self.config.max_attempts,
            "Polling scheduler started"
        );

        if self.config.enabled && !cancel.is_cancelled() {
            self.check(Trigger::Initial).await;
        } else {
            self.state.is_polling = false;
        }

        let mut listening = true;
        loop {
            tokio::select! {
                // Disposal wins over anything already queued
                biased;

                _ = cancel.cancelled() => break,
                command = commands.recv() => match command {
                    Some(Command::Refresh(_)) if cancel.is_cancelled() => {
                        // Dropping the reply reports Closed to the caller
                        break;
                    }
                    Some(Command::Refresh(reply)) => {
                        let snapshot = self.refresh().await;
                        // Caller may have given up waiting
                        let _ = reply.send(snapshot);
                    }
                    None => break,
                },
                _ = self.state.pending_fired() => {
                    self.check(Trigger::Scheduled).await;
                }
                changed = self.visibility.changed(), if listening => {
                    if changed.is_err() {
                        tracing::debug!("Visibility source closed");
                        listening = false;
                        continue;
                    }
                    let visibility = *self.visibility.borrow_and_update();
                    tracing::debug!(?visibility, "Visibility changed");
                    if visibility == Visibility::Visible && self.state.is_polling {
                        self.check(Trigger::Visibility).await;
                    }
                }
            }
        }

        self.state.cancel_pending();
        tracing::info!(
            attempts = self.state.attempt_count,
            "Polling scheduler shutting down"
        );
    }

    fn is_hidden(&self) -> bool {
        *self.visibility.borrow() == Visibility::Hidden
    }

    /// Automatic check: skipped while hidden or once the lifetime stopped.
    async fn check(&mut self, trigger: Trigger) {
        if !self.state.is_polling {
            return;
        }
        if self.is_hidden() {
            tracing::debug!(trigger = trigger.as_str(), "Host hidden, skipping check");
            self.state.cancel_pending();
            self.set_phase(SchedulerPhase::Suspended {
                attempt: self.state.attempt_count,
            });
            return;
        }
        self.cycle(trigger).await;
    }

    /// Manual refresh: a fresh lifetime whose first cycle runs immediately,
    /// hidden or not.
    async fn refresh(&mut self) -> StatusSnapshot {
        self.state.restart();
        if !self.config.enabled {
            self.state.is_polling = false;
            self.set_phase(SchedulerPhase::Checking { attempt: 1 });
            let snapshot = self.probe_all(Trigger::Refresh).await;
            self.set_phase(SchedulerPhase::Idle);
            return snapshot;
        }
        self.cycle(Trigger::Refresh).await
    }

    /// One counted cycle followed by the stop/backoff transition.
    async fn cycle(&mut self, trigger: Trigger) -> StatusSnapshot {
        // Out-of-band cycles replace whatever was pending
        self.state.cancel_pending();
        let attempt = self.state.begin_cycle();
        self.set_phase(SchedulerPhase::Checking { attempt });

        let snapshot = self.probe_all(trigger).await;

        match self.state.after_cycle(snapshot.any_online(), &self.config) {
            Transition::Stop(reason) => {
                tracing::info!(
                    attempts = attempt,
                    ?reason,
                    online = snapshot.online_count(),
                    total = snapshot.len(),
                    "Status polling stopped"
                );
                self.set_phase(SchedulerPhase::Stopped {
                    attempts: attempt,
                    reason,
                });
            }
            Transition::Backoff(delay) => {
                self.state.arm(delay);
                tracing::debug!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "No target reachable, backing off"
                );
                self.set_phase(SchedulerPhase::Scheduled { attempt, delay });
            }
        }

        snapshot
    }

    /// Probe every target concurrently and publish the combined snapshot.
    async fn probe_all(&self, trigger: Trigger) -> StatusSnapshot {
        let probe = self.probe.as_ref();
        let outcomes = join_all(self.targets.iter().map(|target| async move {
            (target.key.clone(), probe.probe(target).await)
        }))
        .await;

        let snapshot = StatusSnapshot::from_results(outcomes);
        self.store.set_all(snapshot.clone());

        metrics::counter!("zenith_check_cycles_total", "trigger" => trigger.as_str())
            .increment(1);
        tracing::debug!(
            trigger = trigger.as_str(),
            online = snapshot.online_count(),
            total = snapshot.len(),
            "Check cycle completed"
        );

        snapshot
    }

    fn set_phase(&self, phase: SchedulerPhase) {
        self.phase.send_replace(phase);
    }
}
