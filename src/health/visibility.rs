//! Host visibility port.
//!
//! The host (a browser tab, a terminal session, a test) owns the sender and
//! reports when its view becomes hidden or visible. The scheduler only
//! listens; it never originates the signal.

use serde::Serialize;
use tokio::sync::watch;

/// Whether the hosting view is currently shown to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}

/// Host side of the visibility port.
#[derive(Debug, Clone)]
pub struct VisibilitySender {
    tx: watch::Sender<Visibility>,
}

/// Scheduler side of the visibility port.
pub type VisibilityReceiver = watch::Receiver<Visibility>;

/// Create a visibility port starting in `initial`.
pub fn visibility_channel(initial: Visibility) -> (VisibilitySender, VisibilityReceiver) {
    let (tx, rx) = watch::channel(initial);
    (VisibilitySender { tx }, rx)
}

impl VisibilitySender {
    /// Report a new visibility. Repeating the current value is not a
    /// transition and wakes nobody.
    pub fn set(&self, visibility: Visibility) {
        self.tx.send_if_modified(|current| {
            if *current == visibility {
                false
            } else {
                *current = visibility;
                true
            }
        });
    }

    pub fn show(&self) {
        self.set(Visibility::Visible);
    }

    pub fn hide(&self) {
        self.set(Visibility::Hidden);
    }

    pub fn current(&self) -> Visibility {
        *self.tx.borrow()
    }

    /// Receiver for an additional listener.
    pub fn subscribe(&self) -> VisibilityReceiver {
        self.tx.subscribe()
    }
}
