//! Shared status store.
//!
//! Holds the last published [`StatusSnapshot`] and fans every publication
//! out to subscribers. Consumers get read access and subscriptions only;
//! writes are reserved for the health scheduler inside this crate.

mod snapshot;


pub use snapshot::StatusSnapshot;

use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

type Callback = Arc<dyn Fn(&StatusSnapshot) + Send + Sync>;
type Subscribers = DashMap<u64, Callback>;

/// Last-known reachability of every target.
///
/// # Examples
///
/// ```
/// use zenith::status::StatusStore;
///
/// let store = StatusStore::new();
/// assert!(!store.get_status("chest-xray"));
/// assert!(!store.any_online());
/// ```
pub struct StatusStore {
    current: RwLock<Arc<StatusSnapshot>>,
    subscribers: Arc<Subscribers>,
    next_id: AtomicU64,
    disposed: AtomicBool,
}

impl StatusStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(StatusSnapshot::default())),
            subscribers: Arc::new(DashMap::new()),
            next_id: AtomicU64::new(0),
            disposed: AtomicBool::new(false),
        }
    }

    /// Reachability of `key`, `false` if it has never been probed.
    pub fn get_status(&self, key: &str) -> bool {
        self.current().get(key)
    }

    pub fn any_online(&self) -> bool {
        self.current().any_online()
    }

    pub fn online_count(&self) -> usize {
        self.current().online_count()
    }

    /// Clone of the current snapshot.
    pub fn snapshot(&self) -> StatusSnapshot {
        self.current().as_ref().clone()
    }

    fn current(&self) -> Arc<StatusSnapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Register a callback invoked after every published snapshot.
    ///
    /// The callback stays registered until the returned [`Subscription`] is
    /// dropped or unsubscribed.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&StatusSnapshot) + Send + Sync + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.insert(id, Arc::new(callback));
        Subscription {
            id,
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Replace the whole snapshot and notify subscribers once.
    ///
    /// Returns `false` without publishing if the store has been disposed.
    pub(crate) fn set_all(&self, snapshot: StatusSnapshot) -> bool {
        if self.is_disposed() {
            tracing::debug!("Status store disposed, discarding snapshot");
            return false;
        }

        let snapshot = Arc::new(snapshot);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&snapshot);

        // Callbacks run outside the map's shard locks so they may subscribe
        // or unsubscribe re-entrantly.
        let callbacks: Vec<Callback> = self
            .subscribers
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();
        for callback in callbacks {
            callback(&snapshot);
        }

        true
    }

    /// Stop accepting snapshots and drop every subscriber.
    pub(crate) fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::SeqCst) {
            self.subscribers.clear();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

impl Default for StatusStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle that detaches a subscriber callback.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    subscribers: Weak<Subscribers>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.remove(&self.id);
        }
    }
}
