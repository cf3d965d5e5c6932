//! Published reachability snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Complete reachability mapping published by one check cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusSnapshot {
    /// Target key to last observed reachability
    pub statuses: BTreeMap<String, bool>,
    /// When the cycle that produced this snapshot finished
    pub checked_at: Option<DateTime<Utc>>,
}

impl StatusSnapshot {
    /// Build a snapshot stamped with the current time.
    pub fn from_results<I, K>(results: I) -> Self
    where
        I: IntoIterator<Item = (K, bool)>,
        K: Into<String>,
    {
        Self {
            statuses: results.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            checked_at: Some(Utc::now()),
        }
    }

    /// Reachability of a key; `false` when the key was never probed.
    pub fn get(&self, key: &str) -> bool {
        self.statuses.get(key).copied().unwrap_or(false)
    }

    pub fn any_online(&self) -> bool {
        self.statuses.values().any(|online| *online)
    }

    pub fn online_count(&self) -> usize {
        self.statuses.values().filter(|online| **online).count()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Entries sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.statuses.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
