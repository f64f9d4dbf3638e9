//! Per-key event history storage
//!
//! This module provides the EventStore, which keeps an ordered history of
//! event timestamps per event key. Histories grow as events are appended
//! and are trimmed from the front once entries age past the retention
//! horizon the caller derives from its configured windows.

use crate::events::{EventKey, Timestamp};
use std::collections::{HashMap, VecDeque};

/// Ordered per-key histories of event timestamps
///
/// Insertion order is chronological order, since events are appended as they
/// arrive. Snapshot consistency is the caller's responsibility: readers and
/// writers are expected to share one lock scope.
#[derive(Debug, Default)]
pub struct EventStore {
    histories: HashMap<EventKey, VecDeque<Timestamp>>,
}

impl EventStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            histories: HashMap::new(),
        }
    }

    /// Append one timestamp to a key's history
    ///
    /// O(1) amortized. Creates the history on first append.
    pub fn append(&mut self, key: EventKey, timestamp: Timestamp) {
        self.histories.entry(key).or_default().push_back(timestamp);
    }

    /// Current history for a key, oldest first
    ///
    /// Returns `None` for keys that have never seen an event.
    pub fn history(&self, key: &EventKey) -> Option<&VecDeque<Timestamp>> {
        self.histories.get(key)
    }

    /// Number of entries currently retained for a key
    pub fn recorded_count(&self, key: &EventKey) -> usize {
        self.histories.get(key).map_or(0, VecDeque::len)
    }

    /// Drop entries strictly older than `cutoff` from the front of a key's
    /// history
    ///
    /// Entries are evicted from the front only; histories are chronological,
    /// so the first entry at or past the cutoff ends the walk.
    pub fn prune_older_than(&mut self, key: &EventKey, cutoff: Timestamp) {
        if let Some(history) = self.histories.get_mut(key) {
            while let Some(front) = history.front() {
                if *front < cutoff {
                    history.pop_front();
                } else {
                    break;
                }
            }
        }
    }

    /// Number of keys with at least one recorded entry
    pub fn key_count(&self) -> usize {
        self.histories.len()
    }
}
