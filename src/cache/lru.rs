//! LRU Tracker Module
//!
//! Recency ordering for capacity-bound eviction.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Tracks key recency with a monotonically increasing access stamp.
///
/// `by_stamp` is ordered oldest-first, so the first entry is always the
/// eviction candidate.
#[derive(Debug, Default)]
pub struct LruTracker {
    clock: u64,
    stamps: HashMap<String, u64>,
    by_stamp: BTreeMap<u64, String>,
}

impl LruTracker {
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a key as most recently used.
    pub fn touch(&mut self, key: &str) {
        self.clock += 1;
        if let Some(previous) = self.stamps.insert(key.to_string(), self.clock) {
            self.by_stamp.remove(&previous);
        }
        self.by_stamp.insert(self.clock, key.to_string());
    }

    /// Stops tracking a key. Unknown keys are ignored.
    pub fn remove(&mut self, key: &str) {
        if let Some(stamp) = self.stamps.remove(key) {
            self.by_stamp.remove(&stamp);
        }
    }

    /// Returns and forgets the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.by_stamp.pop_first()?;
        self.stamps.remove(&key);
        Some(key)
    }

    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }
}
