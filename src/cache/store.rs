//! Tag Cache Module
//!
//! Key/value storage with a secondary tag index for bulk invalidation,
//! an optional capacity bound (LRU) and an optional TTL.

use std::collections::{HashMap, HashSet};

use bytes::Bytes;

use crate::cache::{CacheEntry, CacheStats, LruTracker};

// == Tag Cache ==
/// Cache storage indexed by key and by tag.
///
/// Invariant: a key appears in `tags[t]` exactly when `entries[key]` exists
/// and carries tag `t`.
#[derive(Debug)]
pub struct TagCache {
    entries: HashMap<String, CacheEntry>,
    tags: HashMap<String, HashSet<String>>,
    /// Bumped by every invalidation of a tag
    generations: HashMap<String, u64>,
    lru: LruTracker,
    stats: CacheStats,
    /// Maximum number of entries, 0 = unbounded
    max_entries: usize,
    /// TTL applied to every entry, None = never expires
    ttl: Option<u64>,
}

impl TagCache {
    // == Constructor ==
    /// Creates a new TagCache.
    ///
    /// # Arguments
    /// * `max_entries` - Capacity before LRU eviction kicks in (0 = unbounded)
    /// * `ttl_seconds` - Lifetime of each entry (0 = never expires)
    pub fn new(max_entries: usize, ttl_seconds: u64) -> Self {
        Self {
            entries: HashMap::new(),
            tags: HashMap::new(),
            generations: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
            ttl: (ttl_seconds > 0).then_some(ttl_seconds),
        }
    }

    // == Get ==
    /// Returns the stored bytes for `key`, recording a hit or a miss.
    ///
    /// Expired entries are dropped and reported as misses.
    pub fn get(&mut self, key: &str) -> Option<Bytes> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                let value = entry.value.clone();
                self.lru.touch(key);
                self.stats.record_hit();
                return Some(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.remove_entry(key);
        }
        self.stats.record_miss();
        None
    }

    // == Insert ==
    /// Stores `value` under `key` and indexes it under every tag.
    ///
    /// Overwriting a key replaces its previous tags.
    pub fn insert<I, T>(&mut self, key: String, value: Bytes, tags: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        if self.entries.contains_key(&key) {
            self.remove_entry(&key);
        } else if self.max_entries > 0 && self.entries.len() >= self.max_entries {
            if let Some(oldest) = self.lru.evict_oldest() {
                self.remove_entry(&oldest);
                self.stats.record_eviction();
            }
        }

        let tags: HashSet<String> = tags.into_iter().map(Into::into).collect();
        for tag in &tags {
            self.tags
                .entry(tag.clone())
                .or_default()
                .insert(key.clone());
        }

        self.entries
            .insert(key.clone(), CacheEntry::new(value, tags, self.ttl));
        self.lru.touch(&key);
        self.stats.set_total_entries(self.entries.len());
    }

    /// Current generation of each of `tags`, in order.
    pub fn generations(&self, tags: &[&str]) -> Vec<u64> {
        tags.iter()
            .map(|tag| self.generations.get(*tag).copied().unwrap_or_default())
            .collect()
    }

    /// Inserts like [`insert`](Self::insert) unless one of `tags` was
    /// invalidated after `seen` was read with [`generations`](Self::generations).
    ///
    /// Returns whether the value was stored.
    pub fn insert_if_current(
        &mut self,
        key: String,
        value: Bytes,
        tags: &[&str],
        seen: &[u64],
    ) -> bool {
        if self.generations(tags) != seen {
            return false;
        }
        self.insert(key, value, tags.iter().copied());
        true
    }

    // == Invalidate Tag ==
    /// Removes every entry indexed under `tag`, whatever its key.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate_tag(&mut self, tag: &str) -> usize {
        *self.generations.entry(tag.to_string()).or_default() += 1;
        let keys = self.tags.remove(tag).unwrap_or_default();
        for key in &keys {
            self.remove_entry(key);
        }

        self.stats.record_invalidation();
        self.stats.set_total_entries(self.entries.len());
        keys.len()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys currently indexed under `tag`.
    pub fn tagged_keys(&self, tag: &str) -> usize {
        self.tags.get(tag).map_or(0, HashSet::len)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops one entry and detaches it from the LRU and tag indexes.
    fn remove_entry(&mut self, key: &str) {
        let Some(entry) = self.entries.remove(key) else {
            return;
        };
        self.lru.remove(key);

        for tag in &entry.tags {
            if let Some(keys) = self.tags.get_mut(tag) {
                keys.remove(key);
                if keys.is_empty() {
                    self.tags.remove(tag);
                }
            }
        }
        self.stats.set_total_entries(self.entries.len());
    }
}
