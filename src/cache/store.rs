//! Cache Store Module
//!
//! Bounded snapshot storage with lazy TTL expiry and least-recently-used eviction.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Main cache storage. Not synchronized; callers wrap it in a lock.
#[derive(Debug)]
pub struct CacheStore {
    /// Key to snapshot storage
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `max_entries` snapshots.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            max_entries: max_entries.max(1),
        }
    }

    // == Put ==
    /// Stores a snapshot under `key` for `ttl`.
    ///
    /// Overwriting resets the TTL. Inserting a new key into a full store
    /// first drops expired entries, then the least recently used one.
    pub fn put(&mut self, key: String, value: Value, ttl: Duration) {
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            self.purge_expired();
            if self.entries.len() >= self.max_entries {
                self.evict_least_recent();
            }
        }

        self.entries.insert(key, CacheEntry::new(value, ttl));
    }

    // == Get ==
    /// Returns a live snapshot for `key`.
    ///
    /// Expired entries are removed and counted as misses.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let live = match self.entries.get_mut(key) {
            Some(entry) if !entry.is_expired() => {
                entry.touch();
                Some(entry.value.clone())
            }
            _ => None,
        };

        if live.is_some() {
            self.stats.record_hit();
        } else {
            self.entries.remove(key);
            self.stats.record_miss();
        }
        live
    }

    // == Forget ==
    /// Removes `key`. Returns whether anything was removed.
    pub fn forget(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.stats.record_invalidation();
        }
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.entries.len();
        stats
    }

    /// Returns the current number of entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn purge_expired(&mut self) {
        self.entries.retain(|_, entry| !entry.is_expired());
    }

    fn evict_least_recent(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_access)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            self.entries.remove(&key);
            self.stats.record_eviction();
        }
    }
}
