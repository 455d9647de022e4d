//! Cache Entry Module
//!
//! Defines a single cached snapshot with its expiry and access time.

use std::time::{Duration, Instant};

use serde_json::Value;

// == Cache Entry ==
/// A serialized snapshot plus the metadata needed for TTL and eviction.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached snapshot
    pub value: Value,
    /// When the snapshot stops being served
    pub expires_at: Instant,
    /// Last time the entry was stored or read, used for eviction
    pub last_access: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry that lives for `ttl`.
    pub fn new(value: Value, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            value,
            expires_at: now + ttl,
            last_access: now,
        }
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches `expires_at`, so
    /// a zero TTL entry is never served.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    /// Marks the entry as just used.
    pub fn touch(&mut self) {
        self.last_access = Instant::now();
    }
}
