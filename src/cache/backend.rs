//! Cache Backend
//!
//! The key/value facade the product service talks to, plus the in-process
//! implementation and the get-or-populate helper.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore};
use crate::error::Result;

/// Shared snapshot cache.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Returns a live snapshot for `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Stores `value` under `key` for `ttl`, replacing any previous entry.
    async fn put(&self, key: &str, value: Value, ttl: Duration) -> Result<()>;

    /// Invalidates `key`. Returns whether an entry was removed.
    async fn forget(&self, key: &str) -> Result<bool>;

    async fn stats(&self) -> CacheStats;
}

// == Memory Cache ==
/// In-process cache over a lock-guarded `CacheStore`.
#[derive(Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<CacheStore>>,
}

impl MemoryCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new(max_entries))),
        }
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        // Write lock: reads update access time and stats
        let mut store = self.store.write().await;
        Ok(store.get(key))
    }

    async fn put(&self, key: &str, value: Value, ttl: Duration) -> Result<()> {
        let mut store = self.store.write().await;
        store.put(key.to_string(), value, ttl);
        Ok(())
    }

    async fn forget(&self, key: &str) -> Result<bool> {
        let mut store = self.store.write().await;
        Ok(store.forget(key))
    }

    async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }
}

// == Remember ==
/// Returns the snapshot under `key`, or runs `loader`, caches its result
/// for `ttl`, and returns that.
pub async fn remember<T, F, Fut>(
    cache: &dyn CacheBackend,
    key: &str,
    ttl: Duration,
    loader: F,
) -> Result<T>
where
    T: Serialize + DeserializeOwned + Send,
    F: FnOnce() -> Fut + Send,
    Fut: Future<Output = Result<T>> + Send,
{
    if let Some(snapshot) = cache.get(key).await? {
        debug!(key, "cache hit");
        return Ok(serde_json::from_value(snapshot)?);
    }

    debug!(key, "cache miss");
    let value = loader().await?;
    cache.put(key, serde_json::to_value(&value)?, ttl).await?;
    Ok(value)
}
