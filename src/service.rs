//! Product Service
//!
//! The CRUD-plus-cache request flow: validate, read or write the store,
//! keep the cache coherent, and hand typed results back to the handlers.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::cache::{product_key, remember, CacheBackend, CacheStats, PRODUCTS_KEY};
use crate::config::Config;
use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::Product;
use crate::validation::{validate_new_product, validate_product_patch};

/// How long snapshots live and whether misses are cached.
#[derive(Debug, Clone, Copy)]
pub struct CachePolicy {
    pub products_ttl: Duration,
    pub product_ttl: Duration,
    pub cache_negative_lookups: bool,
}

impl CachePolicy {
    /// Reads TTLs and the negative-lookup switch from `config`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            products_ttl: config.products_ttl(),
            product_ttl: config.product_ttl(),
            cache_negative_lookups: config.cache_negative_lookups,
        }
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

// == Product Service ==
/// Product operations over an injected repository and cache.
///
/// Reads go through the cache; every write invalidates the snapshots it
/// affects before returning.
#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
    cache: Arc<dyn CacheBackend>,
    policy: CachePolicy,
}

impl ProductService {
    // == Constructor ==
    /// Creates a service over `repo` and `cache` with the given TTL policy.
    pub fn new(
        repo: Arc<dyn ProductRepository>,
        cache: Arc<dyn CacheBackend>,
        policy: CachePolicy,
    ) -> Self {
        Self {
            repo,
            cache,
            policy,
        }
    }

    // == List ==
    /// Every product, served from the `products` snapshot when present.
    pub async fn list(&self) -> Result<Vec<Product>> {
        remember(
            self.cache.as_ref(),
            PRODUCTS_KEY,
            self.policy.products_ttl,
            || self.repo.all(),
        )
        .await
    }

    // == Create ==
    /// Validates `payload`, inserts the product, and invalidates the list
    /// snapshot along with any cached miss for the new id.
    pub async fn create(&self, payload: &Value) -> Result<Product> {
        info!(data = %payload, "Product creation request received");

        let new_product = validate_new_product(payload).map_err(|errors| {
            error!(?errors, "Validation failed");
            AppError::Validation(errors)
        })?;

        let product = self.repo.insert(new_product).await?;

        // A negative lookup may be cached under the new id
        let key = product_key(product.id);
        self.invalidate(&[PRODUCTS_KEY, key.as_str()]).await?;

        info!(product_id = product.id, "Product created successfully");
        Ok(product)
    }

    // == Get ==
    /// One product, served from its `product_{id}` snapshot when present.
    pub async fn get(&self, id: i64) -> Result<Product> {
        let key = product_key(id);
        let ttl = self.policy.product_ttl;

        let found = if self.policy.cache_negative_lookups {
            remember(self.cache.as_ref(), &key, ttl, || self.repo.find(id)).await?
        } else {
            self.find_caching_hits(id, &key, ttl).await?
        };

        found.ok_or(AppError::NotFound)
    }

    /// Read-through lookup that only stores found products.
    async fn find_caching_hits(&self, id: i64, key: &str, ttl: Duration) -> Result<Option<Product>> {
        if let Some(snapshot) = self.cache.get(key).await? {
            // A null snapshot is a stored miss; reload instead of trusting it
            if let Some(product) = serde_json::from_value::<Option<Product>>(snapshot)? {
                debug!(key, "cache hit");
                return Ok(Some(product));
            }
        }

        let product = self.repo.find(id).await?;
        if let Some(product) = &product {
            self.cache
                .put(key, serde_json::to_value(product)?, ttl)
                .await?;
        }
        Ok(product)
    }

    // == Update ==
    /// Applies the supplied fields of `payload` to an existing product.
    ///
    /// The existence check reads the store directly, never the cache.
    pub async fn update(&self, id: i64, payload: &Value) -> Result<Product> {
        info!(product_id = id, data = %payload, "Update request received");

        let Some(existing) = self.repo.find(id).await? else {
            warn!(product_id = id, "Product not found");
            return Err(AppError::NotFound);
        };

        let patch = validate_product_patch(payload).map_err(|errors| {
            error!(product_id = id, ?errors, "Validation failed for product update");
            AppError::Validation(errors)
        })?;

        let product = if patch.is_empty() {
            existing
        } else {
            // The row can vanish between the lookup and the write
            self.repo
                .update(id, patch)
                .await?
                .ok_or(AppError::NotFound)?
        };

        let key = product_key(id);
        self.invalidate(&[key.as_str(), PRODUCTS_KEY]).await?;

        info!(product_id = id, "Product updated successfully");
        Ok(product)
    }

    // == Delete ==
    /// Hard-deletes a product and invalidates its snapshot and the list.
    pub async fn delete(&self, id: i64) -> Result<()> {
        if self.repo.find(id).await?.is_none() {
            warn!(product_id = id, "Delete requested for unknown product");
            return Err(AppError::NotFound);
        }

        // The row can vanish between the lookup and the delete
        if !self.repo.delete(id).await? {
            warn!(product_id = id, "Product removed before delete completed");
            return Err(AppError::NotFound);
        }
        let key = product_key(id);
        self.invalidate(&[key.as_str(), PRODUCTS_KEY]).await?;

        info!(product_id = id, "Product deleted successfully");
        Ok(())
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Forgets every key in `keys`.
    async fn invalidate(&self, keys: &[&str]) -> Result<()> {
        for &key in keys {
            let removed = self.cache.forget(key).await?;
            debug!(key, removed, "cache forget");
        }
        Ok(())
    }
}
