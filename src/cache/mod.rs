//! Cache Module
//!
//! Read-through snapshot cache with TTL expiry and bounded capacity.

mod backend;
mod entry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use backend::{remember, CacheBackend, MemoryCache};
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Keys ==
/// Key holding the full product list snapshot.
pub const PRODUCTS_KEY: &str = "products";

/// Key holding a single product snapshot.
pub fn product_key(id: i64) -> String {
    format!("product_{id}")
}
