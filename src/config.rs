//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// sqlx SQLite connection URL
    pub database_url: String,
    /// Maximum pooled database connections
    pub database_max_connections: u32,
    /// HTTP server port
    pub server_port: u16,
    /// Maximum number of entries the cache can hold
    pub cache_max_entries: usize,
    /// TTL in seconds for the full product list snapshot
    pub products_cache_ttl: u64,
    /// TTL in seconds for single product snapshots
    pub product_cache_ttl: u64,
    /// Whether a "not found" lookup is cached like a hit
    pub cache_negative_lookups: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DATABASE_URL` - SQLite URL (default: sqlite://products.db)
    /// - `DATABASE_MAX_CONNECTIONS` - Pool size (default: 5)
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `PRODUCTS_CACHE_TTL` - List snapshot TTL in seconds (default: 300)
    /// - `PRODUCT_CACHE_TTL` - Item snapshot TTL in seconds (default: 600)
    /// - `CACHE_NEGATIVE_LOOKUPS` - Cache "not found" results (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or(defaults.database_max_connections),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cache_max_entries: parse_var("CACHE_MAX_ENTRIES")
                .unwrap_or(defaults.cache_max_entries),
            products_cache_ttl: parse_var("PRODUCTS_CACHE_TTL")
                .unwrap_or(defaults.products_cache_ttl),
            product_cache_ttl: parse_var("PRODUCT_CACHE_TTL")
                .unwrap_or(defaults.product_cache_ttl),
            cache_negative_lookups: parse_var("CACHE_NEGATIVE_LOOKUPS")
                .unwrap_or(defaults.cache_negative_lookups),
        }
    }

    /// TTL applied to the `products` cache key.
    pub fn products_ttl(&self) -> Duration {
        Duration::from_secs(self.products_cache_ttl)
    }

    /// TTL applied to `product_{id}` cache keys.
    pub fn product_ttl(&self) -> Duration {
        Duration::from_secs(self.product_cache_ttl)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://products.db".to_string(),
            database_max_connections: 5,
            server_port: 8000,
            cache_max_entries: 1000,
            products_cache_ttl: 300,
            product_cache_ttl: 600,
            cache_negative_lookups: false,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.database_url, "sqlite://products.db");
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.cache_max_entries, 1000);
        assert_eq!(config.products_ttl(), Duration::from_secs(300));
        assert_eq!(config.product_ttl(), Duration::from_secs(600));
        assert!(!config.cache_negative_lookups);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("DATABASE_MAX_CONNECTIONS");
        env::remove_var("PRODUCTS_CACHE_TTL");
        env::remove_var("PRODUCT_CACHE_TTL");
        env::remove_var("CACHE_NEGATIVE_LOOKUPS");

        let config = Config::from_env();
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.products_cache_ttl, 300);
        assert_eq!(config.product_cache_ttl, 600);
        assert!(!config.cache_negative_lookups);
    }

    #[test]
    fn test_unparseable_value_falls_back() {
        env::set_var("CACHE_MAX_ENTRIES", "lots");
        let config = Config::from_env();
        assert_eq!(config.cache_max_entries, 1000);
        env::remove_var("CACHE_MAX_ENTRIES");
    }
}
