//! Product Catalog - A REST API for managing catalog products
//!
//! Products live in SQLite; reads go through an in-process TTL cache that
//! is invalidated on every write.

pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod service;
pub mod validation;

pub use api::AppState;
pub use config::Config;
pub use service::{CachePolicy, ProductService};
