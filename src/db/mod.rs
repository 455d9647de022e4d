//! Persistence Module
//!
//! The product repository seam and its SQLite implementation.

mod repository;
mod sqlite;

pub use repository::ProductRepository;
pub use sqlite::SqliteProductRepository;
