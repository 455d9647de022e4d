//! Domain and response models for the product catalog API
//!
//! This module defines the product entity, its validated write payloads,
//! and the DTOs used for serializing HTTP response bodies.

pub mod product;
pub mod responses;

// Re-export commonly used types
pub use product::{NewProduct, Product, ProductPatch};
pub use responses::{CacheStatsResponse, HealthResponse, MessageResponse};
