//! Product Repository
//!
//! Storage operations the product service depends on.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewProduct, Product, ProductPatch};

/// Relational store for products.
///
/// Absence is reported through `Option`/`bool`, never as an error; errors
/// are reserved for storage faults.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products ordered by id.
    async fn all(&self) -> Result<Vec<Product>>;

    async fn find(&self, id: i64) -> Result<Option<Product>>;

    /// Inserts a product and returns it with its assigned id and timestamps.
    async fn insert(&self, product: NewProduct) -> Result<Product>;

    /// Applies the supplied fields of `patch`. `None` if `id` does not exist.
    async fn update(&self, id: i64, patch: ProductPatch) -> Result<Option<Product>>;

    /// Hard-deletes a product. Returns whether a row was removed.
    async fn delete(&self, id: i64) -> Result<bool>;
}
