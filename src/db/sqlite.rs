//! SQLite Product Repository
//!
//! sqlx-backed implementation of `ProductRepository`.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::db::ProductRepository;
use crate::error::Result;
use crate::models::{NewProduct, Product, ProductPatch};

const PRODUCT_COLUMNS: &str = "id, name, description, price, stock, created_at, updated_at";

const CREATE_PRODUCTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        price REAL NOT NULL,
        stock INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
"#;

#[derive(Clone)]
pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a pool for `database_url`, creating the database file if needed.
    ///
    /// An in-memory database only lives as long as its connection, so for
    /// those URLs the pool is held at a single connection that never expires.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(max_connections.max(1))
                .connect_with(options)
                .await?
        };

        info!(database_url, "Database pool opened");
        Ok(Self::new(pool))
    }

    /// Creates the products table when it does not exist yet.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(CREATE_PRODUCTS_TABLE)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    async fn all(&self) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    async fn find(&self, id: i64) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    async fn insert(&self, product: NewProduct) -> Result<Product> {
        let now = Utc::now();
        let created = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (name, description, price, stock, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(product.name)
        .bind(product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    async fn update(&self, id: i64, patch: ProductPatch) -> Result<Option<Product>> {
        let updated = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET \
                name = COALESCE(?, name), \
                description = COALESCE(?, description), \
                price = COALESCE(?, price), \
                stock = COALESCE(?, stock), \
                updated_at = ? \
             WHERE id = ? RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(patch.name)
        .bind(patch.description)
        .bind(patch.price)
        .bind(patch.stock)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
