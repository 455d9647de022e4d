//! API Handlers
//!
//! HTTP request handlers for each product catalog endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::cache::MemoryCache;
use crate::config::Config;
use crate::db::SqliteProductRepository;
use crate::error::{AppError, Result};
use crate::models::{HealthResponse, MessageResponse, Product};
use crate::service::{CachePolicy, ProductService};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
}

impl AppState {
    pub fn new(products: ProductService) -> Self {
        Self { products }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Opens the database, makes sure the products table exists, and sets
    /// up the in-process cache.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let repo = SqliteProductRepository::connect(
            &config.database_url,
            config.database_max_connections,
        )
        .await?;
        repo.migrate().await?;

        let cache = MemoryCache::new(config.cache_max_entries);
        let service = ProductService::new(
            Arc::new(repo),
            Arc::new(cache),
            CachePolicy::from_config(config),
        );
        Ok(Self::new(service))
    }
}

/// Path ids that are not integers name no product.
fn parse_id(raw: &str) -> Result<i64> {
    raw.trim().parse().map_err(|_| AppError::NotFound)
}

/// A missing or unparseable body validates like an empty one.
fn payload_or_null(payload: Option<Json<Value>>) -> Value {
    payload.map(|Json(value)| value).unwrap_or(Value::Null)
}

/// Handler for GET /products
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.products.list().await?))
}

/// Handler for POST /products
pub async fn create_product(
    State(state): State<AppState>,
    payload: Option<Json<Value>>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = state.products.create(&payload_or_null(payload)).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Handler for GET /products/:id
pub async fn show_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let id = parse_id(&id)?;
    Ok(Json(state.products.get(id).await?))
}

/// Handler for PUT and PATCH /products/:id
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Option<Json<Value>>,
) -> Result<Json<Product>> {
    let id = parse_id(&id)?;
    let product = state
        .products
        .update(id, &payload_or_null(payload))
        .await?;
    Ok(Json(product))
}

/// Handler for DELETE /products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    state.products.delete(id).await?;
    Ok(Json(MessageResponse::product_deleted()))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.products.cache_stats().await))
}
