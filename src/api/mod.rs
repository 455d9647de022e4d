//! API Module
//!
//! HTTP handlers and routing for the product catalog REST API.
//!
//! # Endpoints
//! - `GET /products` - List all products
//! - `POST /products` - Create a product
//! - `GET /products/:id` - Show one product
//! - `PUT|PATCH /products/:id` - Partially update a product
//! - `DELETE /products/:id` - Delete a product
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
