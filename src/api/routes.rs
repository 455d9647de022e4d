//! API Routes
//!
//! Configures the Axum router with all product catalog endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_product, delete_product, health_handler, list_products, show_product, update_product,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /products` - List all products
/// - `POST /products` - Create a product
/// - `GET /products/:id` - Show one product
/// - `PUT|PATCH /products/:id` - Partially update a product
/// - `DELETE /products/:id` - Delete a product
/// - `GET /health` - Health check with cache statistics
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(show_product)
                .put(update_product)
                .patch(update_product)
                .delete(delete_product),
        )
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
