//! Error types for the product catalog
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::validation::ValidationErrors;

// == App Error Enum ==
/// Unified error type for the product catalog.
///
/// Validation and not-found conditions are expected outcomes and map to
/// structured 422/404 bodies. Everything else is an infrastructure fault
/// and surfaces as an opaque 500.
#[derive(Error, Debug)]
pub enum AppError {
    /// Payload failed field validation
    #[error("Validation failed")]
    Validation(ValidationErrors),

    /// No product with the requested id
    #[error("Product not found")]
    NotFound,

    /// Relational store failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Cache snapshot could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "message": "Validation failed",
                    "errors": errors,
                })),
            )
                .into_response(),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "Product not found" })),
            )
                .into_response(),
            AppError::Database(_) | AppError::Serialization(_) => {
                error!(error = %self, "Request failed with an infrastructure error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Server Error" })),
                )
                    .into_response()
            }
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the product catalog.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        let response = AppError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_status() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "The name field is required.");
        let response = AppError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_database_error_is_opaque() {
        let response = AppError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
