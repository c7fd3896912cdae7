//! Error types for the vehicle registry
//!
//! Provides unified error handling using thiserror. The same three kinds flow
//! from the persistence layer, through the caching decorator untouched, up to
//! the HTTP layer where they become status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::warn;

use crate::models::ErrorResponse;

// == Registry Error Enum ==
/// Unified error type for the vehicle registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Record does not exist in the store
    #[error("{0}")]
    NotFound(String),

    /// Request data failed validation or violated a store constraint
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Storage failure, timeout or any other unexpected condition
    #[error("internal error: {0}")]
    Internal(String),
}

impl RegistryError {
    /// NotFound with the message used for vehicle lookups.
    pub fn vehicle_not_found() -> Self {
        RegistryError::NotFound("vehicle not found".to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NotFound(_))
    }
}

// == sqlx Conversion ==
impl From<sqlx::Error> for RegistryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RegistryError::vehicle_not_found(),
            sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
                RegistryError::InvalidInput(db_err.message().to_string())
            }
            other => {
                warn!("storage error: {}", other);
                RegistryError::Internal(other.to_string())
            }
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = match &self {
            RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
            RegistryError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            RegistryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the vehicle registry.
pub type Result<T> = std::result::Result<T, RegistryError>;
