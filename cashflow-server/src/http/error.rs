//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses of the form `{"detail": ...}`.
//! Only `NotFound` maps to 404; storage failures are logged and surface
//! as 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::db::DbError;
use crate::models::{FieldError, ValidationError};

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (422)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Database error (500, logged)
    Database(DbError),
}

fn field_detail(error: &FieldError) -> Value {
    json!({
        "loc": error.loc(),
        "msg": error.kind.to_string(),
        "type": error.kind.code(),
    })
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "detail": e.errors().iter().map(field_detail).collect::<Vec<_>>()
                }),
            ),
            Self::NotFound { resource, id } => {
                tracing::debug!(resource, id = %id, "not found");
                (
                    StatusCode::NOT_FOUND,
                    json!({ "detail": format!("{} not found", resource) }),
                )
            }
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "detail": "Internal Server Error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<FieldError> for ApiError {
    fn from(e: FieldError) -> Self {
        Self::Validation(e.into())
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            _ => Self::Database(e),
        }
    }
}
