//! Custom Axum extractors
//!
//! Rejections become 422 responses with the same `detail` shape as field
//! validation failures.

use axum::extract::{FromRequest, FromRequestParts, Json, Path, Request};
use axum::http::request::Parts;
use serde_json::Value;

use super::error::ApiError;
use crate::db::RecordId;
use crate::models::{FieldError, FieldErrorKind, Schema};

/// Extract and validate a record id from path
pub struct ValidRecordId(pub RecordId);

impl<S> FromRequestParts<S> for ValidRecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| FieldError::path("record_id", FieldErrorKind::Missing))?;

        let id = raw
            .parse::<RecordId>()
            .map_err(|_| FieldError::path("record_id", FieldErrorKind::NotAnInteger))?;

        Ok(Self(id))
    }
}

/// Extract a JSON body and validate it against schema `T`
pub struct Valid<T>(pub T);

impl<S, T> FromRequest<S> for Valid<T>
where
    S: Send + Sync,
    T: Schema,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body): Json<Value> = Json::from_request(req, state).await.map_err(|rejection| {
            FieldError::whole_body(FieldErrorKind::MalformedJson {
                reason: rejection.body_text(),
            })
        })?;

        Ok(Self(T::from_json(&body)?))
    }
}
