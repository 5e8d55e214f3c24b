//! Health check endpoint
//!
//! Opens and rolls back a session to prove the database is reachable.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::db::{Session, SessionProvider};
use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

/// GET /health
async fn health<P: SessionProvider>(
    State(state): State<AppState<P>>,
) -> (StatusCode, Json<HealthResponse>) {
    let database_ok = match state.sessions().open().await {
        Ok(session) => session.rollback().await.is_ok(),
        Err(e) => {
            tracing::warn!(error = %e, "health check could not open a session");
            false
        }
    };

    let (status, body) = if database_ok {
        (StatusCode::OK, ("ok", "ok"))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, ("degraded", "unavailable"))
    };

    (
        status,
        Json(HealthResponse {
            status: body.0,
            database: body.1,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

/// Health routes
pub fn router<P: SessionProvider>() -> Router<AppState<P>> {
    Router::new().route("/health", get(health::<P>))
}
