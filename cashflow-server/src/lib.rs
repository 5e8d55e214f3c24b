//! cashflow-server: HTTP API over financial transaction records
//!
//! Clients create, list, read, update and delete records stored in
//! PostgreSQL. Each request runs in its own transaction.

pub mod config;
pub mod db;
pub mod http;
pub mod models;
pub mod state;

pub use config::{resolve_database_url, DEFAULT_DATABASE_URL};
pub use db::{DbError, PgSessions};
pub use http::{build_router, run_server, ApiError, ServerConfig, ServerError};
pub use state::AppState;
