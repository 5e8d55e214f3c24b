//! Database layer - connection pool, schema, sessions and repositories
//!
//! # Design Principles
//!
//! - One pool per process, built at startup and closed at shutdown
//! - One transaction per request, owned by the session
//! - Repositories run on the session's connection, never on the pool

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repos;
pub mod session;

#[cfg(test)]
pub(crate) mod memory;

pub use error::{DbError, DbResult};
pub use pool::{create_pool, create_pool_with_options, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;
pub use session::{finish, PgSession, PgSessions, Session, SessionProvider};
