//! Repository implementations for database access
//!
//! Repositories borrow a connection from the caller's session and never
//! open transactions of their own.

pub mod records;

pub use records::{PgRecordsRepo, Record, RecordId, RecordsRepository};

#[cfg(test)]
pub(crate) use records::not_found;
