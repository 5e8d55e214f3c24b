//! Per-request unit of work
//!
//! A session is one database transaction. Handlers open a session, run
//! repository calls on it, then hand the outcome to [`finish`], which
//! commits on success and rolls back on failure. A session dropped on any
//! other path (panic, cancelled request) rolls back and returns its
//! connection to the pool.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::repos::{PgRecordsRepo, Record, RecordId, RecordsRepository};
use super::{DbError, DbResult};
use crate::models::{RecordCreate, RecordUpdate};

/// A transactional unit of work over which records can be managed
#[async_trait]
pub trait Session: RecordsRepository + Sized + 'static {
    async fn commit(self) -> DbResult<()>;
    async fn rollback(self) -> DbResult<()>;
}

/// Hands out one [`Session`] per request
#[async_trait]
pub trait SessionProvider: Clone + Send + Sync + 'static {
    type Session: Session;

    async fn open(&self) -> DbResult<Self::Session>;
}

/// Commit or roll back `session` depending on `outcome`, then return it.
///
/// A failed rollback is logged; the original error is what propagates.
pub async fn finish<S, T, E>(session: S, outcome: Result<T, E>) -> Result<T, E>
where
    S: Session,
    E: From<DbError>,
{
    match outcome {
        Ok(value) => {
            session.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = session.rollback().await {
                tracing::warn!(error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    }
}

/// Session provider backed by a PostgreSQL pool.
///
/// Built once at startup and closed with [`PgSessions::close`] at shutdown.
#[derive(Clone)]
pub struct PgSessions {
    pool: PgPool,
}

impl PgSessions {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Wait for checked-out connections to return, then close the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("database pool closed");
    }
}

#[async_trait]
impl SessionProvider for PgSessions {
    type Session = PgSession;

    async fn open(&self) -> DbResult<PgSession> {
        let tx = self.pool.begin().await?;
        Ok(PgSession { tx })
    }
}

/// One PostgreSQL transaction
pub struct PgSession {
    tx: Transaction<'static, Postgres>,
}

impl PgSession {
    fn records(&mut self) -> PgRecordsRepo<'_> {
        PgRecordsRepo::new(&mut *self.tx)
    }
}

#[async_trait]
impl RecordsRepository for PgSession {
    async fn create(&mut self, record: RecordCreate) -> DbResult<Record> {
        self.records().create(record).await
    }

    async fn find_all(&mut self) -> DbResult<Vec<Record>> {
        self.records().find_all().await
    }

    async fn find_by_id(&mut self, id: RecordId) -> DbResult<Record> {
        self.records().find_by_id(id).await
    }

    async fn update_by_id(&mut self, id: RecordId, changes: RecordUpdate) -> DbResult<Record> {
        self.records().update_by_id(id, changes).await
    }

    async fn delete_by_id(&mut self, id: RecordId) -> DbResult<()> {
        self.records().delete_by_id(id).await
    }
}

#[async_trait]
impl Session for PgSession {
    async fn commit(self) -> DbResult<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> DbResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
