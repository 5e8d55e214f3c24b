//! In-memory session provider for tests
//!
//! Each session works on a snapshot of the committed rows; commit publishes
//! the snapshot, rollback or drop discards it. Concurrent sessions are
//! last-writer-wins, matching what the HTTP layer may assume of Postgres.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::repos::{not_found, Record, RecordId, RecordsRepository};
use super::session::{Session, SessionProvider};
use super::{DbError, DbResult};
use crate::models::{RecordCreate, RecordUpdate};

#[derive(Debug, Clone, Default)]
struct Tables {
    next_id: RecordId,
    records: BTreeMap<RecordId, Record>,
}

#[derive(Clone, Default)]
pub struct MemorySessions {
    committed: Arc<Mutex<Tables>>,
    /// When set, `open` fails as if the database were unreachable.
    unavailable: bool,
    /// When set, sessions open and work but `commit` fails.
    failing_commits: bool,
}

impl MemorySessions {
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Same committed rows, but every commit fails.
    pub fn with_failing_commits(self) -> Self {
        Self {
            failing_commits: true,
            ..self
        }
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.committed.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Committed rows, bypassing any session.
    pub fn snapshot(&self) -> Vec<Record> {
        self.lock().records.values().cloned().collect()
    }
}

#[async_trait]
impl SessionProvider for MemorySessions {
    type Session = MemorySession;

    async fn open(&self) -> DbResult<MemorySession> {
        if self.unavailable {
            return Err(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        }

        Ok(MemorySession {
            working: self.lock().clone(),
            committed: Arc::clone(&self.committed),
            fail_commit: self.failing_commits,
        })
    }
}

pub struct MemorySession {
    working: Tables,
    committed: Arc<Mutex<Tables>>,
    fail_commit: bool,
}

#[async_trait]
impl RecordsRepository for MemorySession {
    async fn create(&mut self, record: RecordCreate) -> DbResult<Record> {
        let now = Utc::now().naive_utc();
        self.working.next_id += 1;

        let record = Record {
            id: self.working.next_id,
            created_at: now,
            updated_at: now,
            amount: record.amount.into(),
            description: record.description.map(|d| d.into_string()),
            happened_at: record.happened_at,
            title: record.title.map(|t| t.into_string()),
        };
        self.working.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_all(&mut self) -> DbResult<Vec<Record>> {
        Ok(self.working.records.values().cloned().collect())
    }

    async fn find_by_id(&mut self, id: RecordId) -> DbResult<Record> {
        self.working
            .records
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn update_by_id(&mut self, id: RecordId, changes: RecordUpdate) -> DbResult<Record> {
        let record = self
            .working
            .records
            .get_mut(&id)
            .ok_or_else(|| not_found(id))?;

        if !changes.is_empty() {
            record.apply(changes);
            record.updated_at = Utc::now().naive_utc();
        }
        Ok(record.clone())
    }

    async fn delete_by_id(&mut self, id: RecordId) -> DbResult<()> {
        self.working
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }
}

#[async_trait]
impl Session for MemorySession {
    async fn commit(self) -> DbResult<()> {
        if self.fail_commit {
            return Err(DbError::Sqlx(sqlx::Error::PoolClosed));
        }

        let mut committed = self
            .committed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *committed = self.working;
        Ok(())
    }

    async fn rollback(self) -> DbResult<()> {
        Ok(())
    }
}
