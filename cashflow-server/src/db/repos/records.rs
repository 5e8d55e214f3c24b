//! Records repository
//!
//! Sole owner of persistence for the `records` table. Every operation runs
//! on the connection of the caller's session, so it joins that session's
//! transaction:
//! - create: INSERT ... RETURNING (id and audit timestamps come from the table)
//! - update: load, apply the change-set in memory, write back
//! - delete: hard delete, `NotFound` when no row matched

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgConnection};

use crate::db::{DbError, DbResult};
use crate::models::{RecordCreate, RecordUpdate};

/// Surrogate key of a record
pub type RecordId = i32;

/// Record row from database
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Record {
    pub id: RecordId,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub amount: Decimal,
    pub description: Option<String>,
    pub happened_at: Option<NaiveDateTime>,
    pub title: Option<String>,
}

impl Record {
    /// Apply a change-set; fields absent from it keep their value.
    pub fn apply(&mut self, changes: RecordUpdate) {
        if let Some(amount) = changes.amount {
            self.amount = amount.into();
        }
        changes
            .description
            .map(|d| d.into_string())
            .apply_to(&mut self.description);
        changes
            .title
            .map(|t| t.into_string())
            .apply_to(&mut self.title);
        changes.happened_at.apply_to(&mut self.happened_at);
    }
}

pub(crate) fn not_found(id: RecordId) -> DbError {
    DbError::NotFound {
        resource: "Record",
        id: id.to_string(),
    }
}

/// CRUD over records within one session
#[async_trait]
pub trait RecordsRepository: Send {
    /// Persist a new record and return it with `id` populated.
    async fn create(&mut self, record: RecordCreate) -> DbResult<Record>;

    /// Every record, in no particular order.
    async fn find_all(&mut self) -> DbResult<Vec<Record>>;

    async fn find_by_id(&mut self, id: RecordId) -> DbResult<Record>;

    /// Apply only the supplied fields and return the updated record.
    async fn update_by_id(&mut self, id: RecordId, changes: RecordUpdate) -> DbResult<Record>;

    async fn delete_by_id(&mut self, id: RecordId) -> DbResult<()>;
}

/// PostgreSQL records repository bound to one connection
pub struct PgRecordsRepo<'c> {
    conn: &'c mut PgConnection,
}

impl<'c> PgRecordsRepo<'c> {
    pub fn new(conn: &'c mut PgConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl RecordsRepository for PgRecordsRepo<'_> {
    async fn create(&mut self, record: RecordCreate) -> DbResult<Record> {
        let record: Record = sqlx::query_as(
            r#"
            INSERT INTO records (amount, description, happened_at, title)
            VALUES ($1, $2, $3, $4)
            RETURNING id, created_at, updated_at, amount, description, happened_at, title
            "#,
        )
        .bind(record.amount.value())
        .bind(record.description.map(|d| d.into_string()))
        .bind(record.happened_at)
        .bind(record.title.map(|t| t.into_string()))
        .fetch_one(&mut *self.conn)
        .await?;

        tracing::debug!(id = record.id, "record created");
        Ok(record)
    }

    async fn find_all(&mut self) -> DbResult<Vec<Record>> {
        let records = sqlx::query_as(
            r#"
            SELECT id, created_at, updated_at, amount, description, happened_at, title
            FROM records
            "#,
        )
        .fetch_all(&mut *self.conn)
        .await?;

        Ok(records)
    }

    async fn find_by_id(&mut self, id: RecordId) -> DbResult<Record> {
        sqlx::query_as(
            r#"
            SELECT id, created_at, updated_at, amount, description, happened_at, title
            FROM records
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| not_found(id))
    }

    async fn update_by_id(&mut self, id: RecordId, changes: RecordUpdate) -> DbResult<Record> {
        let mut record = self.find_by_id(id).await?;
        if changes.is_empty() {
            return Ok(record);
        }
        record.apply(changes);

        let record: Record = sqlx::query_as(
            r#"
            UPDATE records
            SET amount = $2,
                description = $3,
                happened_at = $4,
                title = $5,
                updated_at = (now() AT TIME ZONE 'utc')
            WHERE id = $1
            RETURNING id, created_at, updated_at, amount, description, happened_at, title
            "#,
        )
        .bind(id)
        .bind(record.amount)
        .bind(record.description)
        .bind(record.happened_at)
        .bind(record.title)
        .fetch_optional(&mut *self.conn)
        .await?
        .ok_or_else(|| not_found(id))?;

        tracing::debug!(id, "record updated");
        Ok(record)
    }

    async fn delete_by_id(&mut self, id: RecordId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM records WHERE id = $1")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::debug!(id, "record deleted");
        Ok(())
    }
}
