//! Schema migrations for the `records` table
//!
//! `run` is idempotent and safe to call at every startup; `revert` drops
//! the table and every record in it.

use sqlx::PgPool;

use super::DbResult;

/// Create the `records` table if it does not exist.
pub async fn run(pool: &PgPool) -> DbResult<()> {
    tracing::info!("running record migrations");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS records (
            id SERIAL PRIMARY KEY,
            created_at TIMESTAMP NOT NULL DEFAULT (now() AT TIME ZONE 'utc'),
            updated_at TIMESTAMP NOT NULL DEFAULT (now() AT TIME ZONE 'utc'),
            amount NUMERIC NOT NULL,
            description TEXT,
            happened_at TIMESTAMP,
            title TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("record migrations complete");
    Ok(())
}

/// Drop the `records` table.
pub async fn revert(pool: &PgPool) -> DbResult<()> {
    tracing::warn!("dropping records table");

    sqlx::query("DROP TABLE IF EXISTS records")
        .execute(pool)
        .await?;

    Ok(())
}
