//! Record endpoints
//!
//! Every handler runs in its own session: validate, call the repository,
//! then commit or roll back through [`finish`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::db::{finish, Record, RecordsRepository, SessionProvider};
use crate::http::error::ApiError;
use crate::http::extractors::{Valid, ValidRecordId};
use crate::models::{RecordCreate, RecordRead, RecordUpdate};
use crate::state::AppState;

/// Newest `happened_at` first; records without one sort last.
pub fn sort_by_happened_at(records: &mut [Record]) {
    // `None` orders below every timestamp, so reversing puts it last.
    records.sort_by(|a, b| b.happened_at.cmp(&a.happened_at));
}

/// POST /records - create a record
async fn create_record<P: SessionProvider>(
    State(state): State<AppState<P>>,
    Valid(record): Valid<RecordCreate>,
) -> Result<(StatusCode, Json<RecordRead>), ApiError> {
    let mut session = state.sessions().open().await?;
    let outcome = session.create(record).await;
    let record = finish(session, outcome).await?;

    tracing::info!(id = record.id, "created record");
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// GET /records - list all records by `happened_at`, newest first
async fn list_records<P: SessionProvider>(
    State(state): State<AppState<P>>,
) -> Result<Json<Vec<RecordRead>>, ApiError> {
    let mut session = state.sessions().open().await?;
    let outcome = session.find_all().await;
    let mut records = finish(session, outcome).await?;

    sort_by_happened_at(&mut records);
    Ok(Json(records.into_iter().map(RecordRead::from).collect()))
}

/// GET /records/{record_id} - get a single record
async fn read_record<P: SessionProvider>(
    State(state): State<AppState<P>>,
    ValidRecordId(id): ValidRecordId,
) -> Result<Json<RecordRead>, ApiError> {
    let mut session = state.sessions().open().await?;
    let outcome = session.find_by_id(id).await;
    let record = finish(session, outcome).await?;

    Ok(Json(record.into()))
}

/// PUT /records/{record_id} - apply a partial update
async fn update_record<P: SessionProvider>(
    State(state): State<AppState<P>>,
    ValidRecordId(id): ValidRecordId,
    Valid(changes): Valid<RecordUpdate>,
) -> Result<Json<RecordRead>, ApiError> {
    let mut session = state.sessions().open().await?;
    let outcome = session.update_by_id(id, changes).await;
    let record = finish(session, outcome).await?;

    tracing::info!(id, "updated record");
    Ok(Json(record.into()))
}

/// DELETE /records/{record_id} - hard delete
async fn delete_record<P: SessionProvider>(
    State(state): State<AppState<P>>,
    ValidRecordId(id): ValidRecordId,
) -> Result<StatusCode, ApiError> {
    let mut session = state.sessions().open().await?;
    let outcome = session.delete_by_id(id).await;
    finish(session, outcome).await?;

    tracing::info!(id, "deleted record");
    Ok(StatusCode::NO_CONTENT)
}

/// Record routes
pub fn router<P: SessionProvider>() -> Router<AppState<P>> {
    Router::new()
        .route(
            "/records",
            get(list_records::<P>).post(create_record::<P>),
        )
        .route(
            "/records/{record_id}",
            get(read_record::<P>)
                .put(update_record::<P>)
                .delete(delete_record::<P>),
        )
}
