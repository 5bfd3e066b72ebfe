//! Generic CRUD handlers: list, create, read, update, delete.
//!
//! Each handler issues one storage call and is the only place its errors are
//! translated to a response.

use crate::error::AppError;
use crate::extractors::Payload;
use crate::model::{Resource, Row};
use crate::response::{projected, with_id};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

/// Non-numeric ids can never match a generated key.
fn parse_id<R: Resource>(raw: &str) -> Result<u64, AppError> {
    raw.parse().map_err(|_| {
        tracing::debug!(resource = R::NAME, id = raw, "id is not a valid key");
        AppError::NotFound(R::not_found_message())
    })
}

fn not_found<R: Resource>(id: u64) -> AppError {
    tracing::info!(resource = R::NAME, id, "no row matched");
    AppError::NotFound(R::not_found_message())
}

pub async fn list<R: Resource>(State(state): State<AppState>) -> Result<Json<Vec<Row>>, AppError> {
    let rows = state
        .store
        .fetch_all(&R::TABLE)
        .await
        .inspect_err(|e| tracing::error!(resource = R::NAME, error = %e, "failed to list"))?;
    Ok(Json(rows))
}

pub async fn create<R: Resource>(
    State(state): State<AppState>,
    Payload(payload): Payload<R::Payload>,
) -> Result<Json<Value>, AppError> {
    let fields = serde_json::to_value(&payload)?;
    let values = R::TABLE.values_from(&fields);
    let id = state
        .store
        .insert(&R::TABLE, values)
        .await
        .inspect_err(|e| tracing::error!(resource = R::NAME, error = %e, "failed to insert"))?;
    tracing::info!(resource = R::NAME, id, "inserted");
    Ok(Json(with_id(R::ID_KEY, id, fields)))
}

pub async fn read<R: Resource>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Vec<Row>>, AppError> {
    let id = parse_id::<R>(&raw_id)?;
    let rows = state
        .store
        .fetch_by_id(&R::TABLE, id)
        .await
        .inspect_err(|e| tracing::error!(resource = R::NAME, id, error = %e, "failed to read"))?;
    if rows.is_empty() {
        return Err(not_found::<R>(id));
    }
    tracing::debug!(resource = R::NAME, id, "read");
    Ok(Json(projected(&R::TABLE, &rows)))
}

pub async fn update<R: Resource>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Payload(payload): Payload<R::Payload>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id::<R>(&raw_id)?;
    let fields = serde_json::to_value(&payload)?;
    let values = R::TABLE.values_from(&fields);
    let matched = state
        .store
        .update(&R::TABLE, id, values)
        .await
        .inspect_err(|e| tracing::error!(resource = R::NAME, id, error = %e, "failed to update"))?;
    if matched == 0 {
        return Err(not_found::<R>(id));
    }
    tracing::info!(resource = R::NAME, id, "updated");
    Ok(Json(with_id(R::ID_KEY, id, fields)))
}

pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id::<R>(&raw_id)?;
    let removed = state
        .store
        .delete(&R::TABLE, id)
        .await
        .inspect_err(|e| tracing::error!(resource = R::NAME, id, error = %e, "failed to delete"))?;
    if removed == 0 {
        return Err(not_found::<R>(id));
    }
    tracing::info!(resource = R::NAME, id, "deleted");
    Ok(StatusCode::OK)
}
