//! Entry endpoints.
//!
//! - `GET /api/profiles/:id/entries`: filtered history, newest first
//! - `POST /api/profiles/:id/entries`: log an entry
//! - `POST /api/profiles/:id/entries/bulk-delete`
//! - `GET|PUT|DELETE /api/entries/:id`

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, BulkDeleteRequest};
use crate::journal::{self, EntryUpdate, NewEntry};
use crate::models::{Entry, EntryFilter};

#[derive(Debug, Serialize)]
pub struct EntriesResponse {
    pub entries: Vec<Entry>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct BulkDeleteResponse {
    pub deleted: usize,
}

pub async fn list(
    State(ctx): State<ApiContext>,
    Path(profile_id): Path<String>,
    params: Result<Query<EntryFilter>, QueryRejection>,
) -> Result<Json<EntriesResponse>, ApiError> {
    let Query(filter) = params?;
    let conn = ctx.open_db()?;
    let entries = journal::entry_history(&conn, &profile_id, &filter)?;
    Ok(Json(EntriesResponse {
        count: entries.len(),
        entries,
    }))
}

pub async fn create(
    State(ctx): State<ApiContext>,
    Path(profile_id): Path<String>,
    body: Result<Json<NewEntry>, JsonRejection>,
) -> Result<(StatusCode, Json<Entry>), ApiError> {
    let Json(input) = body?;
    let conn = ctx.open_db()?;
    let entry = journal::log_entry(&conn, &profile_id, input)?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Entry>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(journal::get_entry(&conn, &id)?))
}

pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    body: Result<Json<EntryUpdate>, JsonRejection>,
) -> Result<Json<Entry>, ApiError> {
    let Json(update) = body?;
    let conn = ctx.open_db()?;
    Ok(Json(journal::edit_entry(&conn, &id, update)?))
}

pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let conn = ctx.open_db()?;
    journal::delete_entry(&conn, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn bulk_delete(
    State(ctx): State<ApiContext>,
    Path(profile_id): Path<String>,
    body: Result<Json<BulkDeleteRequest>, JsonRejection>,
) -> Result<Json<BulkDeleteResponse>, ApiError> {
    let Json(req) = body?;
    if req.ids.is_empty() {
        return Err(ApiError::BadRequest("No entry ids given".into()));
    }
    let conn = ctx.open_db()?;
    let deleted = journal::bulk_delete_entries(&conn, &profile_id, &req.ids)?;
    Ok(Json(BulkDeleteResponse { deleted }))
}
