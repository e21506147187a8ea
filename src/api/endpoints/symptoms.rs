//! Symptom endpoints.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, DeleteSymptomQuery};
use crate::journal::{self, NewSymptom, SymptomUpdate};
use crate::models::{Symptom, SymptomFilter};

#[derive(Debug, Serialize)]
pub struct SymptomsResponse {
    pub symptoms: Vec<Symptom>,
}

/// `GET /api/profiles/:id/symptoms?parent_mode=true`
pub async fn list(
    State(ctx): State<ApiContext>,
    Path(profile_id): Path<String>,
    params: Result<Query<SymptomFilter>, QueryRejection>,
) -> Result<Json<SymptomsResponse>, ApiError> {
    let Query(filter) = params?;
    let conn = ctx.open_db()?;
    let symptoms = journal::visible_symptoms(&conn, &profile_id, filter.parent_mode)?;
    Ok(Json(SymptomsResponse { symptoms }))
}

pub async fn create(
    State(ctx): State<ApiContext>,
    Path(profile_id): Path<String>,
    body: Result<Json<NewSymptom>, JsonRejection>,
) -> Result<(StatusCode, Json<Symptom>), ApiError> {
    let Json(input) = body?;
    let conn = ctx.open_db()?;
    let symptom = journal::create_symptom(&conn, &profile_id, input)?;
    Ok((StatusCode::CREATED, Json(symptom)))
}

pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    body: Result<Json<SymptomUpdate>, JsonRejection>,
) -> Result<Json<Symptom>, ApiError> {
    let Json(update) = body?;
    let conn = ctx.open_db()?;
    Ok(Json(journal::update_symptom(&conn, &id, update)?))
}

/// `DELETE /api/symptoms/:id[?force=true]`: 400 while entries still use it.
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    params: Result<Query<DeleteSymptomQuery>, QueryRejection>,
) -> Result<StatusCode, ApiError> {
    let Query(query) = params?;
    let conn = ctx.open_db()?;
    journal::delete_symptom(&conn, &id, query.force)?;
    Ok(StatusCode::NO_CONTENT)
}
