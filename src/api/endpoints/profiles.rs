//! Profile endpoints.
//!
//! - `GET|POST /api/profiles`
//! - `GET|PUT|DELETE /api/profiles/:id`
//! - `GET|PUT /api/profiles/active`

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ActiveProfileRequest, ApiContext};
use crate::db::repository;
use crate::journal::{self, NewProfile};
use crate::models::Profile;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilesResponse {
    pub profiles: Vec<Profile>,
    pub active_profile_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ActiveProfileResponse {
    pub profile: Option<Profile>,
}

/// `GET /api/profiles`: all profiles plus the current selection.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<ProfilesResponse>, ApiError> {
    let conn = ctx.open_db()?;
    let profiles = repository::list_profiles(&conn)?;
    let active_profile_id = journal::active_profile(&conn)?.map(|p| p.id);
    Ok(Json(ProfilesResponse {
        profiles,
        active_profile_id,
    }))
}

pub async fn create(
    State(ctx): State<ApiContext>,
    body: Result<Json<NewProfile>, JsonRejection>,
) -> Result<(StatusCode, Json<Profile>), ApiError> {
    let Json(input) = body?;
    let conn = ctx.open_db()?;
    let profile = journal::create_profile(&conn, input)?;
    Ok((StatusCode::CREATED, Json(profile)))
}

pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(journal::get_profile(&conn, &id)?))
}

pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    body: Result<Json<NewProfile>, JsonRejection>,
) -> Result<Json<Profile>, ApiError> {
    let Json(input) = body?;
    let conn = ctx.open_db()?;
    Ok(Json(journal::update_profile(&conn, &id, input)?))
}

/// `DELETE /api/profiles/:id`: removes the profile and everything it owns.
pub async fn remove(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let conn = ctx.open_db()?;
    journal::delete_profile(&conn, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn active(
    State(ctx): State<ApiContext>,
) -> Result<Json<ActiveProfileResponse>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(ActiveProfileResponse {
        profile: journal::active_profile(&conn)?,
    }))
}

pub async fn set_active(
    State(ctx): State<ApiContext>,
    body: Result<Json<ActiveProfileRequest>, JsonRejection>,
) -> Result<Json<ActiveProfileResponse>, ApiError> {
    let Json(req) = body?;
    let conn = ctx.open_db()?;
    let profile = journal::set_active_profile(&conn, &req.profile_id)?;
    Ok(Json(ActiveProfileResponse {
        profile: Some(profile),
    }))
}
