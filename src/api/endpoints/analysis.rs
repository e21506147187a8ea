//! Pattern analysis endpoint.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;

use crate::analysis::AnalysisReport;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::journal;
use crate::models::EntryFilter;

/// `GET /api/profiles/:id/analysis`: accepts the same filters as the
/// entry history, so a report can cover a date range or one symptom.
pub async fn report(
    State(ctx): State<ApiContext>,
    Path(profile_id): Path<String>,
    params: Result<Query<EntryFilter>, QueryRejection>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let Query(filter) = params?;
    let conn = ctx.open_db()?;
    Ok(Json(journal::analyze_profile(&conn, &profile_id, &filter)?))
}
