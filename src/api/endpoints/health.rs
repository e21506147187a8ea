//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub app: &'static str,
    pub version: &'static str,
    pub database_ok: bool,
    /// Seconds since a request last touched the diary.
    pub idle_secs: Option<u64>,
}

/// `GET /api/health`: liveness plus a database reachability probe.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    let database_ok = match ctx.core.open_db() {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!("Health check could not open database: {e}");
            false
        }
    };

    let idle_secs = match ctx.core.idle_secs() {
        Ok(secs) => Some(secs),
        Err(e) => {
            tracing::warn!("Health check could not read idle time: {e}");
            None
        }
    };

    Json(HealthResponse {
        status: if database_ok { "ok" } else { "degraded" },
        app: crate::config::APP_NAME,
        version: crate::config::APP_VERSION,
        database_ok,
        idle_secs,
    })
}
