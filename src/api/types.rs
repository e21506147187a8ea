//! Shared types for the API layer.

use std::sync::Arc;

use serde::Deserialize;

use crate::api::error::ApiError;
use crate::core_state::CoreState;

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }

    /// Open a per-request connection and mark the diary as active.
    pub fn open_db(&self) -> Result<rusqlite::Connection, ApiError> {
        let conn = self.core.open_db()?;
        self.core.update_activity();
        Ok(conn)
    }
}

/// Body of `PUT /api/profiles/active`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveProfileRequest {
    pub profile_id: String,
}

/// Body of `POST /api/profiles/:id/entries/bulk-delete`.
#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<String>,
}

/// Query of `DELETE /api/symptoms/:id`.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteSymptomQuery {
    #[serde(default)]
    pub force: bool,
}
