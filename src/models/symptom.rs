use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, emoji-tagged category of thing being tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Symptom {
    pub id: String,
    pub profile_id: String,
    pub name: String,
    pub emoji: String,
    /// Only shown in parent mode.
    pub parent_only: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
