use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One tracked person. Owns its symptoms and entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}
