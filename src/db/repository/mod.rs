//! Repository layer: entity-scoped database operations.
//!
//! One sub-module per table; all public functions are re-exported here.

mod entry;
mod profile;
mod resource_cache;
mod symptom;

use rusqlite::types::Type;
use rusqlite::Row;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::DatabaseError;

pub use entry::*;
pub use profile::*;
pub use resource_cache::*;
pub use symptom::*;

/// Reads an optional JSON text column into `T`.
pub(crate) fn json_column<T: DeserializeOwned>(
    row: &Row<'_>,
    column: &str,
) -> rusqlite::Result<Option<T>> {
    let idx = row.as_ref().column_index(column)?;
    match row.get::<_, Option<String>>(idx)? {
        None => Ok(None),
        Some(text) if text.trim().is_empty() => Ok(None),
        Some(text) => serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))),
    }
}

/// Serialises an optional value for a JSON text column.
pub(crate) fn to_json_column<T: Serialize>(value: &Option<T>) -> Result<Option<String>, DatabaseError> {
    value
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(DatabaseError::from)
}
