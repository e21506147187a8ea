use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::enums::ResourceType;

/// Get a cached resource value for an owner. Returns None if not set.
pub fn get_resource(
    conn: &Connection,
    owner_id: &str,
    resource_type: ResourceType,
) -> Result<Option<String>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT value FROM resource_cache WHERE owner_id = ?1 AND resource_type = ?2",
    )?;
    match stmt.query_row(params![owner_id, resource_type.as_str()], |row| {
        row.get::<_, String>(0)
    }) {
        Ok(val) => Ok(Some(val)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(DatabaseError::from(e)),
    }
}

/// Set a cached resource value (upsert).
pub fn set_resource(
    conn: &Connection,
    owner_id: &str,
    resource_type: ResourceType,
    value: &str,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO resource_cache (owner_id, resource_type, value, updated_at)
         VALUES (?1, ?2, ?3, datetime('now'))
         ON CONFLICT(owner_id, resource_type) DO UPDATE SET value = ?3, updated_at = datetime('now')",
        params![owner_id, resource_type.as_str(), value],
    )?;
    Ok(())
}

pub fn clear_resource(
    conn: &Connection,
    owner_id: &str,
    resource_type: ResourceType,
) -> Result<(), DatabaseError> {
    conn.execute(
        "DELETE FROM resource_cache WHERE owner_id = ?1 AND resource_type = ?2",
        params![owner_id, resource_type.as_str()],
    )?;
    Ok(())
}
