use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::DatabaseError;
use crate::models::*;

const SYMPTOM_COLUMNS: &str = "id, profile_id, name, emoji, parent_only, created_at, updated_at";

fn map_symptom(row: &Row<'_>) -> rusqlite::Result<Symptom> {
    Ok(Symptom {
        id: row.get("id")?,
        profile_id: row.get("profile_id")?,
        name: row.get("name")?,
        emoji: row.get("emoji")?,
        parent_only: row.get::<_, i32>("parent_only")? != 0,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn insert_symptom(conn: &Connection, symptom: &Symptom) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO symptoms (id, profile_id, name, emoji, parent_only, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            symptom.id,
            symptom.profile_id,
            symptom.name,
            symptom.emoji,
            symptom.parent_only as i32,
            symptom.created_at,
            symptom.updated_at,
        ],
    )?;
    Ok(())
}

pub fn get_symptom(conn: &Connection, id: &str) -> Result<Option<Symptom>, DatabaseError> {
    conn.query_row(
        &format!("SELECT {SYMPTOM_COLUMNS} FROM symptoms WHERE id = ?1"),
        params![id],
        map_symptom,
    )
    .optional()
    .map_err(DatabaseError::from)
}

/// Symptoms of a profile in creation order. Parent-only symptoms are hidden
/// unless the filter asks for parent mode.
pub fn list_symptoms(
    conn: &Connection,
    profile_id: &str,
    filter: &SymptomFilter,
) -> Result<Vec<Symptom>, DatabaseError> {
    let mut sql = format!("SELECT {SYMPTOM_COLUMNS} FROM symptoms WHERE profile_id = ?1");
    if !filter.parent_mode {
        sql.push_str(" AND parent_only = 0");
    }
    sql.push_str(" ORDER BY created_at ASC, name ASC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![profile_id], map_symptom)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

/// Rewrites the mutable fields of a symptom.
pub fn update_symptom(conn: &Connection, symptom: &Symptom) -> Result<(), DatabaseError> {
    let updated = conn.execute(
        "UPDATE symptoms SET name = ?1, emoji = ?2, parent_only = ?3, updated_at = ?4
         WHERE id = ?5",
        params![
            symptom.name,
            symptom.emoji,
            symptom.parent_only as i32,
            symptom.updated_at,
            symptom.id,
        ],
    )?;
    if updated == 0 {
        return Err(DatabaseError::not_found("Symptom", &symptom.id));
    }
    Ok(())
}

pub fn delete_symptom(conn: &Connection, id: &str) -> Result<(), DatabaseError> {
    let deleted = conn.execute("DELETE FROM symptoms WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(DatabaseError::not_found("Symptom", id));
    }
    Ok(())
}

/// Number of entries that reference the symptom.
pub fn count_entries_for_symptom(conn: &Connection, symptom_id: &str) -> Result<i64, DatabaseError> {
    conn.query_row(
        "SELECT COUNT(*) FROM entries WHERE symptom_id = ?1",
        params![symptom_id],
        |row| row.get(0),
    )
    .map_err(DatabaseError::from)
}
