use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::DatabaseError;
use crate::models::*;

use super::{json_column, to_json_column};

const ENTRY_COLUMNS: &str = "id, profile_id, symptom_id, date, timestamp, intensity, duration, note,
     context, environment, photos, voice_note, created_at, updated_at";

fn map_entry(row: &Row<'_>) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: row.get("id")?,
        profile_id: row.get("profile_id")?,
        symptom_id: row.get("symptom_id")?,
        date: row.get("date")?,
        timestamp: row.get("timestamp")?,
        intensity: row.get("intensity")?,
        duration: row.get("duration")?,
        note: row.get("note")?,
        context: json_column(row, "context")?,
        environment: json_column(row, "environment")?,
        photos: json_column::<Vec<String>>(row, "photos")?.unwrap_or_default(),
        voice_note: row.get("voice_note")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn photos_column(photos: &[String]) -> Result<Option<String>, DatabaseError> {
    if photos.is_empty() {
        Ok(None)
    } else {
        Ok(Some(serde_json::to_string(photos)?))
    }
}

pub fn insert_entry(conn: &Connection, entry: &Entry) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO entries (id, profile_id, symptom_id, date, timestamp, intensity, duration,
         note, context, environment, photos, voice_note, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            entry.id,
            entry.profile_id,
            entry.symptom_id,
            entry.date,
            entry.timestamp,
            entry.intensity,
            entry.duration,
            entry.note,
            to_json_column(&entry.context)?,
            to_json_column(&entry.environment)?,
            photos_column(&entry.photos)?,
            entry.voice_note,
            entry.created_at,
            entry.updated_at,
        ],
    )?;
    Ok(())
}

pub fn get_entry(conn: &Connection, id: &str) -> Result<Option<Entry>, DatabaseError> {
    conn.query_row(
        &format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE id = ?1"),
        params![id],
        map_entry,
    )
    .optional()
    .map_err(DatabaseError::from)
}

/// Rewrites every mutable column. `id`, `profile_id`, `timestamp` and
/// `created_at` are left untouched.
pub fn update_entry(conn: &Connection, entry: &Entry) -> Result<(), DatabaseError> {
    let updated = conn.execute(
        "UPDATE entries SET symptom_id = ?1, date = ?2, intensity = ?3, duration = ?4, note = ?5,
         context = ?6, environment = ?7, photos = ?8, voice_note = ?9, updated_at = ?10
         WHERE id = ?11",
        params![
            entry.symptom_id,
            entry.date,
            entry.intensity,
            entry.duration,
            entry.note,
            to_json_column(&entry.context)?,
            to_json_column(&entry.environment)?,
            photos_column(&entry.photos)?,
            entry.voice_note,
            entry.updated_at,
            entry.id,
        ],
    )?;
    if updated == 0 {
        return Err(DatabaseError::not_found("Entry", &entry.id));
    }
    Ok(())
}

pub fn delete_entry(conn: &Connection, id: &str) -> Result<(), DatabaseError> {
    let deleted = conn.execute("DELETE FROM entries WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(DatabaseError::not_found("Entry", id));
    }
    Ok(())
}

/// Deletes the given entries of one profile in a single transaction.
/// Ids that do not exist or belong to another profile are skipped.
/// Returns the number of rows removed.
pub fn delete_entries(
    conn: &Connection,
    profile_id: &str,
    ids: &[String],
) -> Result<usize, DatabaseError> {
    let tx = conn.unchecked_transaction()?;
    let mut removed = 0;
    {
        let mut stmt = tx.prepare("DELETE FROM entries WHERE id = ?1 AND profile_id = ?2")?;
        for id in ids {
            removed += stmt.execute(params![id, profile_id])?;
        }
    }
    tx.commit()?;
    Ok(removed)
}

/// Entry history for a profile, newest first, with optional filters.
pub fn list_entries(
    conn: &Connection,
    profile_id: &str,
    filter: &EntryFilter,
) -> Result<Vec<Entry>, DatabaseError> {
    let mut sql = format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE profile_id = ?1");

    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = vec![Box::new(profile_id.to_string())];
    let mut param_idx = 2u32;

    if let Some(ref symptom_id) = filter.symptom_id {
        sql.push_str(&format!(" AND symptom_id = ?{param_idx}"));
        params_vec.push(Box::new(symptom_id.clone()));
        param_idx += 1;
    }
    if let Some(from) = filter.date_from {
        sql.push_str(&format!(" AND date >= ?{param_idx}"));
        params_vec.push(Box::new(from));
        param_idx += 1;
    }
    if let Some(to) = filter.date_to {
        sql.push_str(&format!(" AND date <= ?{param_idx}"));
        params_vec.push(Box::new(to));
        param_idx += 1;
    }
    if let Some(min) = filter.intensity_min {
        sql.push_str(&format!(" AND intensity >= ?{param_idx}"));
        params_vec.push(Box::new(min));
        param_idx += 1;
    }
    if let Some(max) = filter.intensity_max {
        sql.push_str(&format!(" AND intensity <= ?{param_idx}"));
        params_vec.push(Box::new(max));
        param_idx += 1;
    }
    if let Some(ref search) = filter.search {
        let needle = search.trim();
        if !needle.is_empty() {
            sql.push_str(&format!(" AND fold_case(note) LIKE ?{param_idx} ESCAPE '\\'"));
            params_vec.push(Box::new(format!("%{}%", escape_like(&needle.to_lowercase()))));
            param_idx += 1;
        }
    }

    sql.push_str(" ORDER BY timestamp DESC, id ASC");
    if let Some(limit) = filter.limit {
        sql.push_str(&format!(" LIMIT ?{param_idx}"));
        params_vec.push(Box::new(i64::from(limit)));
    }

    let param_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(param_refs.as_slice(), map_entry)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
