use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::DatabaseError;
use crate::models::Profile;

const PROFILE_COLUMNS: &str = "id, name, avatar, created_at";

fn map_profile(row: &Row<'_>) -> rusqlite::Result<Profile> {
    Ok(Profile {
        id: row.get("id")?,
        name: row.get("name")?,
        avatar: row.get("avatar")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_profile(conn: &Connection, profile: &Profile) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO profiles (id, name, avatar, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![profile.id, profile.name, profile.avatar, profile.created_at],
    )?;
    Ok(())
}

pub fn get_profile(conn: &Connection, id: &str) -> Result<Option<Profile>, DatabaseError> {
    conn.query_row(
        &format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = ?1"),
        params![id],
        map_profile,
    )
    .optional()
    .map_err(DatabaseError::from)
}

/// All profiles, oldest first.
pub fn list_profiles(conn: &Connection) -> Result<Vec<Profile>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY created_at ASC, name ASC"
    ))?;
    let rows = stmt.query_map([], map_profile)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::from)
}

pub fn update_profile(
    conn: &Connection,
    id: &str,
    name: &str,
    avatar: Option<&str>,
) -> Result<(), DatabaseError> {
    let updated = conn.execute(
        "UPDATE profiles SET name = ?1, avatar = ?2 WHERE id = ?3",
        params![name, avatar, id],
    )?;
    if updated == 0 {
        return Err(DatabaseError::not_found("Profile", id));
    }
    Ok(())
}

/// Deletes a profile together with its symptoms and entries.
pub fn delete_profile(conn: &Connection, id: &str) -> Result<(), DatabaseError> {
    let deleted = conn.execute("DELETE FROM profiles WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(DatabaseError::not_found("Profile", id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use chrono::{TimeZone, Utc};

    fn make_profile(id: &str, name: &str) -> Profile {
        Profile {
            id: id.into(),
            name: name.into(),
            avatar: Some("🧒".into()),
            created_at: Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn insert_and_get_round_trip() {
        let conn = open_memory_database().unwrap();
        let profile = make_profile("p-1", "Anna");
        insert_profile(&conn, &profile).unwrap();
        assert_eq!(get_profile(&conn, "p-1").unwrap(), Some(profile));
        assert_eq!(get_profile(&conn, "missing").unwrap(), None);
    }

    #[test]
    fn update_renames() {
        let conn = open_memory_database().unwrap();
        insert_profile(&conn, &make_profile("p-1", "Anna")).unwrap();
        update_profile(&conn, "p-1", "Panni", None).unwrap();
        let stored = get_profile(&conn, "p-1").unwrap().unwrap();
        assert_eq!(stored.name, "Panni");
        assert!(stored.avatar.is_none());
    }

    #[test]
    fn update_missing_is_not_found() {
        let conn = open_memory_database().unwrap();
        let err = update_profile(&conn, "nope", "X", None).unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }

    #[test]
    fn delete_cascades_to_entries() {
        let conn = open_memory_database().unwrap();
        insert_profile(&conn, &make_profile("p-1", "Anna")).unwrap();
        conn.execute(
            "INSERT INTO entries (id, profile_id, symptom_id, date, timestamp, intensity, created_at, updated_at)
             VALUES ('e-1', 'p-1', 's-1', '2025-02-01', '2025-02-01 09:00:00+00:00', 3,
                     '2025-02-01 09:00:00+00:00', '2025-02-01 09:00:00+00:00')",
            [],
        )
        .unwrap();
        delete_profile(&conn, "p-1").unwrap();
        let remaining: i64 = conn
            .query_row("SELECT COUNT(*) FROM entries", [], |r| r.get(0))
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[test]
    fn list_is_oldest_first() {
        let conn = open_memory_database().unwrap();
        let mut later = make_profile("p-2", "Bence");
        later.created_at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        insert_profile(&conn, &later).unwrap();
        insert_profile(&conn, &make_profile("p-1", "Anna")).unwrap();
        let ids: Vec<_> = list_profiles(&conn).unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["p-1", "p-2"]);
    }
}
