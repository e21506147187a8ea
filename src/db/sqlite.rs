use std::path::Path;

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

use super::DatabaseError;

/// Ordered schema migrations. Version 2 converts the single-profile layout
/// into the multi-profile one.
pub const MIGRATIONS: &[(i64, &str)] = &[
    (1, include_str!("../../resources/migrations/001_initial.sql")),
    (2, include_str!("../../resources/migrations/002_profiles.sql")),
];

/// Open a SQLite connection to the given path and run migrations
pub fn open_database(path: &Path) -> Result<Connection, DatabaseError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::MigrationFailed {
                version: 0,
                reason: format!("cannot create {}: {e}", parent.display()),
            })?;
        }
    }
    let conn = Connection::open(path)?;
    configure_pragmas(&conn)?;
    register_functions(&conn)?;
    run_migrations(&conn)?;
    Ok(conn)
}

/// Open an in-memory database (for testing)
pub fn open_memory_database() -> Result<Connection, DatabaseError> {
    let conn = Connection::open_in_memory()?;
    configure_pragmas(&conn)?;
    register_functions(&conn)?;
    run_migrations(&conn)?;
    Ok(conn)
}

fn configure_pragmas(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "PRAGMA journal_mode=DELETE;
         PRAGMA foreign_keys=ON;"
    )?;
    Ok(())
}

/// `fold_case(text)`: Unicode lower-casing. SQLite's own `lower()` and
/// `LIKE` only fold ASCII, which misses accented Hungarian letters.
fn register_functions(conn: &Connection) -> Result<(), DatabaseError> {
    conn.create_scalar_function(
        "fold_case",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )?;
    Ok(())
}

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> Result<(), DatabaseError> {
    let current_version = get_current_version(conn);

    for &(version, sql) in MIGRATIONS {
        if version > current_version {
            tracing::info!("Running migration v{version}");
            conn.execute_batch(&format!("BEGIN;\n{sql}\nCOMMIT;"))
                .map_err(|e| {
                    let _ = conn.execute_batch("ROLLBACK;");
                    DatabaseError::MigrationFailed {
                        version,
                        reason: e.to_string(),
                    }
                })?;
        }
    }

    Ok(())
}

/// Get the current schema version (0 if no schema exists yet)
pub fn get_current_version(conn: &Connection) -> i64 {
    conn.query_row(
        "SELECT MAX(version) FROM schema_version",
        [],
        |row| row.get::<_, i64>(0),
    )
    .unwrap_or(0)
}

/// Count tables in the database (for verification)
pub fn count_tables(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::params;

    #[test]
    fn database_initializes_all_tables() {
        let conn = open_memory_database().unwrap();
        // schema_version, symptoms, entries, resource_cache, profiles
        let count = count_tables(&conn).unwrap();
        assert_eq!(count, 5);
    }

    #[test]
    fn schema_version_is_current() {
        let conn = open_memory_database().unwrap();
        assert_eq!(get_current_version(&conn), 2);
    }

    #[test]
    fn migration_idempotent() {
        let conn = open_memory_database().unwrap();
        // Running migrations again is a no-op
        let result = run_migrations(&conn);
        assert!(result.is_ok());
    }

    #[test]
    fn foreign_keys_enabled() {
        let conn = open_memory_database().unwrap();
        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn fresh_database_has_no_default_profile() {
        let conn = open_memory_database().unwrap();
        let profiles: i64 = conn
            .query_row("SELECT COUNT(*) FROM profiles", [], |row| row.get(0))
            .unwrap();
        assert_eq!(profiles, 0);
    }

    #[test]
    fn single_profile_rows_move_into_default_profile() {
        let conn = Connection::open_in_memory().unwrap();
        configure_pragmas(&conn).unwrap();
        conn.execute_batch(MIGRATIONS[0].1).unwrap();

        conn.execute(
            "INSERT INTO symptoms (id, name, emoji, parent_only, created_at, updated_at)
             VALUES ('s-1', 'Fejfájás', '🤕', 0, '2024-05-01T10:00:00.000Z', '2024-05-01T10:00:00.000Z')",
            [],
        )
        .unwrap();
        for (id, intensity) in [("e-1", 4), ("e-2", 7)] {
            conn.execute(
                "INSERT INTO entries (id, symptom_id, date, timestamp, intensity, context,
                 created_at, updated_at)
                 VALUES (?1, 's-1', '2024-05-02', '2024-05-02T08:00:00.000Z', ?2,
                 '{\"mood\":\"fáradt\"}', '2024-05-02T08:00:00.000Z', '2024-05-02T08:00:00.000Z')",
                params![id, intensity],
            )
            .unwrap();
        }

        run_migrations(&conn).unwrap();

        let owners: Vec<String> = conn
            .prepare("SELECT DISTINCT profile_id FROM entries")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(owners, vec!["default".to_string()]);

        let symptom_owner: String = conn
            .query_row("SELECT profile_id FROM symptoms WHERE id = 's-1'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(symptom_owner, "default");

        let context: String = conn
            .query_row("SELECT context FROM entries WHERE id = 'e-1'", [], |row| row.get(0))
            .unwrap();
        assert!(context.contains("fáradt"));

        let ts: chrono::DateTime<chrono::Utc> = conn
            .query_row("SELECT timestamp FROM entries WHERE id = 'e-1'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-05-02T08:00:00+00:00");
    }

    #[test]
    fn file_database_creates_parent_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("naplo.db");
        let conn = open_database(&path).unwrap();
        assert!(path.exists());
        assert_eq!(count_tables(&conn).unwrap(), 5);
    }
}
