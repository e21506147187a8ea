//! Shared application state for the HTTP layer.
//!
//! `CoreState` holds the database location and the last-activity
//! timestamp. Handlers open their own SQLite connection per request, so
//! nothing else is shared between tasks.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use crate::db;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error("Database error: {0}")]
    Database(#[from] db::DatabaseError),
}

pub struct CoreState {
    db_path: PathBuf,
    /// Last request that touched the diary.
    last_activity: Mutex<Instant>,
}

impl CoreState {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            last_activity: Mutex::new(Instant::now()),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a connection to the diary database (migrating if needed).
    pub fn open_db(&self) -> Result<rusqlite::Connection, CoreError> {
        db::open_database(&self.db_path).map_err(CoreError::Database)
    }

    /// Update the last activity timestamp.
    pub fn update_activity(&self) {
        if let Ok(mut last) = self.last_activity.lock() {
            *last = Instant::now();
        }
    }

    /// Seconds since the last recorded activity.
    pub fn idle_secs(&self) -> Result<u64, CoreError> {
        self.last_activity
            .lock()
            .map(|last| last.elapsed().as_secs())
            .map_err(|_| CoreError::LockPoisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_activity_resets_timer() {
        let state = CoreState {
            db_path: PathBuf::from("unused.db"),
            last_activity: Mutex::new(Instant::now() - std::time::Duration::from_secs(120)),
        };
        assert!(state.idle_secs().unwrap() >= 120);
        state.update_activity();
        assert!(state.idle_secs().unwrap() < 120);
    }

    #[test]
    fn open_db_creates_and_migrates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("naplo.db");
        let state = CoreState::new(&path);

        let conn = state.open_db().unwrap();
        assert_eq!(db::get_current_version(&conn), 2);
        assert!(path.exists());
        assert_eq!(state.db_path(), path.as_path());
    }
}
