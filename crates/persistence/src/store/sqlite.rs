// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::SessionStore;
use crate::backend;
use crate::data_models::SessionRow;
use crate::diesel_schema::import_sessions;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::SqliteConnection;
use obtrack::SessionSnapshot;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, so tests
/// never share a database.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Session store backed by a `SQLite` table.
pub struct SqliteSessionStore {
    conn: SqliteConnection,
}

impl SqliteSessionStore {
    /// Creates a store with an isolated in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:obtrack_sessions_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;

        Ok(Self { conn })
    }

    /// Creates a store with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;

        Ok(Self { conn })
    }
}

impl SessionStore for SqliteSessionStore {
    fn load(&mut self, key: &str) -> Result<Option<SessionSnapshot>, PersistenceError> {
        let row: Option<SessionRow> = import_sessions::table
            .filter(import_sessions::storage_key.eq(key))
            .select(SessionRow::as_select())
            .first(&mut self.conn)
            .optional()?;

        debug!(key, found = row.is_some(), "Loaded session snapshot");

        row.map(|row| serde_json::from_str::<SessionSnapshot>(&row.snapshot_json))
            .transpose()
            .map_err(Into::into)
    }

    fn save(&mut self, key: &str, snapshot: &SessionSnapshot) -> Result<(), PersistenceError> {
        let updated_at: String = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
        let row: SessionRow = SessionRow {
            storage_key: key.to_string(),
            snapshot_json: serde_json::to_string(snapshot)?,
            updated_at,
        };

        diesel::replace_into(import_sessions::table)
            .values(&row)
            .execute(&mut self.conn)?;

        debug!(key, step = u8::from(snapshot.step), "Saved session snapshot");
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), PersistenceError> {
        let removed: usize =
            diesel::delete(import_sessions::table.filter(import_sessions::storage_key.eq(key)))
                .execute(&mut self.conn)?;

        debug!(key, removed, "Cleared session snapshot");
        Ok(())
    }
}
