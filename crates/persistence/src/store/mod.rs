// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod memory;
mod sqlite;

pub use memory::InMemorySessionStore;
pub use sqlite::SqliteSessionStore;

use crate::error::PersistenceError;
use obtrack::SessionSnapshot;

/// Durable storage for the wizard's session snapshot.
///
/// Snapshots are keyed by a fixed storage key so a restarted driver can
/// find the in-progress import. Implementations must treat `save` as an
/// overwrite and `clear` of a missing key as a no-op.
pub trait SessionStore: Send {
    /// Loads the snapshot stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or the stored snapshot
    /// cannot be deserialized.
    fn load(&mut self, key: &str) -> Result<Option<SessionSnapshot>, PersistenceError>;

    /// Stores `snapshot` under `key`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be serialized or written.
    fn save(&mut self, key: &str, snapshot: &SessionSnapshot) -> Result<(), PersistenceError>;

    /// Removes the snapshot stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn clear(&mut self, key: &str) -> Result<(), PersistenceError>;
}
