// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::SessionStore;
use crate::error::PersistenceError;
use obtrack::SessionSnapshot;
use std::collections::HashMap;

/// Session store that lives only as long as the process.
///
/// Snapshots are kept as JSON so that this store exercises the same
/// serialization path as the `SQLite` one.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: HashMap<String, String>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&mut self, key: &str) -> Result<Option<SessionSnapshot>, PersistenceError> {
        self.entries
            .get(key)
            .map(|json| serde_json::from_str::<SessionSnapshot>(json))
            .transpose()
            .map_err(Into::into)
    }

    fn save(&mut self, key: &str, snapshot: &SessionSnapshot) -> Result<(), PersistenceError> {
        let json: String = serde_json::to_string(snapshot)?;
        self.entries.insert(key.to_string(), json);
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.entries.remove(key);
        Ok(())
    }
}
