// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::diesel_schema::import_sessions;
use diesel::prelude::*;

/// One persisted session snapshot.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = import_sessions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SessionRow {
    pub storage_key: String,
    /// The snapshot serialized as JSON.
    pub snapshot_json: String,
    /// RFC 3339 timestamp of the last write.
    pub updated_at: String,
}
