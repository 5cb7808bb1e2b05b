// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::sync::{Arc, Mutex};

use obtrack::SessionSnapshot;
use obtrack_domain::ActorRole;
use obtrack_persistence::{InMemorySessionStore, PersistenceError, SessionStore};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

use crate::{
    ApiError, AuthenticatedActor, CompletionHandler, DEFAULT_STORAGE_KEY, ImportPayload,
    ImportWizard, ObligationBatch, ObligationImporter, SpreadsheetDecoder,
};

pub fn create_test_actor(role: ActorRole) -> AuthenticatedActor {
    AuthenticatedActor::new(format!("{role}-123"), role)
}

pub fn create_test_admin() -> AuthenticatedActor {
    create_test_actor(ActorRole::Admin)
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-01-05 12:00 UTC)
}

pub const fn test_today() -> Date {
    date!(2026 - 01 - 05)
}

/// A store that outlives the wizard using it, so tests can inspect it and
/// restore a second wizard from it.
#[derive(Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<InMemorySessionStore>>,
}

impl SharedStore {
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.inner.lock().unwrap().load(DEFAULT_STORAGE_KEY).unwrap()
    }
}

impl SessionStore for SharedStore {
    fn load(&mut self, key: &str) -> Result<Option<SessionSnapshot>, PersistenceError> {
        self.inner.lock().unwrap().load(key)
    }

    fn save(&mut self, key: &str, snapshot: &SessionSnapshot) -> Result<(), PersistenceError> {
        self.inner.lock().unwrap().save(key, snapshot)
    }

    fn clear(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.inner.lock().unwrap().clear(key)
    }
}

pub fn create_test_wizard(store: &SharedStore) -> ImportWizard {
    ImportWizard::restore(
        Box::new(store.clone()),
        DEFAULT_STORAGE_KEY,
        Arc::new(SpreadsheetDecoder),
    )
    .unwrap()
}

pub fn create_test_importer() -> ObligationImporter {
    ObligationImporter::new(Arc::new(SpreadsheetDecoder))
}

/// One sheet carrying company, user and task columns.
pub fn company_csv() -> Vec<u8> {
    b"Empresa,RFC,Nombre,Correo,Rol,Tarea,Fecha,Responsable\n\
      Acme,ACM010101AAA,Ana,ANA@acme.mx,cliente_admin,Declaracion anual,2026-03-31,ana@acme.mx\n\
      ,,Luis,luis@acme.mx,jefe,Pago mensual,31/03/2026,nadie@acme.mx\n"
        .to_vec()
}

/// A sheet with users and tasks but no company column.
pub fn nameless_csv() -> Vec<u8> {
    b"Correo,Tarea\nana@acme.mx,Declaracion anual\n".to_vec()
}

pub fn obligations_csv() -> Vec<u8> {
    b"Programa,Tipo de obligacion,Fecha limite,Estado,Frecuencia\n\
      IMMEX,Reporte anual,2026-05-31,compliant,annual\n\
      SECTOR,Inventario,31/05/2026,pendiente,quincenal\n\
      PROSEC,,2026-06-30,compliant,monthly\n"
        .to_vec()
}

/// Records what it receives; optionally rejects everything.
#[derive(Default)]
pub struct RecordingHandler {
    pub payloads: Vec<ImportPayload>,
    pub batches: Vec<ObligationBatch>,
    pub reject: bool,
}

impl CompletionHandler for RecordingHandler {
    fn import_completed(&mut self, payload: ImportPayload) -> Result<(), ApiError> {
        if self.reject {
            return Err(ApiError::Internal {
                message: String::from("store unavailable"),
            });
        }
        self.payloads.push(payload);
        Ok(())
    }

    fn obligations_imported(&mut self, batch: ObligationBatch) -> Result<(), ApiError> {
        if self.reject {
            return Err(ApiError::ResourceNotFound {
                resource_type: String::from("Company"),
                message: batch.company_id,
            });
        }
        self.batches.push(batch);
        Ok(())
    }
}
