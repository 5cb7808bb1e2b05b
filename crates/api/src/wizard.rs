// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The full import wizard controller.
//!
//! Owns the single [`ImportSession`], feeds operator actions through the
//! core reducer, mirrors every change to a [`SessionStore`] while the wizard
//! is open and memoizes the processed data between mapping edits.

use std::sync::Arc;

use obtrack::{
    Command, FileMeta, ImportSession, SessionEvent, SessionSnapshot, TransitionResult, WizardStep,
    apply, process_session,
};
use obtrack_domain::{
    FieldMappings, MappedField, ProcessedImport, SheetData, ValidationError,
    effective_workbook_mapping,
};
use obtrack_persistence::{PersistenceError, SessionStore};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::completion::{CompletionHandler, ImportPayload, build_import_payload};
use crate::decoder::SheetDecoder;
use crate::error::{ApiError, DecodeError};
use crate::request_response::{SheetSummary, WizardStateResponse};

/// Storage key the wizard's snapshot lives under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "importWizardState";

/// Drives the full import wizard.
pub struct ImportWizard {
    session: ImportSession,
    store: Box<dyn SessionStore>,
    storage_key: String,
    decoder: Arc<dyn SheetDecoder>,
    /// Processed data for the current sheets and mappings.
    processed: Option<ProcessedImport>,
}

impl ImportWizard {
    /// Creates a wizard, resuming any session persisted under `storage_key`.
    ///
    /// # Arguments
    ///
    /// * `store` - Where snapshots are kept
    /// * `storage_key` - The key snapshots are stored under
    /// * `decoder` - Turns uploaded files into sheets
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn restore(
        mut store: Box<dyn SessionStore>,
        storage_key: &str,
        decoder: Arc<dyn SheetDecoder>,
    ) -> Result<Self, ApiError> {
        let session: ImportSession = store
            .load(storage_key)?
            .map_or_else(ImportSession::new, SessionSnapshot::into_session);

        if session.show {
            info!(
                storage_key,
                step = %session.step,
                sheets = session.sheets.len(),
                "Resumed import wizard session"
            );
        }

        Ok(Self {
            session,
            store,
            storage_key: storage_key.to_string(),
            decoder,
            processed: None,
        })
    }

    /// The current session.
    #[must_use]
    pub const fn session(&self) -> &ImportSession {
        &self.session
    }

    /// Every sheet's mapping, with unmapped headers shown as ignored.
    #[must_use]
    pub fn mapping_view(&self) -> FieldMappings {
        effective_workbook_mapping(&self.session.sheets, &self.session.mappings)
    }

    /// Returns the processed data for the current sheets and mappings.
    ///
    /// Recomputed only after the sheets or mappings change.
    pub fn processed(&mut self) -> &ProcessedImport {
        let session: &ImportSession = &self.session;
        self.processed.get_or_insert_with(|| process_session(session))
    }

    /// Describes the wizard for display.
    ///
    /// Processed data is included from the validate step on.
    pub fn state_response(&mut self) -> WizardStateResponse {
        let processed: Option<ProcessedImport> =
            if matches!(self.session.step, WizardStep::Validate | WizardStep::Summary) {
                Some(self.processed().clone())
            } else {
                None
            };
        let messages: Vec<String> = processed
            .as_ref()
            .map(|p: &ProcessedImport| p.errors.iter().map(ValidationError::message).collect())
            .unwrap_or_default();
        let blocking_errors: usize = processed
            .as_ref()
            .map_or(0, ProcessedImport::blocking_errors);

        WizardStateResponse {
            step: u8::from(self.session.step),
            show: self.session.show,
            file: self.session.file.clone(),
            decoding: self.session.decoding,
            error: self.session.error.clone(),
            sheets: self.session.sheets.iter().map(SheetSummary::from).collect(),
            mappings: self.mapping_view(),
            field_options: MappedField::ALL.iter().map(ToString::to_string).collect(),
            processed,
            messages,
            blocking_errors,
        }
    }

    /// Applies a command and commits the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the reducer rejects the command.
    pub fn dispatch(&mut self, command: Command) -> Result<SessionEvent, ApiError> {
        let name: &'static str = command.name();
        match apply(&self.session, command) {
            Ok(result) => Ok(self.commit(result)),
            Err(e) => {
                warn!(command = name, step = %self.session.step, error = %e, "Rejected wizard command");
                Err(ApiError::from(e))
            }
        }
    }

    /// Opens the wizard on the upload step.
    ///
    /// An import already in progress is discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor may not create companies.
    pub fn open(&mut self, actor: &AuthenticatedActor) -> Result<SessionEvent, ApiError> {
        AuthorizationService::authorize_full_import(actor)?;
        let event: SessionEvent = self.dispatch(Command::Open)?;
        info!(actor = %actor.id, "Opened import wizard");
        Ok(event)
    }

    /// Selects a file and decodes it off the async runtime.
    ///
    /// A decode failure is not an error: it is recorded on the session,
    /// which stays on the upload step.
    ///
    /// # Arguments
    ///
    /// * `file_name` - The uploaded file's name
    /// * `bytes` - The file's contents
    ///
    /// # Returns
    ///
    /// The event of the decode's outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be selected in the current step.
    pub async fn select_file(
        &mut self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<SessionEvent, ApiError> {
        let size: u64 = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        self.dispatch(Command::SelectFile {
            file: FileMeta::new(file_name, size),
        })?;

        let outcome: Result<Vec<SheetData>, DecodeError> =
            decode_in_background(Arc::clone(&self.decoder), file_name, bytes).await;

        let command: Command = match outcome {
            Ok(sheets) => Command::DecodeSucceeded { sheets },
            Err(e) => {
                warn!(file_name, error = %e, "Spreadsheet decode failed");
                Command::DecodeFailed {
                    reason: e.to_string(),
                }
            }
        };
        self.dispatch(command)
    }

    /// Maps one column of one sheet.
    ///
    /// # Errors
    ///
    /// Returns an error outside the map step or for an unknown column.
    pub fn set_mapping(
        &mut self,
        sheet: &str,
        header: &str,
        field: MappedField,
    ) -> Result<SessionEvent, ApiError> {
        self.dispatch(Command::SetMapping {
            sheet: sheet.to_string(),
            header: header.to_string(),
            field,
        })
    }

    /// Moves to the next step.
    ///
    /// # Errors
    ///
    /// Returns an error if the current step cannot be left forwards, or if
    /// leaving validation is blocked.
    pub fn advance(&mut self) -> Result<SessionEvent, ApiError> {
        let blocking_errors: usize = self.blocking_errors();
        self.dispatch(Command::Advance { blocking_errors })
    }

    /// Moves to the previous step.
    ///
    /// # Errors
    ///
    /// Returns an error from the upload step or when closed.
    pub fn back(&mut self) -> Result<SessionEvent, ApiError> {
        self.dispatch(Command::Back)
    }

    /// Abandons the import and clears the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the wizard is not open.
    pub fn cancel(&mut self) -> Result<SessionEvent, ApiError> {
        let event: SessionEvent = self.dispatch(Command::Cancel)?;
        info!("Cancelled import wizard");
        Ok(event)
    }

    /// Completes the import and hands the payload to `handler`.
    ///
    /// Nothing changes unless the handler accepts the payload.
    ///
    /// # Arguments
    ///
    /// * `now` - Timestamp for the company id
    /// * `handler` - Receives the payload
    ///
    /// # Errors
    ///
    /// Returns an error if the wizard is not on the summary step, blocking
    /// errors remain, or the handler rejects the payload.
    pub fn complete(
        &mut self,
        now: OffsetDateTime,
        handler: &mut dyn CompletionHandler,
    ) -> Result<ImportPayload, ApiError> {
        let blocking_errors: usize = self.blocking_errors();
        let result: TransitionResult =
            apply(&self.session, Command::Complete { blocking_errors }).map_err(|e| {
                warn!(step = %self.session.step, error = %e, "Rejected wizard completion");
                ApiError::from(e)
            })?;

        let payload: ImportPayload = build_import_payload(self.processed(), now)?;
        handler.import_completed(payload.clone())?;
        self.commit(result);

        info!(
            company_id = %payload.company.id,
            users = payload.users.len(),
            events = payload.events.len(),
            "Completed import"
        );
        Ok(payload)
    }

    fn blocking_errors(&mut self) -> usize {
        if self.session.step == WizardStep::Closed {
            return 0;
        }
        self.processed().blocking_errors()
    }

    fn commit(&mut self, result: TransitionResult) -> SessionEvent {
        let TransitionResult { new_state, event } = result;

        if changes_processed_input(&event) {
            self.processed = None;
        }
        self.session = new_state;
        debug!(event = %event, step = %self.session.step, "Wizard transition");

        self.persist();
        event
    }

    /// Mirrors the session to the store: saved while open, removed once closed.
    fn persist(&mut self) {
        let outcome: Result<(), PersistenceError> = if self.session.show {
            self.store.save(&self.storage_key, &self.session.to_snapshot())
        } else {
            self.store.clear(&self.storage_key)
        };

        // The in-memory session stays authoritative when the store fails.
        if let Err(e) = outcome {
            warn!(storage_key = %self.storage_key, error = %e, "Failed to persist wizard session");
        }
    }
}

const fn changes_processed_input(event: &SessionEvent) -> bool {
    matches!(
        event,
        SessionEvent::Opened
            | SessionEvent::FileSelected { .. }
            | SessionEvent::Decoded { .. }
            | SessionEvent::MappingChanged { .. }
            | SessionEvent::Cancelled
            | SessionEvent::Completed
    )
}

/// Runs a decode on the blocking pool.
pub(crate) async fn decode_in_background(
    decoder: Arc<dyn SheetDecoder>,
    file_name: &str,
    bytes: Vec<u8>,
) -> Result<Vec<SheetData>, DecodeError> {
    let name: String = file_name.to_string();
    tokio::task::spawn_blocking(move || decoder.decode(&name, &bytes))
        .await
        .map_err(|e| DecodeError::Interrupted {
            reason: e.to_string(),
        })?
}
