// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The obligation importer controller.
//!
//! Imports obligations into one existing company. Its session is never
//! persisted.

use std::sync::Arc;

use obtrack::{
    FileMeta, ObligationCommand, ObligationSession, ObligationStep, ObligationTransition,
    SessionEvent, apply_obligation, process_obligation_session,
};
use obtrack_domain::{ObligationField, ObligationImport, SheetData, ValidationError};
use time::Date;
use tracing::{debug, info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::completion::{CompletionHandler, ObligationBatch};
use crate::decoder::SheetDecoder;
use crate::error::{ApiError, DecodeError};
use crate::request_response::ObligationStateResponse;
use crate::wizard::decode_in_background;

/// Drives the obligation importer for one company at a time.
pub struct ObligationImporter {
    session: ObligationSession,
    /// The company receiving the obligations; set while open.
    company_id: Option<String>,
    decoder: Arc<dyn SheetDecoder>,
}

impl ObligationImporter {
    /// Creates a closed importer.
    #[must_use]
    pub fn new(decoder: Arc<dyn SheetDecoder>) -> Self {
        Self {
            session: ObligationSession::new(),
            company_id: None,
            decoder,
        }
    }

    /// The current session.
    #[must_use]
    pub const fn session(&self) -> &ObligationSession {
        &self.session
    }

    /// The company the open importer targets.
    #[must_use]
    pub fn company_id(&self) -> Option<&str> {
        self.company_id.as_deref()
    }

    /// Applies a command and commits the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the reducer rejects the command.
    pub fn dispatch(&mut self, command: ObligationCommand) -> Result<SessionEvent, ApiError> {
        let name: &'static str = command.name();
        let transition: ObligationTransition =
            apply_obligation(&self.session, command).map_err(|e| {
                warn!(command = name, step = self.session.step as u8, error = %e, "Rejected obligation command");
                ApiError::from(e)
            })?;
        Ok(self.commit(transition))
    }

    fn commit(&mut self, transition: ObligationTransition) -> SessionEvent {
        let ObligationTransition { new_state, event } = transition;
        self.session = new_state;
        if event.closes_session() {
            self.company_id = None;
        }
        debug!(event = %event, step = self.session.step as u8, "Obligation importer transition");
        event
    }

    /// Opens the importer for `company_id`, discarding any import in progress.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor may not edit company information or
    /// `company_id` is blank.
    pub fn open(
        &mut self,
        actor: &AuthenticatedActor,
        company_id: &str,
    ) -> Result<SessionEvent, ApiError> {
        AuthorizationService::authorize_obligation_import(actor)?;
        if company_id.trim().is_empty() {
            return Err(ApiError::InvalidInput {
                field: String::from("company_id"),
                message: String::from("a target company is required"),
            });
        }

        let event: SessionEvent = self.dispatch(ObligationCommand::Open)?;
        self.company_id = Some(company_id.to_string());
        info!(actor = %actor.id, company_id, "Opened obligation importer");
        Ok(event)
    }

    /// Selects a file, decodes it and seeds the mapping from its headers.
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
        self.dispatch(ObligationCommand::SelectFile {
            file: FileMeta::new(file_name, size),
        })?;

        let outcome: Result<Vec<SheetData>, DecodeError> =
            decode_in_background(Arc::clone(&self.decoder), file_name, bytes).await;

        let command: ObligationCommand = match outcome {
            Ok(sheets) => ObligationCommand::DecodeSucceeded { sheets },
            Err(e) => {
                warn!(file_name, error = %e, "Obligation file decode failed");
                ObligationCommand::DecodeFailed {
                    reason: e.to_string(),
                }
            }
        };
        self.dispatch(command)
    }

    /// Overrides the suggested field for one column.
    ///
    /// # Errors
    ///
    /// Returns an error outside the map step or for an unknown column.
    pub fn set_mapping(
        &mut self,
        header: &str,
        field: ObligationField,
    ) -> Result<SessionEvent, ApiError> {
        self.dispatch(ObligationCommand::SetMapping {
            header: header.to_string(),
            field,
        })
    }

    /// Moves from mapping to review.
    ///
    /// # Errors
    ///
    /// Returns an error outside the map step.
    pub fn advance(&mut self) -> Result<SessionEvent, ApiError> {
        self.dispatch(ObligationCommand::Advance)
    }

    /// Moves to the previous step.
    ///
    /// # Errors
    ///
    /// Returns an error from the upload step or when closed.
    pub fn back(&mut self) -> Result<SessionEvent, ApiError> {
        self.dispatch(ObligationCommand::Back)
    }

    /// Abandons the import.
    ///
    /// # Errors
    ///
    /// Returns an error if the importer is not open.
    pub fn cancel(&mut self) -> Result<SessionEvent, ApiError> {
        self.dispatch(ObligationCommand::Cancel)
    }

    /// The obligations and errors the current mapping produces.
    ///
    /// # Arguments
    ///
    /// * `today` - Substituted for missing or invalid submission dates
    #[must_use]
    pub fn review(&self, today: Date) -> ObligationImport {
        process_obligation_session(&self.session, today)
    }

    /// Describes the importer for display.
    ///
    /// # Arguments
    ///
    /// * `today` - Substituted for missing or invalid submission dates
    #[must_use]
    pub fn state_response(&self, today: Date) -> ObligationStateResponse {
        let review: Option<ObligationImport> =
            (self.session.step == ObligationStep::Review).then(|| self.review(today));
        let messages: Vec<String> = review
            .as_ref()
            .map(|r: &ObligationImport| r.errors.iter().map(ValidationError::message).collect())
            .unwrap_or_default();

        ObligationStateResponse {
            step: u8::from(self.session.step),
            company_id: self.company_id.clone(),
            file: self.session.file.clone(),
            decoding: self.session.decoding,
            error: self.session.error.clone(),
            headers: self
                .session
                .sheet
                .as_ref()
                .map(|sheet: &SheetData| sheet.headers.clone())
                .unwrap_or_default(),
            mapping: self.session.mapping.clone(),
            field_options: ObligationField::ALL.iter().map(ToString::to_string).collect(),
            review,
            messages,
        }
    }

    /// Hands the reviewed obligations to `handler` and closes the importer.
    ///
    /// Validation errors are advisory; the corrected obligations are handed
    /// off regardless.
    ///
    /// # Errors
    ///
    /// Returns an error outside the review step or if the handler rejects
    /// the batch.
    pub fn finish(
        &mut self,
        today: Date,
        handler: &mut dyn CompletionHandler,
    ) -> Result<ObligationBatch, ApiError> {
        let transition: ObligationTransition =
            apply_obligation(&self.session, ObligationCommand::Finish).map_err(|e| {
                warn!(step = self.session.step as u8, error = %e, "Rejected obligation finish");
                ApiError::from(e)
            })?;
        let Some(company_id) = self.company_id.clone() else {
            return Err(ApiError::InvalidTransition {
                message: String::from("the obligation importer has no target company"),
            });
        };

        let reviewed: ObligationImport = self.review(today);
        let batch: ObligationBatch = ObligationBatch {
            company_id,
            obligations: reviewed.obligations,
        };
        handler.obligations_imported(batch.clone())?;
        self.commit(transition);

        info!(
            company_id = %batch.company_id,
            obligations = batch.obligations.len(),
            advisory_errors = reviewed.errors.len(),
            "Imported obligations"
        );
        Ok(batch)
    }
}
