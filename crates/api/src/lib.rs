// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Import controllers for obtrack.
//!
//! This crate sits between an interface and the pure import pipeline. It
//! decodes uploaded spreadsheets, checks the operator's role, drives the
//! session reducers, keeps the wizard's snapshot in a [`SessionStore`] and
//! hands finished imports to a [`CompletionHandler`].
//!
//! [`SessionStore`]: obtrack_persistence::SessionStore

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod completion;
mod decoder;
mod error;
mod obligation_wizard;
mod request_response;
mod wizard;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService};
pub use completion::{
    CompanyRecord, CompletionHandler, DEFAULT_COUNTRY, EventRecord, ImportPayload,
    OBLIGATION_TEMPLATE_FILE, ObligationBatch, UserRecord, build_import_payload,
    obligation_template_csv,
};
pub use decoder::{CSV_SHEET_NAME, SheetDecoder, SpreadsheetDecoder};
pub use error::{ApiError, AuthError, DecodeError, translate_core_error, translate_domain_error};
pub use obligation_wizard::ObligationImporter;
pub use request_response::{
    CompleteImportResponse, FinishObligationImportResponse, ObligationStateResponse,
    OpenObligationImportRequest, SetMappingRequest, SetObligationMappingRequest, SheetSummary,
    TransitionResponse, WizardStateResponse,
};
pub use wizard::{DEFAULT_STORAGE_KEY, ImportWizard};
