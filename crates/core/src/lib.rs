// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

use obtrack_domain::{ObligationImport, ProcessedImport, transform_obligations, transform_workbook};

// Re-export public types and functions
pub use apply::{apply, apply_obligation};
pub use command::{Command, ObligationCommand};
pub use error::CoreError;
pub use state::{
    FileMeta, ImportSession, ObligationSession, ObligationStep, ObligationTransition,
    SessionEvent, SessionSnapshot, TransitionResult, WizardStep,
};

/// Derives the full wizard's processed data from a session.
///
/// Pure: the result depends only on the session's sheets and mappings.
#[must_use]
pub fn process_session(session: &ImportSession) -> ProcessedImport {
    transform_workbook(&session.sheets, &session.mappings)
}

/// Derives the obligation importer's result from a session.
///
/// # Arguments
///
/// * `session` - The obligation session
/// * `today` - Substituted for missing or invalid submission dates
///
/// # Returns
///
/// An empty result if no sheet has been decoded.
#[must_use]
pub fn process_obligation_session(
    session: &ObligationSession,
    today: time::Date,
) -> ObligationImport {
    session.sheet.as_ref().map_or_else(ObligationImport::default, |sheet| {
        transform_obligations(sheet, &session.mapping, today)
    })
}
