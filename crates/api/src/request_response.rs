// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use obtrack::FileMeta;
use obtrack_domain::{
    FieldMappings, ObligationImport, ObligationMapping, ProcessedImport, SheetData,
};
use serde::{Deserialize, Serialize};

use crate::completion::ImportPayload;

/// API request to map one column of one sheet in the full wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetMappingRequest {
    /// The sheet holding the column.
    pub sheet: String,
    /// The column header.
    pub header: String,
    /// The field's wire spelling (e.g. `user_email`).
    pub field: String,
}

/// API request to override one column's field in the obligation importer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetObligationMappingRequest {
    /// The column header.
    pub header: String,
    /// The field's wire spelling (e.g. `submissionDate`).
    pub field: String,
}

/// API request to open the obligation importer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenObligationImportRequest {
    /// The existing company receiving the obligations.
    pub company_id: String,
}

/// A decoded sheet without its rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSummary {
    pub name: String,
    pub headers: Vec<String>,
    pub row_count: usize,
}

impl From<&SheetData> for SheetSummary {
    fn from(sheet: &SheetData) -> Self {
        Self {
            name: sheet.name.clone(),
            headers: sheet.headers.clone(),
            row_count: sheet.rows.len(),
        }
    }
}

/// API response after any wizard or importer transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionResponse {
    /// The step after the transition.
    pub step: u8,
    /// What happened.
    pub event: String,
    /// The session's decode error, if any.
    pub error: Option<String>,
}

/// API response describing the full wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardStateResponse {
    pub step: u8,
    pub show: bool,
    pub file: Option<FileMeta>,
    pub decoding: bool,
    pub error: Option<String>,
    pub sheets: Vec<SheetSummary>,
    /// Every header of every sheet, unmapped ones shown as `ignore`.
    pub mappings: FieldMappings,
    /// The selectable fields in display order.
    pub field_options: Vec<String>,
    /// Present from the validate step on.
    pub processed: Option<ProcessedImport>,
    /// Rendered validation messages, present with `processed`.
    pub messages: Vec<String>,
    pub blocking_errors: usize,
}

/// API response describing the obligation importer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObligationStateResponse {
    pub step: u8,
    pub company_id: Option<String>,
    pub file: Option<FileMeta>,
    pub decoding: bool,
    pub error: Option<String>,
    pub headers: Vec<String>,
    pub mapping: ObligationMapping,
    pub field_options: Vec<String>,
    /// Present on the review step.
    pub review: Option<ObligationImport>,
    pub messages: Vec<String>,
}

/// API response for a completed full import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompleteImportResponse {
    pub payload: ImportPayload,
    pub message: String,
}

/// API response for finished obligation imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishObligationImportResponse {
    pub company_id: String,
    pub imported: usize,
    /// Advisory errors found during review.
    pub advisory_errors: usize,
    pub message: String,
}
