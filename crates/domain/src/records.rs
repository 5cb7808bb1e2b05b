// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::issue::{ValidationError, count_blocking};
use crate::types::{
    Frequency, ObligationStatus, Program, TaskPriority, TaskStatus, UserRole,
};
use serde::{Deserialize, Serialize};

/// Company attributes collected from mapped columns.
///
/// Each field keeps the last value seen across all sheets and rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateCompany {
    pub name: Option<String>,
    pub rfc: Option<String>,
}

/// A user collected from the import, deduplicated by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateUser {
    /// Batch-local identifier (`u-import-<n>`).
    pub id: String,
    pub name: Option<String>,
    /// Lower-cased address.
    pub email: String,
    pub role: UserRole,
    /// Key used to cross-link task assignees.
    pub original_email: String,
}

/// A task collected from the import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTask {
    /// Batch-local identifier (`e-import-<n>`).
    pub id: String,
    pub title: String,
    /// `YYYY-MM-DD`, or unset when missing or invalid.
    pub date: Option<String>,
    /// Lower-cased category.
    pub category: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    /// Lower-cased assignee address as it appeared in the sheet.
    pub assignee_email: String,
    /// Id of the matching imported user, or empty if none matched.
    pub assignee: String,
}

/// Result of transforming a workbook with the full wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedImport {
    pub company: CandidateCompany,
    pub users: Vec<CandidateUser>,
    pub tasks: Vec<CandidateTask>,
    pub errors: Vec<ValidationError>,
}

impl ProcessedImport {
    /// Number of errors that prevent completion.
    #[must_use]
    pub fn blocking_errors(&self) -> usize {
        count_blocking(&self.errors)
    }
}

/// A compliance obligation imported into an existing company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceObligation {
    pub program: Program,
    pub obligation_type: String,
    /// `YYYY-MM-DD`.
    pub submission_date: String,
    pub status: ObligationStatus,
    pub frequency: Frequency,
}

/// Result of transforming an obligation sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObligationImport {
    pub obligations: Vec<ComplianceObligation>,
    pub errors: Vec<ValidationError>,
}
