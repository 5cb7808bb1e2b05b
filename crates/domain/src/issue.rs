// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sheet name used for problems that are not tied to a single row.
pub const GLOBAL_SHEET: &str = "N/A";

/// Whether a validation problem stops an import from completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Reported to the operator; the import may proceed.
    Advisory,
    /// The import cannot complete until this is fixed.
    Blocking,
}

/// A problem found while transforming rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ValidationIssue {
    /// A user email without an address shape.
    InvalidEmail { email: String },
    /// A user role outside the importable set.
    InvalidRole {
        role: String,
        /// The user's name, if the row supplied one before the role.
        user: Option<String>,
    },
    /// A task date that is not `YYYY-MM-DD`. The date is left unset.
    InvalidTaskDate {
        date: String,
        /// The task title, if the row supplied one before the date.
        task: Option<String>,
    },
    /// A task assignee that matches none of the imported users.
    AssigneeNotFound { email: String, task: String },
    /// No mapped column supplied a company name.
    MissingCompanyName,
    /// An obligation row without a type. The row is skipped.
    MissingObligationType,
    /// An obligation row without a date. Today's date is used.
    MissingSubmissionDate,
    /// An obligation date that is not `YYYY-MM-DD`. Today's date is used.
    InvalidSubmissionDate { date: String },
    /// An obligation status outside the allowed set. `compliant` is used.
    InvalidObligationStatus { status: String },
    /// An unknown program name. `General` is used.
    UnknownProgram { program: String },
    /// An unknown frequency. `other` is used.
    UnknownFrequency { frequency: String },
}

impl ValidationIssue {
    /// Returns how this issue affects completion.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::MissingCompanyName => Severity::Blocking,
            _ => Severity::Advisory,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail { email } => write!(f, "Invalid email format: {email}"),
            Self::InvalidRole { role, user } => write!(
                f,
                "Invalid role '{role}' for user {}. Must be 'cliente_admin' or 'cliente_miembro'",
                user.as_deref().unwrap_or(GLOBAL_SHEET)
            ),
            Self::InvalidTaskDate { date, task } => write!(
                f,
                "Invalid date '{date}' for task {}. Use YYYY-MM-DD",
                task.as_deref().unwrap_or(GLOBAL_SHEET)
            ),
            Self::AssigneeNotFound { email, task } => write!(
                f,
                "Assignee '{email}' for task '{task}' does not match any imported user"
            ),
            Self::MissingCompanyName => {
                write!(f, "No company name found. Map a column to the company name")
            }
            Self::MissingObligationType => write!(f, "Obligation type is required"),
            Self::MissingSubmissionDate => {
                write!(f, "Submission date is missing; today's date was used")
            }
            Self::InvalidSubmissionDate { date } => write!(
                f,
                "Invalid date '{date}'. Use YYYY-MM-DD; today's date was used"
            ),
            Self::InvalidObligationStatus { status } => write!(
                f,
                "Invalid status '{status}'. Must be 'compliant' or 'non-compliant'; 'compliant' was used"
            ),
            Self::UnknownProgram { program } => {
                write!(f, "Unknown program '{program}'; 'General' was used")
            }
            Self::UnknownFrequency { frequency } => {
                write!(f, "Unknown frequency '{frequency}'; 'other' was used")
            }
        }
    }
}

/// One recorded validation problem.
///
/// `row` is the spreadsheet row number the operator sees: data row index
/// plus two (one for the header row, one for 1-based numbering). Problems
/// not tied to a row use [`GLOBAL_SHEET`] and row 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub sheet: String,
    pub row: usize,
    pub issue: ValidationIssue,
}

impl ValidationError {
    /// Creates an error for data row `index` of `sheet`.
    #[must_use]
    pub fn at_row(sheet: &str, index: usize, issue: ValidationIssue) -> Self {
        Self {
            sheet: sheet.to_string(),
            row: index + 2,
            issue,
        }
    }

    /// Creates an error not tied to any row.
    #[must_use]
    pub fn global(issue: ValidationIssue) -> Self {
        Self {
            sheet: GLOBAL_SHEET.to_string(),
            row: 0,
            issue,
        }
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> String {
        self.issue.to_string()
    }

    /// Returns true if this error blocks completion.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        matches!(self.issue.severity(), Severity::Blocking)
    }
}

/// Counts the blocking errors in `errors`.
#[must_use]
pub fn count_blocking(errors: &[ValidationError]) -> usize {
    errors.iter().filter(|error| error.is_blocking()).count()
}
