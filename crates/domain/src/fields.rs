// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The application attribute a spreadsheet column feeds in the full wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappedField {
    /// The column is not imported.
    #[default]
    Ignore,
    CompanyName,
    CompanyRfc,
    UserName,
    UserEmail,
    UserRole,
    TaskTitle,
    TaskDate,
    TaskCategory,
    TaskPriority,
    TaskAssigneeEmail,
    TaskStatus,
}

impl MappedField {
    /// Every selectable option, in the order the map step lists them.
    pub const ALL: [Self; 12] = [
        Self::Ignore,
        Self::CompanyName,
        Self::CompanyRfc,
        Self::UserName,
        Self::UserEmail,
        Self::UserRole,
        Self::TaskTitle,
        Self::TaskDate,
        Self::TaskCategory,
        Self::TaskPriority,
        Self::TaskAssigneeEmail,
        Self::TaskStatus,
    ];

    /// Returns the wire spelling of this field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::CompanyName => "company_name",
            Self::CompanyRfc => "company_rfc",
            Self::UserName => "user_name",
            Self::UserEmail => "user_email",
            Self::UserRole => "user_role",
            Self::TaskTitle => "task_title",
            Self::TaskDate => "task_date",
            Self::TaskCategory => "task_category",
            Self::TaskPriority => "task_priority",
            Self::TaskAssigneeEmail => "task_assignee_email",
            Self::TaskStatus => "task_status",
        }
    }

    /// Returns true for fields that describe the imported company.
    #[must_use]
    pub const fn is_company_field(self) -> bool {
        matches!(self, Self::CompanyName | Self::CompanyRfc)
    }

    /// Returns true for fields that describe an imported user.
    #[must_use]
    pub const fn is_user_field(self) -> bool {
        matches!(self, Self::UserName | Self::UserEmail | Self::UserRole)
    }

    /// Returns true for fields that describe an imported task.
    #[must_use]
    pub const fn is_task_field(self) -> bool {
        matches!(
            self,
            Self::TaskTitle
                | Self::TaskDate
                | Self::TaskCategory
                | Self::TaskPriority
                | Self::TaskAssigneeEmail
                | Self::TaskStatus
        )
    }
}

impl fmt::Display for MappedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MappedField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| DomainError::UnknownField(s.to_string()))
    }
}

/// The obligation attribute a spreadsheet column feeds in the obligation importer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObligationField {
    #[default]
    Ignore,
    Program,
    ObligationType,
    SubmissionDate,
    Status,
    Frequency,
}

impl ObligationField {
    /// Every selectable option, in the order the map step lists them.
    pub const ALL: [Self; 6] = [
        Self::Ignore,
        Self::Program,
        Self::ObligationType,
        Self::SubmissionDate,
        Self::Status,
        Self::Frequency,
    ];

    /// Returns the wire spelling of this field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ignore => "ignore",
            Self::Program => "program",
            Self::ObligationType => "obligationType",
            Self::SubmissionDate => "submissionDate",
            Self::Status => "status",
            Self::Frequency => "frequency",
        }
    }
}

impl fmt::Display for ObligationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObligationField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| DomainError::UnknownField(s.to_string()))
    }
}

/// Header to field assignments for one sheet, in insertion order.
pub type SheetMapping = IndexMap<String, MappedField>;

/// Sheet name to per-sheet mapping for the full wizard.
pub type FieldMappings = IndexMap<String, SheetMapping>;

/// Header to field assignments for the obligation importer's single sheet.
pub type ObligationMapping = IndexMap<String, ObligationField>;
