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

mod cell;
mod error;
mod fields;
mod issue;
mod mapper;
mod obligations;
mod records;
mod sheet;
mod transform;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use cell::CellValue;
pub use error::DomainError;
pub use fields::{FieldMappings, MappedField, ObligationField, ObligationMapping, SheetMapping};
pub use issue::{GLOBAL_SHEET, Severity, ValidationError, ValidationIssue, count_blocking};
pub use mapper::{
    OBLIGATION_HEADER_RULES, default_workbook_mapping, effective_workbook_mapping,
    suggest_obligation_field, suggest_obligation_mapping,
};
pub use obligations::transform_obligations;
pub use records::{
    CandidateCompany, CandidateTask, CandidateUser, ComplianceObligation, ObligationImport,
    ProcessedImport,
};
pub use sheet::{Row, SheetData};
pub use transform::{DEFAULT_TASK_CATEGORY, TASK_DATE_POLICY, transform_workbook};
pub use types::{
    ActorRole, Frequency, ObligationStatus, Program, TaskPriority, TaskStatus, UserRole,
};
pub use validation::{DatePolicy, ResolvedDate, is_valid_email, parse_iso_date};
