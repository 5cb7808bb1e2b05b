// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::cell::CellValue;
use crate::fields::{ObligationField, ObligationMapping};
use crate::issue::{ValidationError, ValidationIssue};
use crate::records::{ComplianceObligation, ObligationImport};
use crate::sheet::{Row, SheetData};
use crate::types::{Frequency, ObligationStatus, Program};
use crate::validation::{DatePolicy, ResolvedDate};
use std::str::FromStr;
use time::Date;

#[derive(Debug, Default)]
struct ObligationDraft {
    program: Option<String>,
    obligation_type: Option<String>,
    submission_date: Option<String>,
    status: Option<String>,
    frequency: Option<String>,
}

/// Transforms the obligation importer's sheet into obligations.
///
/// Invalid values are corrected in place and reported: a bad or missing
/// date becomes `today`, a bad status becomes `compliant`, unknown
/// programs and frequencies fall back to their defaults. A row without an
/// obligation type is reported and not emitted.
///
/// # Arguments
///
/// * `sheet` - The first sheet of the uploaded file
/// * `mapping` - Header to obligation field assignments
/// * `today` - The date substituted for bad submission dates
#[must_use]
pub fn transform_obligations(
    sheet: &SheetData,
    mapping: &ObligationMapping,
    today: Date,
) -> ObligationImport {
    let policy: DatePolicy = DatePolicy::DefaultToToday { today };
    let mut result: ObligationImport = ObligationImport::default();

    for (index, row) in sheet.rows.iter().enumerate() {
        let draft: ObligationDraft = draft_row(row, mapping);
        let mut report = |issue: ValidationIssue| {
            result
                .errors
                .push(ValidationError::at_row(&sheet.name, index, issue));
        };

        let obligation_type: Option<String> =
            draft.obligation_type.filter(|value| !value.is_empty());
        if obligation_type.is_none() {
            report(ValidationIssue::MissingObligationType);
        }

        let submission_date: ResolvedDate = match &draft.submission_date {
            Some(raw) => {
                let resolved: ResolvedDate = policy.resolve(raw);
                if resolved.rejected {
                    report(ValidationIssue::InvalidSubmissionDate { date: raw.clone() });
                }
                resolved
            }
            None => {
                report(ValidationIssue::MissingSubmissionDate);
                policy.resolve("")
            }
        };

        let status: ObligationStatus = parse_or_default(draft.status, |status| {
            report(ValidationIssue::InvalidObligationStatus { status });
        });
        let program: Program = parse_or_default(draft.program, |program| {
            report(ValidationIssue::UnknownProgram { program });
        });
        let frequency: Frequency = parse_or_default(draft.frequency, |frequency| {
            report(ValidationIssue::UnknownFrequency { frequency });
        });

        let (Some(obligation_type), Some(submission_date)) =
            (obligation_type, submission_date.value)
        else {
            continue;
        };

        result.obligations.push(ComplianceObligation {
            program,
            obligation_type,
            submission_date,
            status,
            frequency,
        });
    }

    result
}

fn draft_row(row: &Row, mapping: &ObligationMapping) -> ObligationDraft {
    let mut draft: ObligationDraft = ObligationDraft::default();

    for (header, field) in mapping {
        let Some(value) = row.get(header).and_then(CellValue::to_text) else {
            continue;
        };

        let slot: &mut Option<String> = match field {
            ObligationField::Ignore => continue,
            ObligationField::Program => &mut draft.program,
            ObligationField::ObligationType => &mut draft.obligation_type,
            ObligationField::SubmissionDate => &mut draft.submission_date,
            ObligationField::Status => &mut draft.status,
            ObligationField::Frequency => &mut draft.frequency,
        };
        *slot = Some(value);
    }

    draft
}

/// Parses an optional value, falling back to the default and invoking
/// `on_invalid` with the rejected text when it does not parse.
fn parse_or_default<T, F>(raw: Option<String>, on_invalid: F) -> T
where
    T: FromStr + Default,
    F: FnOnce(String),
{
    let Some(raw) = raw else {
        return T::default();
    };

    raw.parse::<T>().unwrap_or_else(|_| {
        on_invalid(raw);
        T::default()
    })
}
