// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::text_sheet;
use crate::{
    ComplianceObligation, Frequency, ObligationImport, ObligationMapping, ObligationStatus,
    Program, SheetData, ValidationIssue, suggest_obligation_mapping, transform_obligations,
};
use time::Date;
use time::macros::date;

const TODAY: Date = date!(2026 - 10 - 18);

fn template_sheet(rows: &[&[&str]]) -> (SheetData, ObligationMapping) {
    let sheet: SheetData = text_sheet(
        "Obligations",
        &["Program", "Type", "Date", "Status", "Frequency"],
        rows,
    );
    let mapping: ObligationMapping = suggest_obligation_mapping(&sheet.headers);
    (sheet, mapping)
}

#[test]
fn test_template_row_imports_cleanly() {
    let (sheet, mapping) =
        template_sheet(&[&["IMMEX", "Annual Report", "2024-12-31", "compliant", "annual"]]);

    let result: ObligationImport = transform_obligations(&sheet, &mapping, TODAY);

    assert!(result.errors.is_empty());
    assert_eq!(
        result.obligations,
        vec![ComplianceObligation {
            program: Program::Immex,
            obligation_type: String::from("Annual Report"),
            submission_date: String::from("2024-12-31"),
            status: ObligationStatus::Compliant,
            frequency: Frequency::Annual,
        }]
    );
}

#[test]
fn test_wrong_date_format_defaults_to_today() {
    let (sheet, mapping) =
        template_sheet(&[&["PROSEC", "Monthly Report", "31/12/2024", "", "monthly"]]);

    let result: ObligationImport = transform_obligations(&sheet, &mapping, TODAY);

    assert_eq!(result.obligations.len(), 1);
    assert_eq!(result.obligations[0].submission_date, "2026-10-18");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].row, 2);
    assert_eq!(
        result.errors[0].issue,
        ValidationIssue::InvalidSubmissionDate {
            date: String::from("31/12/2024"),
        }
    );
}

#[test]
fn test_missing_date_defaults_to_today() {
    let (sheet, mapping) = template_sheet(&[&["", "Inventory", "", "", ""]]);

    let result: ObligationImport = transform_obligations(&sheet, &mapping, TODAY);

    assert_eq!(result.obligations[0].submission_date, "2026-10-18");
    assert_eq!(result.obligations[0].program, Program::General);
    assert_eq!(result.obligations[0].frequency, Frequency::Other);
    assert_eq!(result.errors[0].issue, ValidationIssue::MissingSubmissionDate);
}

#[test]
fn test_invalid_status_is_corrected_in_place() {
    let (sheet, mapping) =
        template_sheet(&[&["IMMEX", "Annex 24", "2024-01-31", "late", "monthly"]]);

    let result: ObligationImport = transform_obligations(&sheet, &mapping, TODAY);

    assert_eq!(result.obligations[0].status, ObligationStatus::Compliant);
    assert_eq!(
        result.errors[0].issue,
        ValidationIssue::InvalidObligationStatus {
            status: String::from("late"),
        }
    );
}

#[test]
fn test_missing_type_skips_row_but_not_later_rows() {
    let (sheet, mapping) = template_sheet(&[
        &["IMMEX", "", "2024-01-31", "compliant", "monthly"],
        &["CERTIVA", "Renewal", "2024-02-28", "non-compliant", "annual"],
    ]);

    let result: ObligationImport = transform_obligations(&sheet, &mapping, TODAY);

    assert_eq!(result.obligations.len(), 1);
    assert_eq!(result.obligations[0].program, Program::Certiva);
    assert_eq!(result.obligations[0].status, ObligationStatus::NonCompliant);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].issue, ValidationIssue::MissingObligationType);
    assert_eq!(result.errors[0].sheet, "Obligations");
    assert_eq!(result.errors[0].row, 2);
}

#[test]
fn test_whitespace_type_counts_as_present() {
    let (sheet, mapping) =
        template_sheet(&[&["PROSEC", "  ", "2024-03-31", "compliant", "weekly"]]);

    let result: ObligationImport = transform_obligations(&sheet, &mapping, TODAY);

    assert!(result.errors.is_empty());
    assert_eq!(result.obligations.len(), 1);
    assert_eq!(result.obligations[0].obligation_type, "  ");
}

#[test]
fn test_unknown_program_and_frequency_fall_back() {
    let (sheet, mapping) =
        template_sheet(&[&["Maquila", "Report", "2024-03-31", "compliant", "daily"]]);

    let result: ObligationImport = transform_obligations(&sheet, &mapping, TODAY);

    assert_eq!(result.obligations[0].program, Program::General);
    assert_eq!(result.obligations[0].frequency, Frequency::Other);
    assert_eq!(result.errors.len(), 2);
    assert!(result.errors.iter().all(|error| !error.is_blocking()));
}

#[test]
fn test_obligation_serializes_camel_case() {
    let (sheet, mapping) =
        template_sheet(&[&["IMMEX", "Annual Report", "2024-12-31", "compliant", "annual"]]);
    let result: ObligationImport = transform_obligations(&sheet, &mapping, TODAY);

    let json: serde_json::Value = serde_json::to_value(&result.obligations[0]).unwrap();
    assert_eq!(json["obligationType"], "Annual Report");
    assert_eq!(json["submissionDate"], "2024-12-31");
    assert_eq!(json["program"], "IMMEX");
}
