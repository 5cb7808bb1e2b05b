// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{mapping_for, text_sheet};
use crate::{
    CandidateTask, CellValue, FieldMappings, GLOBAL_SHEET, MappedField, ProcessedImport,
    SheetData, TaskPriority, TaskStatus, UserRole, ValidationIssue, transform_workbook,
};
use time::macros::date;

fn company_sheet() -> (SheetData, FieldMappings) {
    let sheet: SheetData = text_sheet(
        "Company",
        &["Company", "RFC"],
        &[&["Acme SA", "ACM010101AAA"]],
    );
    let mappings: FieldMappings = mapping_for(
        "Company",
        &[
            ("Company", MappedField::CompanyName),
            ("RFC", MappedField::CompanyRfc),
        ],
    );
    (sheet, mappings)
}

#[test]
fn test_duplicate_emails_keep_first_user() {
    let sheet: SheetData = text_sheet(
        "Sheet1",
        &["Name", "Email", "Role"],
        &[
            &["Ana", "ana@x.com", "cliente_admin"],
            &["Ana2", "ANA@X.COM", "cliente_miembro"],
        ],
    );
    let mappings: FieldMappings = mapping_for(
        "Sheet1",
        &[
            ("Name", MappedField::UserName),
            ("Email", MappedField::UserEmail),
            ("Role", MappedField::UserRole),
        ],
    );

    let processed: ProcessedImport = transform_workbook(&[sheet], &mappings);

    assert_eq!(processed.users.len(), 1);
    let user = &processed.users[0];
    assert_eq!(user.id, "u-import-0");
    assert_eq!(user.name.as_deref(), Some("Ana"));
    assert_eq!(user.email, "ana@x.com");
    assert_eq!(user.role, UserRole::ClienteAdmin);
}

#[test]
fn test_missing_company_name_is_first_error_and_blocking() {
    let sheet: SheetData = text_sheet("Users", &["Email"], &[&["not-an-email"]]);
    let mappings: FieldMappings = mapping_for("Users", &[("Email", MappedField::UserEmail)]);

    let processed: ProcessedImport = transform_workbook(&[sheet], &mappings);

    assert_eq!(processed.errors.len(), 2);
    assert_eq!(processed.errors[0].issue, ValidationIssue::MissingCompanyName);
    assert_eq!(processed.errors[0].sheet, GLOBAL_SHEET);
    assert_eq!(processed.errors[0].row, 0);
    assert!(processed.errors[0].is_blocking());
    assert_eq!(processed.blocking_errors(), 1);
    assert!(matches!(
        processed.errors[1].issue,
        ValidationIssue::InvalidEmail { .. }
    ));
}

#[test]
fn test_company_fields_last_write_wins() {
    let sheet: SheetData = text_sheet(
        "Company",
        &["Company"],
        &[&["First SA"], &["Second SA"]],
    );
    let mappings: FieldMappings = mapping_for("Company", &[("Company", MappedField::CompanyName)]);

    let processed: ProcessedImport = transform_workbook(&[sheet], &mappings);

    assert_eq!(processed.company.name.as_deref(), Some("Second SA"));
    assert_eq!(processed.company.rfc, None);
    assert!(processed.errors.is_empty());
}

#[test]
fn test_invalid_task_date_is_left_unset_and_task_kept() {
    let sheet: SheetData = text_sheet(
        "Tasks",
        &["Title", "Date"],
        &[&["File annual return", "2024-13-40"]],
    );
    let mappings: FieldMappings = mapping_for(
        "Tasks",
        &[
            ("Title", MappedField::TaskTitle),
            ("Date", MappedField::TaskDate),
        ],
    );

    let processed: ProcessedImport = transform_workbook(&[sheet], &mappings);

    assert_eq!(processed.tasks.len(), 1);
    assert_eq!(processed.tasks[0].date, None);
    let date_errors: Vec<_> = processed
        .errors
        .iter()
        .filter(|error| matches!(error.issue, ValidationIssue::InvalidTaskDate { .. }))
        .collect();
    assert_eq!(date_errors.len(), 1);
    assert_eq!(date_errors[0].sheet, "Tasks");
    assert_eq!(date_errors[0].row, 2);
    assert!(date_errors[0].message().contains("File annual return"));
}

#[test]
fn test_task_defaults_and_silent_fallbacks() {
    let sheet: SheetData = text_sheet(
        "Tasks",
        &["Title", "Priority", "Status"],
        &[&["Pay taxes", "Urgent", "Blocked"]],
    );
    let mappings: FieldMappings = mapping_for(
        "Tasks",
        &[
            ("Title", MappedField::TaskTitle),
            ("Priority", MappedField::TaskPriority),
            ("Status", MappedField::TaskStatus),
        ],
    );

    let processed: ProcessedImport = transform_workbook(&[sheet], &mappings);
    let task: &CandidateTask = &processed.tasks[0];

    assert_eq!(task.id, "e-import-0");
    assert_eq!(task.priority, TaskPriority::Medium);
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.category, "fiscal");
    // Only the missing company name is reported.
    assert_eq!(processed.errors.len(), 1);
}

#[test]
fn test_rows_without_title_or_email_produce_no_candidates() {
    let sheet: SheetData = text_sheet(
        "Mixed",
        &["Name", "Category", "Company"],
        &[&["Ana", "Fiscal", "Acme"]],
    );
    let mappings: FieldMappings = mapping_for(
        "Mixed",
        &[
            ("Name", MappedField::UserName),
            ("Category", MappedField::TaskCategory),
            ("Company", MappedField::CompanyName),
        ],
    );

    let processed: ProcessedImport = transform_workbook(&[sheet], &mappings);

    assert!(processed.users.is_empty());
    assert!(processed.tasks.is_empty());
    assert_eq!(processed.company.name.as_deref(), Some("Acme"));
}

#[test]
fn test_assignees_link_to_imported_users() {
    let (company, company_mapping) = company_sheet();
    let people: SheetData = text_sheet(
        "People",
        &["Email", "Task", "Owner", "Category"],
        &[
            &["ana@x.com", "", "", ""],
            &["", "Monthly filing", "ANA@x.com", "IMMEX"],
            &["", "Audit prep", "ghost@x.com", ""],
        ],
    );
    let mut mappings: FieldMappings = company_mapping;
    mappings.extend(mapping_for(
        "People",
        &[
            ("Email", MappedField::UserEmail),
            ("Task", MappedField::TaskTitle),
            ("Owner", MappedField::TaskAssigneeEmail),
            ("Category", MappedField::TaskCategory),
        ],
    ));

    let processed: ProcessedImport = transform_workbook(&[company, people], &mappings);

    assert_eq!(processed.tasks.len(), 2);
    assert_eq!(processed.tasks[0].assignee, "u-import-0");
    assert_eq!(processed.tasks[0].category, "immex");
    assert_eq!(processed.tasks[1].assignee, "");
    assert_eq!(processed.tasks[1].assignee_email, "ghost@x.com");

    assert_eq!(processed.errors.len(), 1);
    assert_eq!(
        processed.errors[0].issue,
        ValidationIssue::AssigneeNotFound {
            email: String::from("ghost@x.com"),
            task: String::from("Audit prep"),
        }
    );
    assert_eq!(processed.errors[0].row, 0);
}

#[test]
fn test_invalid_role_names_the_user_and_defaults() {
    let (company, mut mappings) = company_sheet();
    let users: SheetData = text_sheet(
        "Users",
        &["Name", "Email", "Role"],
        &[&["Luis", "luis@x.com", "admin"], &["", "eva@x.com", "boss"]],
    );
    mappings.extend(mapping_for(
        "Users",
        &[
            ("Name", MappedField::UserName),
            ("Email", MappedField::UserEmail),
            ("Role", MappedField::UserRole),
        ],
    ));

    let processed: ProcessedImport = transform_workbook(&[company, users], &mappings);

    assert_eq!(processed.users.len(), 2);
    assert!(processed.users.iter().all(|user| user.role == UserRole::ClienteMiembro));
    assert_eq!(processed.errors.len(), 2);
    assert!(processed.errors[0].message().contains("Luis"));
    assert_eq!(processed.errors[0].row, 2);
    assert!(processed.errors[1].message().contains(GLOBAL_SHEET));
    assert_eq!(processed.errors[1].row, 3);
}

#[test]
fn test_unmapped_sheets_and_ignored_headers_contribute_nothing() {
    let (company, mappings) = company_sheet();
    let stray: SheetData = text_sheet("Stray", &["Email"], &[&["ana@x.com"]]);
    let mut with_ignore: FieldMappings = mappings.clone();
    with_ignore.extend(mapping_for("Other", &[("Email", MappedField::UserEmail)]));

    let processed: ProcessedImport = transform_workbook(&[company, stray], &with_ignore);

    assert!(processed.users.is_empty());
    assert!(processed.errors.is_empty());
}

#[test]
fn test_numeric_and_date_cells_are_rendered_as_text() {
    let sheet: SheetData = SheetData::new(
        "Tasks",
        vec![String::from("Title"), String::from("Due")],
        vec![vec![
            CellValue::Number(2024.0),
            CellValue::Date(date!(2024 - 06 - 30)),
        ]],
    );
    let mappings: FieldMappings = mapping_for(
        "Tasks",
        &[
            ("Title", MappedField::TaskTitle),
            ("Due", MappedField::TaskDate),
        ],
    );

    let processed: ProcessedImport = transform_workbook(&[sheet], &mappings);

    assert_eq!(processed.tasks[0].title, "2024");
    assert_eq!(processed.tasks[0].date.as_deref(), Some("2024-06-30"));
}

#[test]
fn test_transform_is_deterministic() {
    let (company, mut mappings) = company_sheet();
    let tasks: SheetData = text_sheet(
        "Tasks",
        &["Title", "Owner"],
        &[&["One", "nobody@x.com"], &["Two", ""]],
    );
    mappings.extend(mapping_for(
        "Tasks",
        &[
            ("Title", MappedField::TaskTitle),
            ("Owner", MappedField::TaskAssigneeEmail),
        ],
    ));
    let sheets: Vec<SheetData> = vec![company, tasks];

    assert_eq!(
        transform_workbook(&sheets, &mappings),
        transform_workbook(&sheets, &mappings)
    );
}
