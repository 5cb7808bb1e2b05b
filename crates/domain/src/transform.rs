// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::cell::CellValue;
use crate::fields::{FieldMappings, MappedField, SheetMapping};
use crate::issue::{ValidationError, ValidationIssue};
use crate::records::{CandidateCompany, CandidateTask, CandidateUser, ProcessedImport};
use crate::sheet::{Row, SheetData};
use crate::types::{TaskPriority, TaskStatus, UserRole};
use crate::validation::{DatePolicy, ResolvedDate, is_valid_email};

/// Category given to tasks whose row does not supply one.
pub const DEFAULT_TASK_CATEGORY: &str = "fiscal";

/// Date policy for task dates: a bad date is dropped, not replaced.
pub const TASK_DATE_POLICY: DatePolicy = DatePolicy::LeaveUnset;

/// Per-row user fields before deduplication.
#[derive(Debug, Default)]
struct UserDraft {
    touched: bool,
    name: Option<String>,
    email: Option<String>,
    role: Option<UserRole>,
}

/// Per-row task fields before id assignment.
#[derive(Debug, Default)]
struct TaskDraft {
    touched: bool,
    title: Option<String>,
    date: Option<String>,
    category: Option<String>,
    priority: Option<TaskPriority>,
    status: Option<TaskStatus>,
    assignee_email: String,
}

/// Transforms decoded sheets into candidate records for the full wizard.
///
/// This is a total function: every problem is recorded in
/// `ProcessedImport::errors` and processing continues. Calling it twice on
/// the same input yields the same output.
///
/// Sheets are visited in order, rows in file order, and within a row the
/// mapped headers in mapping order. A sheet with no mapping entry
/// contributes nothing.
///
/// # Arguments
///
/// * `sheets` - The decoded workbook
/// * `mappings` - Sheet name to header to field assignments
#[must_use]
pub fn transform_workbook(sheets: &[SheetData], mappings: &FieldMappings) -> ProcessedImport {
    let mut processed: ProcessedImport = ProcessedImport::default();

    for sheet in sheets {
        let Some(sheet_mapping) = mappings.get(&sheet.name) else {
            continue;
        };

        for (index, row) in sheet.rows.iter().enumerate() {
            transform_row(&sheet.name, index, row, sheet_mapping, &mut processed);
        }
    }

    link_assignees(&mut processed);

    if processed.company.name.is_none() {
        processed
            .errors
            .insert(0, ValidationError::global(ValidationIssue::MissingCompanyName));
    }

    processed
}

fn transform_row(
    sheet: &str,
    index: usize,
    row: &Row,
    mapping: &SheetMapping,
    processed: &mut ProcessedImport,
) {
    let mut user: UserDraft = UserDraft::default();
    let mut task: TaskDraft = TaskDraft::default();

    for (header, field) in mapping {
        let Some(value) = row.get(header).and_then(CellValue::to_text) else {
            continue;
        };

        route_value(
            sheet,
            index,
            *field,
            value,
            &mut processed.company,
            &mut user,
            &mut task,
            &mut processed.errors,
        );
    }

    collect_user(user, &mut processed.users);
    collect_task(task, &mut processed.tasks);
}

#[allow(clippy::too_many_arguments)]
fn route_value(
    sheet: &str,
    index: usize,
    field: MappedField,
    value: String,
    company: &mut CandidateCompany,
    user: &mut UserDraft,
    task: &mut TaskDraft,
    errors: &mut Vec<ValidationError>,
) {
    user.touched |= field.is_user_field();
    task.touched |= field.is_task_field();

    match field {
        MappedField::Ignore => {}
        MappedField::CompanyName => company.name = Some(value),
        MappedField::CompanyRfc => company.rfc = Some(value),
        MappedField::UserName => user.name = Some(value),
        MappedField::UserEmail => {
            let email: String = value.to_lowercase();
            if is_valid_email(&email) {
                user.email = Some(email);
            } else {
                errors.push(ValidationError::at_row(
                    sheet,
                    index,
                    ValidationIssue::InvalidEmail { email },
                ));
            }
        }
        MappedField::UserRole => match value.parse::<UserRole>() {
            Ok(role) => user.role = Some(role),
            Err(_) => errors.push(ValidationError::at_row(
                sheet,
                index,
                ValidationIssue::InvalidRole {
                    role: value,
                    user: user.name.clone().filter(|name| !name.is_empty()),
                },
            )),
        },
        MappedField::TaskTitle => task.title = Some(value),
        MappedField::TaskDate => {
            let resolved: ResolvedDate = TASK_DATE_POLICY.resolve(&value);
            if resolved.rejected {
                errors.push(ValidationError::at_row(
                    sheet,
                    index,
                    ValidationIssue::InvalidTaskDate {
                        date: value,
                        task: task.title.clone().filter(|title| !title.is_empty()),
                    },
                ));
            } else {
                task.date = resolved.value;
            }
        }
        MappedField::TaskCategory => task.category = Some(value.to_lowercase()),
        // Unknown priorities and statuses fall back to the default silently.
        MappedField::TaskPriority => {
            if let Ok(priority) = value.parse::<TaskPriority>() {
                task.priority = Some(priority);
            }
        }
        MappedField::TaskStatus => {
            if let Ok(status) = value.parse::<TaskStatus>() {
                task.status = Some(status);
            }
        }
        MappedField::TaskAssigneeEmail => task.assignee_email = value.to_lowercase(),
    }
}

fn collect_user(draft: UserDraft, users: &mut Vec<CandidateUser>) {
    if !draft.touched {
        return;
    }
    let Some(email) = draft.email else {
        return;
    };
    if users.iter().any(|user| user.email == email) {
        return;
    }

    users.push(CandidateUser {
        id: format!("u-import-{}", users.len()),
        name: draft.name,
        original_email: email.clone(),
        email,
        role: draft.role.unwrap_or_default(),
    });
}

fn collect_task(draft: TaskDraft, tasks: &mut Vec<CandidateTask>) {
    if !draft.touched {
        return;
    }
    let Some(title) = draft.title.filter(|title| !title.is_empty()) else {
        return;
    };

    tasks.push(CandidateTask {
        id: format!("e-import-{}", tasks.len()),
        title,
        date: draft.date,
        category: draft
            .category
            .filter(|category| !category.is_empty())
            .unwrap_or_else(|| DEFAULT_TASK_CATEGORY.to_string()),
        priority: draft.priority.unwrap_or_default(),
        status: draft.status.unwrap_or_default(),
        assignee_email: draft.assignee_email,
        assignee: String::new(),
    });
}

fn link_assignees(processed: &mut ProcessedImport) {
    for task in &mut processed.tasks {
        let assignee: Option<&CandidateUser> = processed
            .users
            .iter()
            .find(|user| user.original_email == task.assignee_email);

        match assignee {
            Some(user) => task.assignee.clone_from(&user.id),
            None if !task.assignee_email.is_empty() => {
                processed.errors.push(ValidationError::global(
                    ValidationIssue::AssigneeNotFound {
                        email: task.assignee_email.clone(),
                        task: task.title.clone(),
                    },
                ));
            }
            None => {}
        }
    }
}
