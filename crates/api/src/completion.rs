// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! What a finished import hands to the rest of the application.

use crate::error::ApiError;
use obtrack_domain::{
    CandidateTask, CandidateUser, ComplianceObligation, Frequency, ObligationStatus,
    ProcessedImport, Program, TaskPriority, TaskStatus, UserRole,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Country assigned to every imported company.
pub const DEFAULT_COUNTRY: &str = "MX";

/// File name offered for the obligation template download.
pub const OBLIGATION_TEMPLATE_FILE: &str = "obligations_template.csv";

/// The company created by a full import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// `c-import-<unix millis>`.
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rfc: Option<String>,
    pub country: String,
}

/// A user created by a full import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub role: UserRole,
}

impl From<&CandidateUser> for UserRecord {
    fn from(user: &CandidateUser) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// A calendar event created from an imported task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    pub date: Option<String>,
    pub category: String,
    pub priority: TaskPriority,
    /// Id of the assigned user, empty when unassigned.
    pub assignee: String,
    pub status: TaskStatus,
}

impl From<&CandidateTask> for EventRecord {
    fn from(task: &CandidateTask) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            date: task.date.clone(),
            category: task.category.clone(),
            priority: task.priority,
            assignee: task.assignee.clone(),
            status: task.status,
        }
    }
}

/// The single structure emitted when a full import completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportPayload {
    pub company: CompanyRecord,
    pub users: Vec<UserRecord>,
    pub events: Vec<EventRecord>,
}

/// Obligations imported into an existing company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObligationBatch {
    pub company_id: String,
    pub obligations: Vec<ComplianceObligation>,
}

/// Receives finished imports.
pub trait CompletionHandler: Send {
    /// Applies a completed full import.
    ///
    /// # Errors
    ///
    /// Returns an error if the receiving store rejects the payload.
    fn import_completed(&mut self, payload: ImportPayload) -> Result<(), ApiError>;

    /// Appends imported obligations to an existing company.
    ///
    /// # Errors
    ///
    /// Returns an error if the company does not exist.
    fn obligations_imported(&mut self, batch: ObligationBatch) -> Result<(), ApiError>;
}

/// Builds the completion payload from processed data.
///
/// # Arguments
///
/// * `processed` - The wizard's processed data
/// * `now` - Source of the company id's timestamp
///
/// # Errors
///
/// Returns an error if no company name was collected.
pub fn build_import_payload(
    processed: &ProcessedImport,
    now: OffsetDateTime,
) -> Result<ImportPayload, ApiError> {
    let Some(name) = processed.company.name.clone() else {
        return Err(ApiError::InvalidInput {
            field: String::from("company_name"),
            message: String::from("a company name is required to complete the import"),
        });
    };

    let millis: i128 = now.unix_timestamp_nanos() / 1_000_000;

    Ok(ImportPayload {
        company: CompanyRecord {
            id: format!("c-import-{millis}"),
            name,
            rfc: processed.company.rfc.clone(),
            country: DEFAULT_COUNTRY.to_string(),
        },
        users: processed.users.iter().map(UserRecord::from).collect(),
        events: processed.tasks.iter().map(EventRecord::from).collect(),
    })
}

/// Returns the downloadable obligation template as CSV bytes.
///
/// The headers are the ones the obligation importer recognises and the
/// example row is valid as-is.
///
/// # Errors
///
/// Returns an error if the CSV writer fails.
pub fn obligation_template_csv() -> Result<Vec<u8>, ApiError> {
    let mut writer: csv::Writer<Vec<u8>> = csv::Writer::from_writer(Vec::new());

    let example: [&str; 5] = [
        Program::Immex.as_str(),
        "Annual Report",
        "2024-12-31",
        ObligationStatus::Compliant.as_str(),
        Frequency::Annual.as_str(),
    ];

    let internal = |e: csv::Error| ApiError::Internal {
        message: e.to_string(),
    };
    writer
        .write_record(["Program", "Type", "Date", "Status", "Frequency"])
        .map_err(internal)?;
    writer.write_record(example).map_err(internal)?;

    writer.into_inner().map_err(|e| ApiError::Internal {
        message: e.to_string(),
    })
}
