// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory company directory receiving finished imports.

use indexmap::IndexMap;
use obtrack_api::{
    ApiError, CompanyRecord, CompletionHandler, EventRecord, ImportPayload, ObligationBatch,
    UserRecord,
};
use obtrack_domain::ComplianceObligation;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Everything known about one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyEntry {
    pub company: CompanyRecord,
    pub users: Vec<UserRecord>,
    pub events: Vec<EventRecord>,
    pub obligations: Vec<ComplianceObligation>,
}

/// Companies keyed by id, in the order they were added.
#[derive(Debug, Default)]
pub struct CompanyDirectory {
    companies: IndexMap<String, CompanyEntry>,
}

impl CompanyDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every company in insertion order.
    pub fn companies(&self) -> impl Iterator<Item = &CompanyEntry> {
        self.companies.values()
    }

    #[must_use]
    pub fn get(&self, company_id: &str) -> Option<&CompanyEntry> {
        self.companies.get(company_id)
    }
}

impl CompletionHandler for CompanyDirectory {
    fn import_completed(&mut self, payload: ImportPayload) -> Result<(), ApiError> {
        let ImportPayload {
            company,
            users,
            events,
        } = payload;

        if self.companies.contains_key(&company.id) {
            return Err(ApiError::InvalidInput {
                field: String::from("company_id"),
                message: format!("company '{}' already exists", company.id),
            });
        }

        info!(
            company_id = %company.id,
            users = users.len(),
            events = events.len(),
            "Added imported company"
        );
        self.companies.insert(
            company.id.clone(),
            CompanyEntry {
                company,
                users,
                events,
                obligations: Vec::new(),
            },
        );
        Ok(())
    }

    fn obligations_imported(&mut self, batch: ObligationBatch) -> Result<(), ApiError> {
        let Some(entry) = self.companies.get_mut(&batch.company_id) else {
            return Err(ApiError::ResourceNotFound {
                resource_type: String::from("Company"),
                message: format!("no company with id '{}'", batch.company_id),
            });
        };

        info!(
            company_id = %batch.company_id,
            obligations = batch.obligations.len(),
            "Appended imported obligations"
        );
        entry.obligations.extend(batch.obligations);
        Ok(())
    }
}
