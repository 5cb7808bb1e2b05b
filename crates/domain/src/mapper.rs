// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::fields::{FieldMappings, MappedField, ObligationField, ObligationMapping, SheetMapping};
use crate::sheet::SheetData;

/// Header keyword rules for the obligation importer.
///
/// Evaluated top to bottom against the lower-cased header; the first rule
/// with a keyword contained in the header wins. Spanish keywords sit beside
/// the English ones.
pub const OBLIGATION_HEADER_RULES: &[(&[&str], ObligationField)] = &[
    (&["program"], ObligationField::Program),
    (
        &["type", "tipo", "name", "nombre"],
        ObligationField::ObligationType,
    ),
    (&["date", "fecha"], ObligationField::SubmissionDate),
    (&["status", "estado"], ObligationField::Status),
    (&["frequency", "frecuencia"], ObligationField::Frequency),
];

/// Suggests a field for a single header using [`OBLIGATION_HEADER_RULES`].
///
/// # Returns
///
/// The first matching field, or `ObligationField::Ignore`.
#[must_use]
pub fn suggest_obligation_field(header: &str) -> ObligationField {
    let lowered: String = header.to_lowercase();
    OBLIGATION_HEADER_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map_or(ObligationField::Ignore, |(_, field)| *field)
}

/// Seeds the obligation importer's mapping from header text.
///
/// The result is only a starting point; the operator may override any
/// header afterwards and overrides are never re-evaluated.
///
/// # Arguments
///
/// * `headers` - The sheet's headers in column order
#[must_use]
pub fn suggest_obligation_mapping(headers: &[String]) -> ObligationMapping {
    headers
        .iter()
        .map(|header| (header.clone(), suggest_obligation_field(header)))
        .collect()
}

/// Seeds the full wizard's mapping: every header of every sheet is ignored.
///
/// The full wizard deliberately applies no heuristic; the operator maps
/// every column by hand.
#[must_use]
pub fn default_workbook_mapping(sheets: &[SheetData]) -> FieldMappings {
    sheets
        .iter()
        .map(|sheet| {
            let mapping: SheetMapping = sheet
                .headers
                .iter()
                .map(|header| (header.clone(), MappedField::Ignore))
                .collect();
            (sheet.name.clone(), mapping)
        })
        .collect()
}

/// Returns the mapping the map step displays: every header of every sheet,
/// with the operator's explicit choices overlaid on the all-ignore default.
///
/// The session itself stores only explicit choices, in the order they were
/// made, since that order drives the transformer.
///
/// # Arguments
///
/// * `sheets` - The decoded workbook
/// * `explicit` - The operator's choices so far
#[must_use]
pub fn effective_workbook_mapping(sheets: &[SheetData], explicit: &FieldMappings) -> FieldMappings {
    let mut effective: FieldMappings = default_workbook_mapping(sheets);

    for (sheet, mapping) in &mut effective {
        if let Some(chosen) = explicit.get(sheet) {
            for (header, field) in mapping.iter_mut() {
                if let Some(choice) = chosen.get(header) {
                    *field = *choice;
                }
            }
        }
    }

    effective
}
