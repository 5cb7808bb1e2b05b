// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CellValue, FieldMappings, MappedField, SheetData, SheetMapping};

/// Builds a sheet from string cells; `""` becomes an empty cell.
pub fn text_sheet(name: &str, headers: &[&str], rows: &[&[&str]]) -> SheetData {
    SheetData::new(
        name,
        headers.iter().map(ToString::to_string).collect(),
        rows.iter()
            .map(|row| row.iter().map(|cell| CellValue::text(*cell)).collect())
            .collect(),
    )
}

/// Builds a one-sheet mapping from `(header, field)` pairs in order.
pub fn mapping_for(sheet: &str, pairs: &[(&str, MappedField)]) -> FieldMappings {
    let mapping: SheetMapping = pairs
        .iter()
        .map(|(header, field)| ((*header).to_string(), *field))
        .collect();
    let mut mappings: FieldMappings = FieldMappings::new();
    mappings.insert(sheet.to_string(), mapping);
    mappings
}
