// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::cell::CellValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One decoded row: header name to cell value, in header order.
pub type Row = IndexMap<String, CellValue>;

/// One tab of an uploaded spreadsheet.
///
/// Headers are unique within a sheet. A sheet is produced once per decoded
/// file and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetData {
    /// The tab name.
    pub name: String,
    /// Column headers in column order.
    pub headers: Vec<String>,
    /// Data rows in file order (the header row is not included).
    pub rows: Vec<Row>,
}

impl SheetData {
    /// Builds a sheet from a raw header row and positional data rows.
    ///
    /// Duplicate headers are renamed `X_1`, `X_2`, ... in column order.
    /// Blank headers become `__EMPTY`, `__EMPTY_1`, ... Cells beyond the
    /// header count are dropped; missing trailing cells are left out of the row.
    ///
    /// # Arguments
    ///
    /// * `name` - The tab name
    /// * `raw_headers` - The first row of the tab
    /// * `raw_rows` - The remaining rows of the tab
    #[must_use]
    pub fn new(name: &str, raw_headers: Vec<String>, raw_rows: Vec<Vec<CellValue>>) -> Self {
        let headers: Vec<String> = dedupe_headers(raw_headers);

        let rows: Vec<Row> = raw_rows
            .into_iter()
            .filter(|cells| cells.iter().any(|cell| !cell.is_empty()))
            .map(|cells| {
                headers
                    .iter()
                    .zip(cells)
                    .filter(|(_, cell)| !cell.is_empty())
                    .map(|(header, cell)| (header.clone(), cell))
                    .collect()
            })
            .collect();

        Self {
            name: name.to_string(),
            headers,
            rows,
        }
    }

    /// Returns the cell for `header` in row `index`, if present and non-empty.
    #[must_use]
    pub fn cell(&self, index: usize, header: &str) -> Option<&CellValue> {
        self.rows
            .get(index)
            .and_then(|row| row.get(header))
            .filter(|cell| !cell.is_empty())
    }
}

fn dedupe_headers(raw_headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut headers: Vec<String> = Vec::with_capacity(raw_headers.len());

    for raw in raw_headers {
        let base: String = if raw.trim().is_empty() {
            String::from("__EMPTY")
        } else {
            raw
        };

        let mut candidate: String = base.clone();
        let mut suffix: usize = 0;
        while seen.contains(&candidate) {
            suffix += 1;
            candidate = format!("{base}_{suffix}");
        }

        seen.insert(candidate.clone());
        headers.push(candidate);
    }

    headers
}
