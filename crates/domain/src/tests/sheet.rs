// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::text_sheet;
use crate::{CellValue, SheetData};

#[test]
fn test_duplicate_headers_get_suffixes() {
    let sheet: SheetData = text_sheet("S", &["Email", "Email", "", "Email", ""], &[]);
    assert_eq!(
        sheet.headers,
        vec!["Email", "Email_1", "__EMPTY", "Email_2", "__EMPTY_1"]
    );
}

#[test]
fn test_empty_cells_are_left_out_of_rows() {
    let sheet: SheetData = text_sheet("S", &["Name", "Email"], &[&["Ana", ""]]);
    assert_eq!(sheet.rows.len(), 1);
    assert!(sheet.rows[0].get("Email").is_none());
    assert_eq!(sheet.cell(0, "Name"), Some(&CellValue::text("Ana")));
}

#[test]
fn test_blank_rows_are_skipped() {
    let sheet: SheetData = text_sheet("S", &["Name"], &[&[""], &["Ana"], &[""]]);
    assert_eq!(sheet.rows.len(), 1);
}

#[test]
fn test_cells_beyond_headers_are_dropped() {
    let sheet: SheetData = text_sheet("S", &["Name"], &[&["Ana", "extra"]]);
    assert_eq!(sheet.rows[0].len(), 1);
}
