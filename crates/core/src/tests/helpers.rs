// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, FileMeta, ImportSession, TransitionResult, apply};
use obtrack_domain::{CellValue, SheetData};

pub fn create_test_file() -> FileMeta {
    FileMeta::new("clients.xlsx", 2048)
}

pub fn create_test_sheets() -> Vec<SheetData> {
    vec![
        SheetData::new(
            "Company",
            vec![String::from("Company Name"), String::from("RFC")],
            vec![vec![CellValue::text("Acme SA"), CellValue::text("ACM010101AAA")]],
        ),
        SheetData::new(
            "Users",
            vec![String::from("Name"), String::from("Email")],
            vec![vec![CellValue::text("Ana"), CellValue::text("ana@x.com")]],
        ),
    ]
}

/// Applies each command in turn, panicking on the first rejection.
pub fn run(session: ImportSession, commands: Vec<Command>) -> ImportSession {
    commands.into_iter().fold(session, |current, command| {
        let result: TransitionResult = apply(&current, command).unwrap();
        result.new_state
    })
}

/// A session on the map step with the test sheets decoded.
pub fn create_mapping_session() -> ImportSession {
    run(
        ImportSession::new(),
        vec![
            Command::Open,
            Command::SelectFile {
                file: create_test_file(),
            },
            Command::DecodeSucceeded {
                sheets: create_test_sheets(),
            },
        ],
    )
}
