// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use obtrack::{Command, ImportSession, SessionSnapshot, apply};
use obtrack_domain::{CellValue, MappedField, SheetData};

pub fn create_test_snapshot() -> SessionSnapshot {
    let commands: Vec<Command> = vec![
        Command::Open,
        Command::SelectFile {
            file: obtrack::FileMeta::new("clients.xlsx", 512),
        },
        Command::DecodeSucceeded {
            sheets: vec![SheetData::new(
                "Company",
                vec![String::from("Name")],
                vec![vec![CellValue::text("Acme SA")]],
            )],
        },
        Command::SetMapping {
            sheet: String::from("Company"),
            header: String::from("Name"),
            field: MappedField::CompanyName,
        },
    ];

    commands
        .into_iter()
        .fold(ImportSession::new(), |session, command| {
            apply(&session, command).unwrap().new_state
        })
        .to_snapshot()
}
