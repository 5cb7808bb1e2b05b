// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::FileMeta;
use obtrack_domain::{MappedField, ObligationField, SheetData};

/// A command represents operator or system intent as data only.
///
/// Commands are the only way to request full wizard session changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Open the wizard on the upload step.
    Open,
    /// A file was picked; decoding starts.
    SelectFile {
        /// The picked file's metadata.
        file: FileMeta,
    },
    /// Decoding finished.
    DecodeSucceeded {
        /// Every sheet of the file, in workbook order.
        sheets: Vec<SheetData>,
    },
    /// Decoding failed.
    DecodeFailed {
        /// Message shown on the upload step.
        reason: String,
    },
    /// Assign one column of one sheet to a field.
    SetMapping {
        sheet: String,
        header: String,
        field: MappedField,
    },
    /// Move to the next step.
    Advance {
        /// Blocking validation errors in the current processed data.
        blocking_errors: usize,
    },
    /// Move to the previous step.
    Back,
    /// Abandon the import.
    Cancel,
    /// Finish the import from the summary step.
    Complete {
        /// Blocking validation errors in the current processed data.
        blocking_errors: usize,
    },
}

impl Command {
    /// Returns the command's name for errors and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::SelectFile { .. } => "SelectFile",
            Self::DecodeSucceeded { .. } => "DecodeSucceeded",
            Self::DecodeFailed { .. } => "DecodeFailed",
            Self::SetMapping { .. } => "SetMapping",
            Self::Advance { .. } => "Advance",
            Self::Back => "Back",
            Self::Cancel => "Cancel",
            Self::Complete { .. } => "Complete",
        }
    }
}

/// Commands for the obligation importer.
#[derive(Debug, Clone, PartialEq)]
pub enum ObligationCommand {
    Open,
    SelectFile { file: FileMeta },
    /// Decoding finished; only the first sheet is kept.
    DecodeSucceeded { sheets: Vec<SheetData> },
    DecodeFailed { reason: String },
    /// Override the suggested field for one column.
    SetMapping { header: String, field: ObligationField },
    Advance,
    Back,
    Cancel,
    /// Hand the reviewed obligations off and close.
    Finish,
}

impl ObligationCommand {
    /// Returns the command's name for errors and logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::SelectFile { .. } => "SelectFile",
            Self::DecodeSucceeded { .. } => "DecodeSucceeded",
            Self::DecodeFailed { .. } => "DecodeFailed",
            Self::SetMapping { .. } => "SetMapping",
            Self::Advance => "Advance",
            Self::Back => "Back",
            Self::Cancel => "Cancel",
            Self::Finish => "Finish",
        }
    }
}
