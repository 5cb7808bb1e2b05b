// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during session transitions.
///
/// A rejected command never changes the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The command is not valid in the session's current step.
    InvalidTransition {
        /// The rejected command.
        command: &'static str,
        /// The step the session was in.
        step: u8,
    },
    /// Advancing or completing is blocked by validation errors.
    AdvanceBlocked {
        /// How many blocking errors remain.
        blocking_errors: usize,
    },
    /// The decoded workbook has no sheets to map.
    NoSheets,
    /// A decode result arrived with no decode in flight.
    NoDecodeInFlight,
    /// A mapping names a sheet or header that was not decoded.
    UnknownColumn {
        /// The sheet name.
        sheet: String,
        /// The header.
        header: String,
    },
    /// A persisted step number outside the known steps.
    InvalidStep(u8),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTransition { command, step } => {
                write!(f, "Command {command} is not allowed at step {step}")
            }
            Self::AdvanceBlocked { blocking_errors } => write!(
                f,
                "Cannot continue: {blocking_errors} blocking validation error(s) remain"
            ),
            Self::NoSheets => write!(f, "The file contains no sheets to map"),
            Self::NoDecodeInFlight => write!(f, "No file is being decoded"),
            Self::UnknownColumn { sheet, header } => {
                write!(f, "Column '{header}' not found in sheet '{sheet}'")
            }
            Self::InvalidStep(step) => write!(f, "Unknown wizard step {step}"),
        }
    }
}

impl std::error::Error for CoreError {}
