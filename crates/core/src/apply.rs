// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, ObligationCommand};
use crate::error::CoreError;
use crate::state::{
    ImportSession, ObligationSession, ObligationStep, ObligationTransition, SessionEvent,
    TransitionResult, WizardStep,
};
use obtrack_domain::{FieldMappings, SheetData, SheetMapping, suggest_obligation_mapping};

const fn reject(command: &Command, step: WizardStep) -> CoreError {
    CoreError::InvalidTransition {
        command: command.name(),
        step: step as u8,
    }
}

/// Applies a command to the full wizard session.
///
/// `Open` is accepted in every step and discards any open session.
///
/// # Arguments
///
/// * `session` - The current session (immutable)
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new session and what happened
/// * `Err(CoreError)` if the command is not allowed
///
/// # Errors
///
/// Returns an error if:
/// - The command is not valid in the current step
/// - A decode result arrives with no decode in flight
/// - A mapping names a sheet or column that was not decoded
/// - Advancing from map with no sheets
/// - Advancing from validate, or completing, with blocking errors
#[allow(clippy::too_many_lines)]
pub fn apply(session: &ImportSession, command: Command) -> Result<TransitionResult, CoreError> {
    let step: WizardStep = session.step;

    match command {
        // Opening always starts over; an open session is discarded.
        Command::Open => Ok(TransitionResult {
            new_state: ImportSession::opened(),
            event: SessionEvent::Opened,
        }),
        Command::SelectFile { ref file } => {
            if !matches!(
                step,
                WizardStep::Upload | WizardStep::Map | WizardStep::Validate
            ) {
                return Err(reject(&command, step));
            }

            // A new file discards everything derived from the previous one.
            let mut new_state: ImportSession = session.clone();
            new_state.file = Some(file.clone());
            new_state.sheets = Vec::new();
            new_state.mappings = FieldMappings::new();
            new_state.error = None;
            new_state.decoding = true;

            Ok(TransitionResult {
                new_state,
                event: SessionEvent::FileSelected {
                    name: file.name.clone(),
                },
            })
        }
        Command::DecodeSucceeded { sheets } => {
            if !session.decoding {
                return Err(CoreError::NoDecodeInFlight);
            }

            let count: usize = sheets.len();
            let mut new_state: ImportSession = session.clone();
            new_state.sheets = sheets;
            new_state.decoding = false;
            new_state.error = None;
            new_state.step = WizardStep::Map;

            Ok(TransitionResult {
                new_state,
                event: SessionEvent::Decoded { sheets: count },
            })
        }
        Command::DecodeFailed { reason } => {
            if !session.decoding {
                return Err(CoreError::NoDecodeInFlight);
            }

            let mut new_state: ImportSession = session.clone();
            new_state.decoding = false;
            new_state.error = Some(reason.clone());
            new_state.step = WizardStep::Upload;

            Ok(TransitionResult {
                new_state,
                event: SessionEvent::DecodeFailed { reason },
            })
        }
        Command::SetMapping {
            ref sheet,
            ref header,
            field,
        } => {
            if step != WizardStep::Map {
                return Err(reject(&command, step));
            }

            let known: bool = session
                .sheets
                .iter()
                .any(|candidate: &SheetData| {
                    candidate.name == *sheet && candidate.headers.contains(header)
                });
            if !known {
                return Err(CoreError::UnknownColumn {
                    sheet: sheet.clone(),
                    header: header.clone(),
                });
            }

            let mut new_state: ImportSession = session.clone();
            let sheet_mapping: &mut SheetMapping =
                new_state.mappings.entry(sheet.clone()).or_default();
            sheet_mapping.insert(header.clone(), field);

            Ok(TransitionResult {
                new_state,
                event: SessionEvent::MappingChanged {
                    header: header.clone(),
                    field: field.to_string(),
                },
            })
        }
        Command::Advance { blocking_errors } => {
            let next: WizardStep = match step {
                WizardStep::Map => {
                    if session.sheets.is_empty() {
                        return Err(CoreError::NoSheets);
                    }
                    WizardStep::Validate
                }
                WizardStep::Validate => {
                    if blocking_errors > 0 {
                        return Err(CoreError::AdvanceBlocked { blocking_errors });
                    }
                    WizardStep::Summary
                }
                // Upload only moves forward by decoding; summary only by completing.
                WizardStep::Closed | WizardStep::Upload | WizardStep::Summary => {
                    return Err(reject(&command, step));
                }
            };

            let mut new_state: ImportSession = session.clone();
            new_state.step = next;

            Ok(TransitionResult {
                new_state,
                event: SessionEvent::Advanced { to: next as u8 },
            })
        }
        Command::Back => {
            let Some(previous) = step.previous() else {
                return Err(reject(&command, step));
            };

            let mut new_state: ImportSession = session.clone();
            new_state.step = previous;

            Ok(TransitionResult {
                new_state,
                event: SessionEvent::WentBack {
                    to: previous as u8,
                },
            })
        }
        Command::Cancel => {
            if step == WizardStep::Closed {
                return Err(reject(&command, step));
            }
            Ok(TransitionResult {
                new_state: ImportSession::new(),
                event: SessionEvent::Cancelled,
            })
        }
        Command::Complete { blocking_errors } => {
            if step != WizardStep::Summary {
                return Err(reject(&command, step));
            }
            if blocking_errors > 0 {
                return Err(CoreError::AdvanceBlocked { blocking_errors });
            }
            Ok(TransitionResult {
                new_state: ImportSession::new(),
                event: SessionEvent::Completed,
            })
        }
    }
}

const fn reject_obligation(command: &ObligationCommand, step: ObligationStep) -> CoreError {
    CoreError::InvalidTransition {
        command: command.name(),
        step: step as u8,
    }
}

/// Applies a command to the obligation importer session.
///
/// Validation errors never block this importer, so no command carries an
/// error count. `Open` is accepted in every step and starts over.
///
/// # Errors
///
/// Returns an error if:
/// - The command is not valid in the current step
/// - A decode result arrives with no decode in flight
/// - A mapping names a column that was not decoded
pub fn apply_obligation(
    session: &ObligationSession,
    command: ObligationCommand,
) -> Result<ObligationTransition, CoreError> {
    let step: ObligationStep = session.step;

    let (new_state, event): (ObligationSession, SessionEvent) = match command {
        ObligationCommand::Open => (ObligationSession::opened(), SessionEvent::Opened),
        ObligationCommand::SelectFile { ref file } => {
            if !matches!(step, ObligationStep::Upload | ObligationStep::Map) {
                return Err(reject_obligation(&command, step));
            }
            // A new file discards the previous sheet and mapping.
            let mut new_state: ObligationSession = ObligationSession::opened();
            new_state.step = step;
            new_state.file = Some(file.clone());
            new_state.decoding = true;
            (
                new_state,
                SessionEvent::FileSelected {
                    name: file.name.clone(),
                },
            )
        }
        ObligationCommand::DecodeSucceeded { sheets } => {
            if !session.decoding {
                return Err(CoreError::NoDecodeInFlight);
            }

            let mut new_state: ObligationSession = session.clone();
            new_state.decoding = false;

            if let Some(first) = sheets.into_iter().next() {
                new_state.mapping = suggest_obligation_mapping(&first.headers);
                new_state.sheet = Some(first);
                new_state.error = None;
                new_state.step = ObligationStep::Map;
                (new_state, SessionEvent::Decoded { sheets: 1 })
            } else {
                let reason: String = CoreError::NoSheets.to_string();
                new_state.error = Some(reason.clone());
                new_state.step = ObligationStep::Upload;
                (new_state, SessionEvent::DecodeFailed { reason })
            }
        }
        ObligationCommand::DecodeFailed { reason } => {
            if !session.decoding {
                return Err(CoreError::NoDecodeInFlight);
            }
            let mut new_state: ObligationSession = session.clone();
            new_state.decoding = false;
            new_state.error = Some(reason.clone());
            new_state.step = ObligationStep::Upload;
            (new_state, SessionEvent::DecodeFailed { reason })
        }
        ObligationCommand::SetMapping { ref header, field } => {
            if step != ObligationStep::Map {
                return Err(reject_obligation(&command, step));
            }
            let Some(sheet) = session.sheet.as_ref() else {
                return Err(reject_obligation(&command, step));
            };
            if !sheet.headers.contains(header) {
                return Err(CoreError::UnknownColumn {
                    sheet: sheet.name.clone(),
                    header: header.clone(),
                });
            }

            let mut new_state: ObligationSession = session.clone();
            new_state.mapping.insert(header.clone(), field);
            (
                new_state,
                SessionEvent::MappingChanged {
                    header: header.clone(),
                    field: field.to_string(),
                },
            )
        }
        ObligationCommand::Advance => {
            if step != ObligationStep::Map {
                return Err(reject_obligation(&command, step));
            }
            if session.sheet.is_none() {
                return Err(CoreError::NoSheets);
            }
            let mut new_state: ObligationSession = session.clone();
            new_state.step = ObligationStep::Review;
            (
                new_state,
                SessionEvent::Advanced {
                    to: ObligationStep::Review as u8,
                },
            )
        }
        ObligationCommand::Back => {
            let Some(previous) = step.previous() else {
                return Err(reject_obligation(&command, step));
            };
            let mut new_state: ObligationSession = session.clone();
            new_state.step = previous;
            (
                new_state,
                SessionEvent::WentBack {
                    to: previous as u8,
                },
            )
        }
        ObligationCommand::Cancel => {
            if step == ObligationStep::Closed {
                return Err(reject_obligation(&command, step));
            }
            (ObligationSession::new(), SessionEvent::Cancelled)
        }
        ObligationCommand::Finish => {
            if step != ObligationStep::Review {
                return Err(reject_obligation(&command, step));
            }
            (ObligationSession::new(), SessionEvent::Completed)
        }
    };

    Ok(ObligationTransition { new_state, event })
}
