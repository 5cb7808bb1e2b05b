// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use obtrack_domain::{FieldMappings, ObligationMapping, SheetData};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The full wizard's steps.
///
/// Persisted as the bare step number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum WizardStep {
    Closed = 0,
    Upload = 1,
    Map = 2,
    Validate = 3,
    Summary = 4,
}

impl WizardStep {
    /// The step reached by going back one, if any.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Closed | Self::Upload => None,
            Self::Map => Some(Self::Upload),
            Self::Validate => Some(Self::Map),
            Self::Summary => Some(Self::Validate),
        }
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step as Self
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Closed),
            1 => Ok(Self::Upload),
            2 => Ok(Self::Map),
            3 => Ok(Self::Validate),
            4 => Ok(Self::Summary),
            other => Err(CoreError::InvalidStep(other)),
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name: &str = match self {
            Self::Closed => "closed",
            Self::Upload => "upload",
            Self::Map => "map",
            Self::Validate => "validate",
            Self::Summary => "summary",
        };
        f.write_str(name)
    }
}

/// The restorable part of a selected file. The bytes are never kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub name: String,
    pub size: u64,
}

impl FileMeta {
    #[must_use]
    pub fn new(name: &str, size: u64) -> Self {
        Self {
            name: name.to_string(),
            size,
        }
    }
}

/// The full wizard's session.
///
/// Owned by whoever drives the wizard; only [`crate::apply`] produces a
/// new one.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSession {
    pub step: WizardStep,
    pub file: Option<FileMeta>,
    /// Every sheet of the decoded file.
    pub sheets: Vec<SheetData>,
    /// Explicit operator choices in the order they were made.
    pub mappings: FieldMappings,
    /// Whether the wizard is open.
    pub show: bool,
    /// The last decode failure, shown on the upload step.
    pub error: Option<String>,
    /// Whether a decode is in flight.
    pub decoding: bool,
}

impl ImportSession {
    /// Creates a closed session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: WizardStep::Closed,
            file: None,
            sheets: Vec::new(),
            mappings: FieldMappings::new(),
            show: false,
            error: None,
            decoding: false,
        }
    }

    /// Creates a session that has just been opened on the upload step.
    #[must_use]
    pub fn opened() -> Self {
        Self {
            step: WizardStep::Upload,
            show: true,
            ..Self::new()
        }
    }

    /// Returns the projection that is persisted between restarts.
    #[must_use]
    pub fn to_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            step: self.step,
            file: self.file.clone(),
            sheets: self.sheets.clone(),
            mappings: self.mappings.clone(),
            show: self.show,
        }
    }
}

impl Default for ImportSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable projection of an [`ImportSession`].
///
/// Decode state is not part of it: a session restored mid-decode lands on
/// its step with no decode in flight and the operator must pick the file
/// again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub step: WizardStep,
    pub file: Option<FileMeta>,
    pub sheets: Vec<SheetData>,
    pub mappings: FieldMappings,
    pub show: bool,
}

impl SessionSnapshot {
    /// Rebuilds a session from this snapshot.
    ///
    /// A snapshot past the upload step with no sheets cannot be resumed and
    /// is restored on the upload step instead.
    #[must_use]
    pub fn into_session(self) -> ImportSession {
        let step: WizardStep = if self.step > WizardStep::Upload && self.sheets.is_empty() {
            WizardStep::Upload
        } else {
            self.step
        };

        ImportSession {
            step,
            file: self.file,
            sheets: self.sheets,
            mappings: self.mappings,
            show: self.show && step != WizardStep::Closed,
            error: None,
            decoding: false,
        }
    }
}

/// The obligation importer's steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ObligationStep {
    Closed = 0,
    Upload = 1,
    Map = 2,
    Review = 3,
}

impl ObligationStep {
    /// The step reached by going back one, if any.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Closed | Self::Upload => None,
            Self::Map => Some(Self::Upload),
            Self::Review => Some(Self::Map),
        }
    }
}

impl From<ObligationStep> for u8 {
    fn from(step: ObligationStep) -> Self {
        step as Self
    }
}

impl TryFrom<u8> for ObligationStep {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Closed),
            1 => Ok(Self::Upload),
            2 => Ok(Self::Map),
            3 => Ok(Self::Review),
            other => Err(CoreError::InvalidStep(other)),
        }
    }
}

/// The obligation importer's session. Only the first sheet is kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObligationSession {
    pub step: ObligationStep,
    pub file: Option<FileMeta>,
    pub sheet: Option<SheetData>,
    /// Seeded from header text on decode, then edited by the operator.
    pub mapping: ObligationMapping,
    pub error: Option<String>,
    pub decoding: bool,
}

impl ObligationSession {
    /// Creates a closed session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: ObligationStep::Closed,
            file: None,
            sheet: None,
            mapping: ObligationMapping::new(),
            error: None,
            decoding: false,
        }
    }

    /// Creates a session that has just been opened on the upload step.
    #[must_use]
    pub fn opened() -> Self {
        Self {
            step: ObligationStep::Upload,
            ..Self::new()
        }
    }
}

impl Default for ObligationSession {
    fn default() -> Self {
        Self::new()
    }
}

/// What a successful transition did.
///
/// Drivers use this for logging and to trigger side effects such as
/// persisting a snapshot or handing off a completed import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Opened,
    FileSelected { name: String },
    Decoded { sheets: usize },
    DecodeFailed { reason: String },
    MappingChanged { header: String, field: String },
    Advanced { to: u8 },
    WentBack { to: u8 },
    Cancelled,
    Completed,
}

impl SessionEvent {
    /// Returns true if the session closed with this event.
    #[must_use]
    pub const fn closes_session(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed)
    }
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opened => write!(f, "opened"),
            Self::FileSelected { name } => write!(f, "file selected: {name}"),
            Self::Decoded { sheets } => write!(f, "decoded {sheets} sheet(s)"),
            Self::DecodeFailed { reason } => write!(f, "decode failed: {reason}"),
            Self::MappingChanged { header, field } => write!(f, "mapped '{header}' to {field}"),
            Self::Advanced { to } => write!(f, "advanced to step {to}"),
            Self::WentBack { to } => write!(f, "went back to step {to}"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// The result of a successful full wizard transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The session after the transition.
    pub new_state: ImportSession,
    /// What happened.
    pub event: SessionEvent,
}

/// The result of a successful obligation importer transition.
#[derive(Debug, Clone, PartialEq)]
pub struct ObligationTransition {
    /// The session after the transition.
    pub new_state: ObligationSession,
    /// What happened.
    pub event: SessionEvent,
}
