// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use obtrack::CoreError;
use obtrack_domain::DomainError;
use obtrack_persistence::PersistenceError;
use thiserror::Error;

/// Authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The roles allowed to perform it.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Spreadsheet decoding errors.
///
/// These never escape the wizard: a decode failure is recorded on the
/// session and shown on the upload step.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The file extension is not a supported spreadsheet format.
    #[error("Unsupported file type '.{extension}'. Supported: .csv, .xlsx, .xlsm, .xlsb, .xls, .ods")]
    UnsupportedFormat { extension: String },

    /// The workbook could not be opened or a sheet could not be read.
    #[error("Could not read the spreadsheet: {reason}")]
    Unreadable { reason: String },

    /// The decode task did not finish.
    #[error("Decoding was interrupted: {reason}")]
    Interrupted { reason: String },
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The roles allowed to perform it.
        required_role: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The wizard cannot do that in its current step.
    InvalidTransition {
        /// A human-readable description of the rejection.
        message: String,
    },
    /// Blocking validation errors prevent continuing.
    ValidationBlocked {
        /// How many blocking errors remain.
        blocking_errors: usize,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::InvalidTransition { message } => write!(f, "{message}"),
            Self::ValidationBlocked { blocking_errors } => write!(
                f,
                "Cannot continue: {blocking_errors} blocking validation error(s) remain"
            ),
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// Domain errors only arise from parsing operator input here.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let field: &str = match &err {
        DomainError::UnknownField(_) => "field",
        DomainError::InvalidValue { kind, .. } => kind,
        DomainError::InvalidDate(_) => "date",
    };
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::AdvanceBlocked { blocking_errors } => {
            ApiError::ValidationBlocked { blocking_errors }
        }
        CoreError::UnknownColumn { .. } => ApiError::ResourceNotFound {
            resource_type: String::from("Column"),
            message: err.to_string(),
        },
        CoreError::InvalidTransition { .. }
        | CoreError::NoSheets
        | CoreError::NoDecodeInFlight
        | CoreError::InvalidStep(_) => ApiError::InvalidTransition {
            message: err.to_string(),
        },
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}
