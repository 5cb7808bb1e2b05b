// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors raised when parsing domain values from external input.
///
/// Row-level import problems are not errors in this sense; they are
/// collected as [`crate::ValidationError`] values instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A mapping target that is not a known field.
    UnknownField(String),
    /// A value outside one of the closed value sets.
    InvalidValue {
        /// Which set was being parsed.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
    /// A date that is not a real `YYYY-MM-DD` calendar date.
    InvalidDate(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField(field) => write!(f, "Unknown field '{field}'"),
            Self::InvalidValue { kind, value } => write!(f, "Invalid {kind}: '{value}'"),
            Self::InvalidDate(value) => {
                write!(f, "Invalid date '{value}': expected YYYY-MM-DD")
            }
        }
    }
}

impl std::error::Error for DomainError {}
