// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::cell::ISO_DATE;
use crate::error::DomainError;
use time::Date;

/// Returns true if `value` contains an email-shaped token.
///
/// The check looks for `<non-space>@<non-space>.<non-space>` anywhere in
/// the value. It is a shape check only, not an address validator, and it
/// is not anchored: `"contact: ana@x.com"` passes.
///
/// # Arguments
///
/// * `value` - The candidate address
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    let chars: Vec<char> = value.chars().collect();

    chars.iter().enumerate().any(|(at, c)| {
        if *c != '@' || at == 0 || chars[at - 1].is_whitespace() {
            return false;
        }

        // The domain part is the run of non-space characters after '@'.
        let domain: Vec<char> = chars[at + 1..]
            .iter()
            .copied()
            .take_while(|c| !c.is_whitespace())
            .collect();

        domain
            .iter()
            .enumerate()
            .any(|(dot, c)| *c == '.' && dot >= 1 && dot + 1 < domain.len())
    })
}

/// Parses a literal `YYYY-MM-DD` calendar date.
///
/// Both the shape and the calendar are checked, so `2024-13-40` and
/// `2023-02-29` are rejected.
///
/// # Arguments
///
/// * `value` - The candidate date text
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if the text has the wrong shape or
/// names a day that does not exist.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    let bytes: &[u8] = value.as_bytes();
    let shaped: bool = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !shaped {
        return Err(DomainError::InvalidDate(value.to_string()));
    }

    Date::parse(value, ISO_DATE).map_err(|_| DomainError::InvalidDate(value.to_string()))
}

/// What to do with a date cell that fails [`parse_iso_date`].
///
/// Task dates are optional, so a bad one is dropped. Every obligation needs
/// a submission date, so a bad one is replaced by the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePolicy {
    /// Leave the field unset.
    LeaveUnset,
    /// Substitute the caller's current date.
    DefaultToToday {
        /// The date standing in for "today".
        today: Date,
    },
}

/// Outcome of applying a [`DatePolicy`] to one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDate {
    /// The value to store, already in `YYYY-MM-DD` form.
    pub value: Option<String>,
    /// Whether the input was rejected and an error should be recorded.
    pub rejected: bool,
}

impl DatePolicy {
    /// Applies the policy to a raw date value.
    ///
    /// # Arguments
    ///
    /// * `raw` - The cell text
    #[must_use]
    pub fn resolve(self, raw: &str) -> ResolvedDate {
        if parse_iso_date(raw).is_ok() {
            return ResolvedDate {
                value: Some(raw.to_string()),
                rejected: false,
            };
        }

        let value: Option<String> = match self {
            Self::LeaveUnset => None,
            Self::DefaultToToday { today } => today.format(ISO_DATE).ok(),
        };

        ResolvedDate {
            value,
            rejected: true,
        }
    }
}
