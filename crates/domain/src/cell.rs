// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Canonical `YYYY-MM-DD` rendering used for every date leaving the domain.
pub(crate) const ISO_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// A single decoded spreadsheet cell.
///
/// The decoder boundary produces one of these for every header of every row.
/// Cells that the decoder could not populate are `Empty`, which the
/// transformers treat exactly like a column that is missing from the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    /// Free text.
    Text(String),
    /// A numeric cell.
    Number(f64),
    /// A cell the spreadsheet stored as a date.
    Date(Date),
    /// No value.
    Empty,
}

impl CellValue {
    /// Creates a text cell, collapsing the empty string to `Empty`.
    ///
    /// # Arguments
    ///
    /// * `value` - The raw text
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        let value: String = value.into();
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value)
        }
    }

    /// Returns true if the cell carries no value.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Renders the cell as text.
    ///
    /// Integer-valued numbers print without a fractional part so that a
    /// numeric RFC or year column reads the same way it was typed.
    /// Dates render as `YYYY-MM-DD`.
    ///
    /// # Returns
    ///
    /// `None` for `Empty`, otherwise the textual form.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Text(value) => Some(value.clone()),
            Self::Number(value) => Some(format_number(*value)),
            Self::Date(date) => date.format(ISO_DATE).ok(),
            Self::Empty => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Date> for CellValue {
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_integer_numbers_render_without_fraction() {
        assert_eq!(CellValue::Number(2024.0).to_text(), Some(String::from("2024")));
        assert_eq!(CellValue::Number(-3.0).to_text(), Some(String::from("-3")));
    }

    #[test]
    fn test_fractional_numbers_keep_fraction() {
        assert_eq!(CellValue::Number(1.5).to_text(), Some(String::from("1.5")));
    }

    #[test]
    fn test_dates_render_iso() {
        let cell: CellValue = CellValue::Date(date!(2024 - 03 - 07));
        assert_eq!(cell.to_text(), Some(String::from("2024-03-07")));
    }

    #[test]
    fn test_empty_string_collapses_to_empty() {
        assert!(CellValue::text("").is_empty());
        assert_eq!(CellValue::Empty.to_text(), None);
    }
}
