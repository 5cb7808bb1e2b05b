// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Spreadsheet decoding.
//!
//! Turns the bytes of an uploaded file into named sheets. CSV files are read
//! with the `csv` crate as a single sheet; every other supported format is
//! handed to `calamine`.

use crate::error::DecodeError;
use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use obtrack_domain::{CellValue, SheetData, parse_iso_date};
use std::io::Cursor;
use time::{Date, Duration, Month};
use tracing::{debug, warn};

/// The name given to the only sheet of a CSV file.
pub const CSV_SHEET_NAME: &str = "Sheet1";

/// Extensions handed to the workbook reader.
const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Turns the bytes of a file into its sheets.
///
/// Implementations must not depend on anything but their arguments.
pub trait SheetDecoder: Send + Sync {
    /// Decodes a file.
    ///
    /// # Arguments
    ///
    /// * `file_name` - The uploaded file's name; its extension selects the format
    /// * `bytes` - The file's contents
    ///
    /// # Errors
    ///
    /// Returns an error if the format is unsupported or the file cannot be read.
    fn decode(&self, file_name: &str, bytes: &[u8]) -> Result<Vec<SheetData>, DecodeError>;
}

/// The decoder used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetDecoder;

impl SheetDecoder for SpreadsheetDecoder {
    fn decode(&self, file_name: &str, bytes: &[u8]) -> Result<Vec<SheetData>, DecodeError> {
        let extension: String = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        let sheets: Vec<SheetData> = if extension == "csv" {
            decode_csv(bytes)?
        } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
            decode_workbook(bytes)?
        } else {
            return Err(DecodeError::UnsupportedFormat { extension });
        };

        debug!(file_name, sheets = sheets.len(), "Decoded spreadsheet");
        Ok(sheets)
    }
}

fn decode_csv(bytes: &[u8]) -> Result<Vec<SheetData>, DecodeError> {
    let mut reader: csv::Reader<&[u8]> = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(unreadable)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for record in reader.records() {
        let record: csv::StringRecord = record.map_err(unreadable)?;
        rows.push(record.iter().map(CellValue::text).collect());
    }

    Ok(vec![SheetData::new(CSV_SHEET_NAME, headers, rows)])
}

fn decode_workbook(bytes: &[u8]) -> Result<Vec<SheetData>, DecodeError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(unreadable)?;

    let names: Vec<String> = workbook.sheet_names().to_vec();
    let mut sheets: Vec<SheetData> = Vec::with_capacity(names.len());

    for name in &names {
        match workbook.worksheet_range(name) {
            Ok(range) => sheets.push(range_to_sheet(name, &range)),
            Err(e) => {
                warn!(sheet = %name, error = %e, "Skipping unreadable sheet");
            }
        }
    }

    Ok(sheets)
}

/// The first row holds the headers; the remaining rows are data.
fn range_to_sheet(name: &str, range: &Range<Data>) -> SheetData {
    let mut rows = range.rows();

    let headers: Vec<String> = rows
        .next()
        .map(|header_row: &[Data]| {
            header_row
                .iter()
                .map(|cell: &Data| to_cell_value(cell).to_text().unwrap_or_default())
                .collect()
        })
        .unwrap_or_default();

    let data: Vec<Vec<CellValue>> = rows
        .map(|row: &[Data]| row.iter().map(to_cell_value).collect())
        .collect();

    SheetData::new(name, headers, data)
}

/// Converts one workbook cell.
///
/// Cells formatted as dates become [`CellValue::Date`]; booleans and cell
/// errors keep their display text.
pub(crate) fn to_cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::text(s.as_str()),
        #[allow(clippy::cast_precision_loss)]
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::text(b.to_string()),
        Data::DateTime(dt) => {
            if dt.is_datetime() {
                excel_serial_to_date(dt.as_f64())
                    .map_or(CellValue::Number(dt.as_f64()), CellValue::Date)
            } else {
                CellValue::Number(dt.as_f64())
            }
        }
        Data::DateTimeIso(s) => s
            .get(..10)
            .and_then(|prefix: &str| parse_iso_date(prefix).ok())
            .map_or_else(|| CellValue::text(s.as_str()), CellValue::Date),
        Data::DurationIso(s) => CellValue::text(s.as_str()),
        Data::Error(e) => CellValue::text(e.to_string()),
    }
}

/// Converts an Excel serial day number to a calendar date.
///
/// Counts from 1899-12-30, which matches Excel for every serial after
/// 1900-02-28. The fractional time of day is dropped.
pub(crate) fn excel_serial_to_date(serial: f64) -> Option<Date> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch: Date = Date::from_calendar_date(1899, Month::December, 30).ok()?;
    #[allow(clippy::cast_possible_truncation)]
    let days: i64 = serial.floor() as i64;
    epoch.checked_add(Duration::days(days))
}

fn unreadable(err: impl std::fmt::Display) -> DecodeError {
    DecodeError::Unreadable {
        reason: err.to_string(),
    }
}
