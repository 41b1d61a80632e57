//! Workbook reading.
//!
//! Opens spreadsheet bytes (xlsx, xlsm, xlsb, xls or ods) and extracts the `ColumnLevel`
//! and `TableLevel` sheets as string tables. Only structural problems are reported here;
//! the content of the sheets is left to the validator.

use crate::{ParserError, Result};
use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use chrono::NaiveDateTime;
use dqsheet_core::{RuleSheet, SheetKind, SheetTable};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Layout of date and time cells, matching how the rule template's authors see them.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reads both rule sheets from workbook bytes.
///
/// # Errors
///
/// Returns `ParserError::Workbook` if the bytes are not a readable workbook, and
/// `ParserError::MissingSheets` if either rule sheet is absent.
pub fn read_workbook(bytes: &[u8]) -> Result<RuleSheet> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ParserError::Workbook(e.to_string()))?;

    let sheet_names = workbook.sheet_names();
    let missing: Vec<String> = [SheetKind::ColumnLevel, SheetKind::TableLevel]
        .iter()
        .map(|kind| kind.name())
        .filter(|name| !sheet_names.iter().any(|sheet| sheet == name))
        .map(String::from)
        .collect();
    if !missing.is_empty() {
        return Err(ParserError::MissingSheets(missing));
    }

    let mut read = |kind: SheetKind| -> Result<SheetTable> {
        let range = workbook
            .worksheet_range(kind.name())
            .map_err(|e| ParserError::Workbook(e.to_string()))?;
        Ok(table_from_range(kind, &range))
    };

    let column_level = read(SheetKind::ColumnLevel)?;
    let table_level = read(SheetKind::TableLevel)?;
    debug!(
        column_rows = column_level.len(),
        table_rows = table_level.len(),
        "Read rule workbook"
    );

    Ok(RuleSheet::new(column_level, table_level))
}

/// Reads both rule sheets from a workbook file.
pub fn read_workbook_file(path: &Path) -> Result<RuleSheet> {
    let bytes = std::fs::read(path)?;
    read_workbook(&bytes)
}

/// Converts a sheet's used range into a string table.
///
/// The first row holds the headers. Data rows keep their position among the data rows as
/// their number, and rows whose cells are all blank are dropped.
pub fn table_from_range(kind: SheetKind, range: &Range<Data>) -> SheetTable {
    let mut rows = range.rows();

    let headers: Vec<String> = rows
        .next()
        .map(|header| header.iter().map(|cell| cell_text(cell).trim().to_string()).collect())
        .unwrap_or_default();
    let mut table = SheetTable::new(kind, headers);

    for (idx, row) in rows.enumerate() {
        let cells: Vec<String> = row.iter().map(cell_text).collect();
        if cells.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        table.push_numbered_row(idx + 1, cells);
    }

    table
}

/// Text of a cell as a rule author would read it.
///
/// Integral numbers render without a fractional part and booleans as `TRUE`/`FALSE`.
/// Date-formatted cells render as `YYYY-MM-DD HH:MM:SS` rather than their serial number.
/// Error cells read as blank.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) if !dt.is_duration() => datetime_text(datetime),
            _ => dt.as_f64().to_string(),
        },
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        other => other.to_string(),
    }
}

fn datetime_text(datetime: NaiveDateTime) -> String {
    datetime.format(DATETIME_FORMAT).to_string()
}
