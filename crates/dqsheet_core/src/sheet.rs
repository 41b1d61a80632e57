//! Raw sheet tables.
//!
//! A workbook is read into two string tables before anything is interpreted. Keeping the
//! raw text around lets the validator report exactly which cell is wrong, and lets the
//! compiler work from the same rows afterwards.

use std::fmt;

/// Column headers, exactly as they appear in the rule-sheet template.
pub mod headers {
    pub const PROJECT_ID: &str = "GCP Project ID";
    pub const DATASET_ID: &str = "Bigquery Dataset ID";
    pub const TABLE_NAME: &str = "Bigquery Table Name";

    pub const COLUMN_NAME: &str = "Column Name";
    pub const RULE_NAME: &str = "Rule Name";
    pub const RULE_DESCRIPTION: &str = "Rule Description";
    pub const DQ_RULE: &str = "DQ Rule";
    pub const IGNORE_NULL: &str = "Ignore Null Values";
    pub const THRESHOLD: &str = "Threshhold";
    pub const RANGE_MIN: &str = "Range Min Value";
    pub const STRICT_MIN: &str = "Strict Range Min Value";
    pub const RANGE_MAX: &str = "Range Max Value";
    pub const STRICT_MAX: &str = "Strict Range Max Value";
    pub const SET_VALUES: &str = "Set Values";
    pub const REGEX: &str = "Regular Expression";
    pub const SQL_EXPRESSION: &str = "SQL Expression";

    pub const ROW_FILTER: &str = "Partition Filter Condition";
    pub const SAMPLING_PERCENT: &str = "Data Sampling %";
    pub const SCHEDULE: &str = "schedule_interval";
    pub const EXPORT_PROJECT_ID: &str = "DQ Export GCP Project ID";
    pub const EXPORT_DATASET_ID: &str = "DQ Export Bigquery Dataset ID";
    pub const EXPORT_TABLE_NAME: &str = "DQ Export Bigquery Table Name";

    /// Identity columns shared by both sheets.
    pub const IDENTITY: [&str; 3] = [PROJECT_ID, DATASET_ID, TABLE_NAME];

    /// Required headers of the `ColumnLevel` sheet, in template order.
    pub const COLUMN_LEVEL: [&str; 16] = [
        PROJECT_ID,
        DATASET_ID,
        TABLE_NAME,
        COLUMN_NAME,
        RULE_NAME,
        RULE_DESCRIPTION,
        DQ_RULE,
        IGNORE_NULL,
        THRESHOLD,
        RANGE_MIN,
        STRICT_MIN,
        RANGE_MAX,
        STRICT_MAX,
        SET_VALUES,
        REGEX,
        SQL_EXPRESSION,
    ];

    /// Required headers of the `TableLevel` sheet, in template order.
    pub const TABLE_LEVEL: [&str; 9] = [
        PROJECT_ID,
        DATASET_ID,
        TABLE_NAME,
        ROW_FILTER,
        SAMPLING_PERCENT,
        SCHEDULE,
        EXPORT_PROJECT_ID,
        EXPORT_DATASET_ID,
        EXPORT_TABLE_NAME,
    ];
}

/// Which of the two workbook sheets a table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetKind {
    /// Per-column rule definitions
    ColumnLevel,
    /// Per-table settings
    TableLevel,
}

impl SheetKind {
    /// Sheet name inside the workbook.
    pub fn name(self) -> &'static str {
        match self {
            SheetKind::ColumnLevel => "ColumnLevel",
            SheetKind::TableLevel => "TableLevel",
        }
    }

    /// Headers the sheet must expose.
    pub fn required_headers(self) -> &'static [&'static str] {
        match self {
            SheetKind::ColumnLevel => &headers::COLUMN_LEVEL,
            SheetKind::TableLevel => &headers::TABLE_LEVEL,
        }
    }
}

impl fmt::Display for SheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One data row of a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    /// 1-based position among the sheet's data rows (the header row is not counted)
    pub number: usize,

    /// Cell texts, aligned with the table headers
    pub cells: Vec<String>,
}

/// A sheet read as plain text: a header row and the data rows below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetTable {
    /// Which sheet this is
    pub kind: SheetKind,

    /// Header row
    pub headers: Vec<String>,

    /// Data rows in sheet order
    pub rows: Vec<SheetRow>,
}

impl SheetTable {
    /// Creates an empty table with the given headers.
    pub fn new<I, S>(kind: SheetKind, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Creates an empty table with the template headers for `kind`.
    pub fn with_template_headers(kind: SheetKind) -> Self {
        Self::new(kind, kind.required_headers().iter().copied())
    }

    /// Appends a row numbered after the current last row.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let number = self.rows.last().map_or(1, |row| row.number + 1);
        self.push_numbered_row(number, cells);
    }

    /// Appends a row with an explicit data-row number.
    ///
    /// Used by readers that skip blank rows but keep the author's numbering.
    pub fn push_numbered_row<I, S>(&mut self, number: usize, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(SheetRow {
            number,
            cells: cells.into_iter().map(Into::into).collect(),
        });
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the sheet has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a header in the header row.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Required headers absent from the header row, in template order.
    pub fn missing_headers(&self) -> Vec<&'static str> {
        self.kind
            .required_headers()
            .iter()
            .copied()
            .filter(|required| self.column_index(required).is_none())
            .collect()
    }

    /// Iterates over the data rows as header-addressable records.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |row| Record { table: self, row })
    }
}

/// A data row viewed through its table's headers.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    table: &'a SheetTable,
    row: &'a SheetRow,
}

impl<'a> Record<'a> {
    /// 1-based data-row number.
    pub fn number(&self) -> usize {
        self.row.number
    }

    /// Sheet the row belongs to.
    pub fn sheet(&self) -> SheetKind {
        self.table.kind
    }

    /// Raw cell text; `""` when the column or the cell is missing.
    pub fn raw(&self, header: &str) -> &'a str {
        self.table
            .column_index(header)
            .and_then(|idx| self.row.cells.get(idx))
            .map_or("", String::as_str)
    }

    /// Trimmed cell text, or `None` when the cell is blank.
    pub fn text(&self, header: &str) -> Option<&'a str> {
        let value = self.raw(header).trim();
        (!value.is_empty()).then_some(value)
    }

    /// Returns true when the cell is empty or only whitespace.
    pub fn is_blank(&self, header: &str) -> bool {
        self.text(header).is_none()
    }
}

/// Both sheets of a rule workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSheet {
    /// The `ColumnLevel` sheet
    pub column_level: SheetTable,

    /// The `TableLevel` sheet
    pub table_level: SheetTable,
}

impl RuleSheet {
    /// Creates a rule sheet from its two tables.
    pub fn new(column_level: SheetTable, table_level: SheetTable) -> Self {
        Self {
            column_level,
            table_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_headers_in_template_order() {
        let table = SheetTable::new(
            SheetKind::TableLevel,
            [
                headers::PROJECT_ID,
                headers::DATASET_ID,
                headers::TABLE_NAME,
                headers::ROW_FILTER,
                headers::SCHEDULE,
            ],
        );

        assert_eq!(
            table.missing_headers(),
            vec![
                headers::SAMPLING_PERCENT,
                headers::EXPORT_PROJECT_ID,
                headers::EXPORT_DATASET_ID,
                headers::EXPORT_TABLE_NAME,
            ]
        );
    }

    #[test]
    fn test_template_headers_are_complete() {
        let table = SheetTable::with_template_headers(SheetKind::ColumnLevel);
        assert!(table.missing_headers().is_empty());
        assert_eq!(table.headers.len(), 16);
    }

    #[test]
    fn test_record_lookup() {
        let mut table = SheetTable::new(SheetKind::TableLevel, ["a", "b"]);
        table.push_row(["  x  ", "   "]);

        let record = table.records().next().unwrap();
        assert_eq!(record.raw("a"), "  x  ");
        assert_eq!(record.text("a"), Some("x"));
        assert_eq!(record.text("b"), None);
        assert!(record.is_blank("b"));
        assert!(record.is_blank("not-a-header"));
    }

    #[test]
    fn test_short_row_reads_as_blank() {
        let mut table = SheetTable::new(SheetKind::TableLevel, ["a", "b", "c"]);
        table.push_row(["1"]);

        let record = table.records().next().unwrap();
        assert_eq!(record.raw("c"), "");
    }

    #[test]
    fn test_row_numbering() {
        let mut table = SheetTable::new(SheetKind::ColumnLevel, ["a"]);
        table.push_row(["1"]);
        table.push_numbered_row(4, ["2"]);
        table.push_row(["3"]);

        let numbers: Vec<usize> = table.records().map(|r| r.number()).collect();
        assert_eq!(numbers, vec![1, 4, 5]);
    }

    #[test]
    fn test_sheet_kind_display() {
        assert_eq!(SheetKind::ColumnLevel.to_string(), "ColumnLevel");
        assert_eq!(SheetKind::TableLevel.to_string(), "TableLevel");
    }
}
