//! Data models for Telepase export processing
//!
//! This module contains the data structures passed between pipeline stages:
//! the untyped grid produced by the loader, the framed and canonical tables,
//! and the classified transit records consumed by the presentation layer.

use crate::constants::{NOT_AVAILABLE, status_labels};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

// =============================================================================
// Cell Values
// =============================================================================

/// A single untyped cell as read from the upload
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum CellValue {
    /// Blank or absent cell
    #[default]
    Empty,
    /// Text exactly as read from the file
    Text(String),
    /// Numeric cell (spreadsheet numbers and date serials)
    Number(f64),
}

impl CellValue {
    /// Build a cell from delimited text, treating blank text as empty
    pub fn from_text(text: &str) -> Self {
        if text.trim().is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(text.to_string())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Text rendering of the cell, `None` for empty cells
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(text) => Some(Cow::Borrowed(text.as_str())),
            CellValue::Number(value) => Some(Cow::Owned(format_number(*value))),
        }
    }

    /// Numeric interpretation of the cell
    ///
    /// Numbers pass through, text is parsed after trimming. Non-finite values
    /// count as missing.
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            CellValue::Empty => return None,
            CellValue::Number(value) => *value,
            CellValue::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => f.write_str(&text),
            None => Ok(()),
        }
    }
}

/// Render a number without a trailing `.0` when it is integral
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

// =============================================================================
// Tables
// =============================================================================

/// Rows x columns of untyped cells with no column identity
///
/// Rows are padded with empty cells so every row has the same width.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawGrid {
    rows: Vec<Vec<CellValue>>,
    width: usize,
}

impl RawGrid {
    /// Create a rectangular grid from possibly ragged rows
    pub fn new(mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, CellValue::Empty);
        }
        Self { rows, width }
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

/// Grid with its header row promoted to column names
#[derive(Debug, Clone, PartialEq)]
pub struct FramedTable {
    /// Index of the header row within the raw grid
    pub header_idx: usize,
    /// Column names as they appeared in the header row
    pub columns: Vec<String>,
    /// Rows below the header row, in file order
    pub rows: Vec<Vec<CellValue>>,
}

/// Table whose column names have been mapped onto the canonical vocabulary
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalTable {
    columns: Vec<String>,
    name_to_index: HashMap<String, usize>,
    rows: Vec<Vec<CellValue>>,
}

impl CanonicalTable {
    /// Build a table from normalized column names
    ///
    /// When several columns share a name the last one is used for lookups.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let mut name_to_index = HashMap::new();
        for (index, name) in columns.iter().enumerate() {
            name_to_index.insert(name.clone(), index);
        }
        Self {
            columns,
            name_to_index,
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.name_to_index.contains_key(name)
    }

    pub fn get_index(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// Borrow a row's view keyed by column name
    pub fn row(&self, index: usize) -> Option<RowView<'_>> {
        self.rows.get(index).map(|cells| RowView { table: self, cells })
    }

    /// Iterate rows in file order
    pub fn iter_rows(&self) -> impl Iterator<Item = RowView<'_>> {
        self.rows.iter().map(move |cells| RowView { table: self, cells })
    }
}

/// One data row with access by canonical column name
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    table: &'a CanonicalTable,
    cells: &'a [CellValue],
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl<'a> RowView<'a> {
    /// Cell for a column, empty when the column or the cell is absent
    pub fn get(&self, column: &str) -> &'a CellValue {
        self.table
            .get_index(column)
            .and_then(|index| self.cells.get(index))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Text of a column, empty string when absent
    pub fn text(&self, column: &str) -> String {
        self.get(column)
            .as_text()
            .map(Cow::into_owned)
            .unwrap_or_default()
    }

    /// Text of a column, "N/A" when absent
    pub fn text_or_placeholder(&self, column: &str) -> String {
        self.get(column)
            .as_text()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

// =============================================================================
// Classification Output
// =============================================================================

/// Read outcome of a single transit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReadStatus {
    /// The lane antenna read the vehicle's tag
    ReadOk,
    /// The plate was keyed in by an operator after a failed read
    ManualUnread,
    /// Valid transit without a tag read (violation, exempt vehicle, ...)
    OtherViolationOrExempt,
}

impl ReadStatus {
    pub const ALL: [ReadStatus; 3] = [
        ReadStatus::ReadOk,
        ReadStatus::ManualUnread,
        ReadStatus::OtherViolationOrExempt,
    ];

    /// Label shown to users
    pub fn label(&self) -> &'static str {
        match self {
            ReadStatus::ReadOk => status_labels::READ_OK,
            ReadStatus::ManualUnread => status_labels::MANUAL_UNREAD,
            ReadStatus::OtherViolationOrExempt => status_labels::OTHER,
        }
    }
}

impl fmt::Display for ReadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One classified transit row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    /// Toll lane (Vía)
    pub lane: String,
    /// Time of day as `HH:MM:SS`, or the raw value / "N/A" when unreadable
    pub time: String,
    /// Transit sequence number
    pub transit: u64,
    /// Plate extracted from the observation, or "N/A"
    pub plate: String,
    /// Tag identifier extracted from the observation, or "N/A"
    pub tag_id: String,
    /// Travel direction (Sentido)
    pub direction: String,
    pub status: ReadStatus,
    /// Description text as exported
    pub description: String,
}
