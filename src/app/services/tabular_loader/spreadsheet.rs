//! Spreadsheet decoding via calamine
//!
//! The first worksheet is read with no header assumption. Date and time cells
//! are kept as their day serial so the time formatter can render them.
//! Leading blank rows are restored only up to the header scan window, so a
//! stray far-away cell cannot inflate the grid.

use calamine::{Data, Range, Reader, Xls, Xlsx, open_workbook_auto_from_rs};
use std::io::Cursor;

use super::FileKind;
use crate::app::models::{CellValue, RawGrid};

/// Spreadsheet engines, tried in the order returned by [`SpreadsheetEngine::attempts_for`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetEngine {
    /// Legacy BIFF workbooks (.xls)
    Xls,
    /// Office Open XML workbooks (.xlsx)
    Xlsx,
    /// Format detected from the content
    AutoDetect,
}

impl SpreadsheetEngine {
    /// Extension-specific engine first, then the default engine
    pub fn attempts_for(kind: FileKind) -> Vec<SpreadsheetEngine> {
        match kind {
            FileKind::Xls => vec![SpreadsheetEngine::Xls, SpreadsheetEngine::AutoDetect],
            FileKind::Xlsx => vec![SpreadsheetEngine::Xlsx, SpreadsheetEngine::AutoDetect],
            FileKind::Csv => Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SpreadsheetEngine::Xls => "xls",
            SpreadsheetEngine::Xlsx => "xlsx",
            SpreadsheetEngine::AutoDetect => "auto",
        }
    }

    /// Read the first worksheet into a grid, restoring at most
    /// `max_leading_rows` blank rows above the first used cell
    pub fn read(
        &self,
        bytes: &[u8],
        max_leading_rows: usize,
    ) -> std::result::Result<RawGrid, String> {
        let cursor = Cursor::new(bytes);
        let range = match self {
            SpreadsheetEngine::Xls => {
                let workbook = Xls::new(cursor).map_err(|e| e.to_string())?;
                first_sheet(workbook)?
            }
            SpreadsheetEngine::Xlsx => {
                let workbook = Xlsx::new(cursor).map_err(|e| e.to_string())?;
                first_sheet(workbook)?
            }
            SpreadsheetEngine::AutoDetect => {
                let workbook = open_workbook_auto_from_rs(cursor).map_err(|e| e.to_string())?;
                first_sheet(workbook)?
            }
        };

        Ok(range_to_grid(&range, max_leading_rows))
    }
}

fn first_sheet<'a, R>(mut workbook: R) -> std::result::Result<Range<Data>, String>
where
    R: Reader<Cursor<&'a [u8]>>,
    R::Error: std::fmt::Display,
{
    workbook
        .worksheet_range_at(0)
        .ok_or_else(|| "Workbook has no worksheets".to_string())?
        .map_err(|e| e.to_string())
}

fn range_to_grid(range: &Range<Data>, max_leading_rows: usize) -> RawGrid {
    // Ranges start at the first used cell; pad back to A1 so row indices
    // match what a user sees in the sheet. Rows past the cap are never
    // scanned for a header, so a used range starting there stays outside
    // the window either way.
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let leading_rows = (start_row as usize).min(max_leading_rows);
    let leading_cols = vec![CellValue::Empty; start_col as usize];

    let mut rows: Vec<Vec<CellValue>> = vec![Vec::new(); leading_rows];
    for row in range.rows() {
        let mut cells = leading_cols.clone();
        cells.extend(row.iter().map(convert_cell));
        rows.push(cells);
    }

    RawGrid::new(rows)
}

/// Convert a calamine cell to an untyped cell value
pub fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(text) => CellValue::from_text(text),
        Data::Float(value) => CellValue::Number(*value),
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Bool(value) => CellValue::Text(value.to_string()),
        Data::DateTime(value) => CellValue::Number(value.as_f64()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => CellValue::from_text(text),
        Data::Error(_) => CellValue::Empty,
    }
}
