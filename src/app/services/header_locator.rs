//! Header row detection for Telepase exports
//!
//! Exports carry a variable amount of report boilerplate (titles, station
//! names, date ranges) above the real header. The header is the first row in
//! the scan window whose text contains the anchor token "hora" together with
//! one of the companion tokens. First match wins; there is no scoring.

use tracing::{debug, warn};

use crate::app::models::{CellValue, FramedTable, RawGrid};
use crate::constants::{HEADER_ANCHOR_TOKEN, HEADER_COMPANION_TOKENS};
use crate::{Error, Result};

/// Lower-cased text of a whole row, cells joined by spaces
pub fn row_text(row: &[CellValue]) -> String {
    row.iter()
        .map(|cell| cell.to_string().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check whether a row looks like the export header
pub fn is_header_row(row: &[CellValue]) -> bool {
    let text = row_text(row);
    text.contains(HEADER_ANCHOR_TOKEN)
        && HEADER_COMPANION_TOKENS
            .iter()
            .any(|token| text.contains(token))
}

/// Index of the header row within the first `scan_rows` rows
pub fn find_header_index(grid: &RawGrid, scan_rows: usize) -> Option<usize> {
    grid.rows()
        .iter()
        .take(scan_rows)
        .position(|row| is_header_row(row))
}

/// Promote the header row to column names and keep the rows below it
pub fn locate_header(grid: &RawGrid, scan_rows: usize) -> Result<FramedTable> {
    let Some(header_idx) = find_header_index(grid, scan_rows) else {
        warn!(
            "No header row found in the first {} of {} rows",
            scan_rows.min(grid.len()),
            grid.len()
        );
        return Err(Error::header_not_found(scan_rows));
    };

    let header_row = &grid.rows()[header_idx];
    let columns: Vec<String> = header_row.iter().map(|cell| cell.to_string()).collect();
    let rows = grid.rows()[header_idx + 1..].to_vec();

    debug!(
        "Header found at row {} with columns {:?}; {} data rows follow",
        header_idx,
        columns,
        rows.len()
    );

    Ok(FramedTable {
        header_idx,
        columns,
        rows,
    })
}
