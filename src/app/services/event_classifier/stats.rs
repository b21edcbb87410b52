//! Classification statistics

use serde::{Deserialize, Serialize};

/// Counters collected during one classification pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyStats {
    /// Data rows examined
    pub rows_scanned: usize,

    /// Rows that produced a record
    pub records_emitted: usize,

    /// Rows without a valid transit number (log lines, blanks, summaries)
    pub rows_skipped: usize,

    /// Rows carrying the manual-entry marker phrase
    pub manual_markers_seen: usize,

    /// A manual marker was still pending when the table ended
    pub trailing_manual_marker: bool,
}

impl ClassifyStats {
    /// Share of scanned rows that produced a record, as a percentage
    pub fn emission_rate(&self) -> f64 {
        if self.rows_scanned == 0 {
            0.0
        } else {
            (self.records_emitted as f64 / self.rows_scanned as f64) * 100.0
        }
    }
}
