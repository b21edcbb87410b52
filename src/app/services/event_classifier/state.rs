//! Carry-flag state and the per-row transition
//!
//! The only state shared between rows is `manual_pending`. It is set by a
//! manual-entry marker row, survives any number of rows without a valid
//! transit number and is cleared by the next emitted record.

use crate::app::models::{CellValue, ClassifiedRecord, ReadStatus, RowView};
use crate::app::services::annotation_extractor::extract_annotation;
use crate::app::services::time_formatter::format_time;
use crate::config::MonitorConfig;
use crate::constants::columns;

/// Phrases that drive classification
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRules<'a> {
    pub manual_entry_marker: &'a str,
    pub tag_keyword: &'a str,
}

impl<'a> ClassificationRules<'a> {
    pub fn from_config(config: &'a MonitorConfig) -> Self {
        Self {
            manual_entry_marker: &config.manual_entry_marker,
            tag_keyword: &config.tag_keyword,
        }
    }
}

/// Fields of one data row needed for classification
///
/// Missing columns read as empty cells; a row is never rejected for lacking
/// an optional field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransitRow {
    pub description: String,
    pub transit: CellValue,
    pub lane: String,
    pub direction: String,
    pub observation: Option<String>,
    pub time: CellValue,
}

impl TransitRow {
    pub fn from_view(row: RowView<'_>) -> Self {
        Self {
            description: row.text(columns::DESCRIPCION),
            transit: row.get(columns::TRANSITO).clone(),
            lane: row.text_or_placeholder(columns::VIA),
            direction: row.text_or_placeholder(columns::SENTIDO),
            observation: row
                .get(columns::OBSERVACION)
                .as_text()
                .map(|text| text.into_owned()),
            time: row.get(columns::HORA).clone(),
        }
    }

    /// Transit number when the row is a real transaction line
    ///
    /// The raw value must be a finite, non-negative number; it is truncated
    /// to an integer.
    pub fn transit_number(&self) -> Option<u64> {
        self.transit
            .as_number()
            .filter(|value| *value >= 0.0)
            .map(|value| value.trunc() as u64)
    }
}

/// Result of feeding one row to the state machine
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub state: ClassificationState,
    pub record: Option<ClassifiedRecord>,
    pub marker_seen: bool,
}

/// State carried across rows within one classification pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClassificationState {
    pub manual_pending: bool,
}

impl ClassificationState {
    /// Apply one row
    ///
    /// A marker row sets the pending flag before its own validity check, so a
    /// marker row that also carries a transit number is itself classified as
    /// manual. The flag is cleared after any emitted record.
    pub fn step(self, row: &TransitRow, rules: &ClassificationRules<'_>) -> Step {
        let marker_seen = row.description.contains(rules.manual_entry_marker);
        let manual_pending = self.manual_pending || marker_seen;

        let Some(transit) = row.transit_number() else {
            return Step {
                state: ClassificationState { manual_pending },
                record: None,
                marker_seen,
            };
        };

        let annotation = extract_annotation(row.observation.as_deref());
        let record = ClassifiedRecord {
            lane: row.lane.clone(),
            time: format_time(&row.time),
            transit,
            plate: annotation.plate,
            tag_id: annotation.tag_id,
            direction: row.direction.clone(),
            status: classify_status(manual_pending, &row.description, rules.tag_keyword),
            description: row.description.clone(),
        };

        Step {
            state: ClassificationState::default(),
            record: Some(record),
            marker_seen,
        }
    }
}

/// Status of a valid transit; a pending manual marker outranks the tag keyword
pub fn classify_status(manual_pending: bool, description: &str, tag_keyword: &str) -> ReadStatus {
    if manual_pending {
        ReadStatus::ManualUnread
    } else if description.contains(tag_keyword) {
        ReadStatus::ReadOk
    } else {
        ReadStatus::OtherViolationOrExempt
    }
}
