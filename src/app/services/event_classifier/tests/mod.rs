//! Test utilities for transit classification
//!
//! Row builders for the shapes seen in lane exports: manual-entry marker lines
//! without a transit number, tag reads, violations and blank separator rows.

use crate::app::models::CellValue;
use crate::app::services::event_classifier::TransitRow;
use crate::constants::MANUAL_ENTRY_MARKER;


/// Valid transit row with the given description
pub fn transit(number: f64, description: &str) -> TransitRow {
    TransitRow {
        description: description.to_string(),
        transit: CellValue::Number(number),
        lane: "1".to_string(),
        direction: "Norte".to_string(),
        observation: None,
        time: CellValue::Number(0.5),
    }
}

/// Tag read transit row
pub fn tag_read(number: f64) -> TransitRow {
    transit(number, "Tránsito TAG")
}

/// Manual-entry marker line without a transit number
pub fn marker() -> TransitRow {
    TransitRow {
        description: MANUAL_ENTRY_MARKER.to_string(),
        ..Default::default()
    }
}

/// Log line that is not a transaction
pub fn skip_row(description: &str) -> TransitRow {
    TransitRow {
        description: description.to_string(),
        transit: CellValue::Text("---".to_string()),
        ..Default::default()
    }
}
