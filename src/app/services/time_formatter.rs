//! Time-of-day formatting for the Hora column
//!
//! Spreadsheets store times as a fraction of a day (possibly on top of a
//! date serial), text exports as strings in a few layouts. The result is
//! always displayable: `HH:MM:SS` when the value can be read as a time, the
//! raw value otherwise, and "N/A" for an empty cell.

use chrono::{NaiveDateTime, NaiveTime, Timelike};

use crate::app::models::CellValue;
use crate::constants::{NOT_AVAILABLE, SECONDS_PER_DAY};

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
];

/// Render a Hora cell for display
pub fn format_time(cell: &CellValue) -> String {
    match parse_time(cell) {
        Some(time) => time.format("%H:%M:%S").to_string(),
        None => match cell {
            CellValue::Empty => NOT_AVAILABLE.to_string(),
            other => other.to_string(),
        },
    }
}

/// Interpret a cell as a time of day
pub fn parse_time(cell: &CellValue) -> Option<NaiveTime> {
    match cell {
        CellValue::Empty => None,
        CellValue::Number(value) => time_from_day_fraction(*value),
        CellValue::Text(text) => parse_time_text(text.trim()),
    }
}

/// Time of day from a day serial, using only its fractional part
///
/// Rounds to the nearest second; a value that rounds up to midnight wraps to
/// `00:00:00`.
pub fn time_from_day_fraction(value: f64) -> Option<NaiveTime> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let seconds = (value.fract() * SECONDS_PER_DAY).round() as u32 % SECONDS_PER_DAY as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)
}

fn parse_time_text(text: &str) -> Option<NaiveTime> {
    if text.is_empty() {
        return None;
    }

    if let Ok(value) = text.parse::<f64>() {
        return time_from_day_fraction(value);
    }

    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|datetime| datetime.time())
        })
        .map(|time| time.with_nanosecond(0).unwrap_or(time))
}
