//! Delimited text decoding with delimiter sniffing
//!
//! Each attempt decodes the bytes with one text encoding, sniffs the
//! delimiter over a sample of records and reads every record without a header.

use csv::ReaderBuilder;
use std::collections::HashMap;
use tracing::debug;

use crate::app::models::{CellValue, RawGrid};
use crate::config::TextEncoding;
use crate::constants::SNIFF_SAMPLE_ROWS;

/// One encoding attempt over a set of candidate delimiters
#[derive(Debug, Clone)]
pub struct DelimitedAttempt<'a> {
    encoding: TextEncoding,
    candidates: &'a [u8],
}

impl<'a> DelimitedAttempt<'a> {
    pub fn new(encoding: TextEncoding, candidates: &'a [u8]) -> Self {
        Self {
            encoding,
            candidates,
        }
    }

    /// Decode and parse the bytes, returning the grid and the delimiter used
    pub fn read(&self, bytes: &[u8]) -> std::result::Result<(RawGrid, u8), String> {
        let text = self
            .encoding
            .decode(bytes)
            .ok_or_else(|| format!("bytes are not valid {}", self.encoding.name()))?;

        let delimiter = sniff_delimiter(&text, self.candidates)
            .ok_or_else(|| "could not determine delimiter".to_string())?;
        debug!(
            "Sniffed delimiter {:?} using {}",
            delimiter as char,
            self.encoding.name()
        );

        let grid = parse_records(&text, delimiter)?;
        Ok((grid, delimiter))
    }
}

/// Pick the candidate delimiter that splits the most sampled records consistently
///
/// For each candidate the sampled records with more than one field are
/// grouped by field count; the candidate whose most common count covers the
/// most records wins, ties going to the wider split and then to the earlier
/// candidate. Returns `None` when no candidate splits any record.
pub fn sniff_delimiter(text: &str, candidates: &[u8]) -> Option<u8> {
    let mut best: Option<(u8, usize, usize)> = None;

    for &delimiter in candidates {
        let Some((consistent_rows, field_count)) = score_delimiter(text, delimiter) else {
            continue;
        };

        let better = match best {
            None => true,
            Some((_, best_rows, best_fields)) => {
                (consistent_rows, field_count) > (best_rows, best_fields)
            }
        };
        if better {
            best = Some((delimiter, consistent_rows, field_count));
        }
    }

    best.map(|(delimiter, _, _)| delimiter)
}

/// Rows sharing the modal field count, and that count
fn score_delimiter(text: &str, delimiter: u8) -> Option<(usize, usize)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut count_freq: HashMap<usize, usize> = HashMap::new();
    for record in reader.records().take(SNIFF_SAMPLE_ROWS) {
        let Ok(record) = record else {
            return None;
        };
        if record.len() > 1 {
            *count_freq.entry(record.len()).or_insert(0) += 1;
        }
    }

    count_freq
        .into_iter()
        .map(|(fields, rows)| (rows, fields))
        .max()
}

fn parse_records(text: &str, delimiter: u8) -> std::result::Result<RawGrid, String> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| format!("record {}: {}", index + 1, e))?;
        rows.push(record.iter().map(CellValue::from_text).collect());
    }

    Ok(RawGrid::new(rows))
}
