//! Configuration management and validation.
//!
//! Provides the processing parameters for a single upload: how far to look
//! for the header row, which text encodings and delimiters to try, and the
//! description phrases that drive classification.

use crate::constants::{
    DEFAULT_DELIMITERS, HEADER_SCAN_ROWS, MANUAL_ENTRY_MARKER, TAG_KEYWORD,
};
use crate::{Error, Result};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::debug;

/// Text encodings tried when decoding delimited uploads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    /// Strict UTF-8, a leading byte order mark is dropped
    Utf8,
    /// ISO-8859-1, every byte maps to one code point
    Latin1,
    /// Windows code page 1252
    Windows1252,
}

impl TextEncoding {
    /// Decode bytes, returning `None` when they are not valid in this encoding
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            TextEncoding::Utf8 => {
                let body = match Encoding::for_bom(bytes) {
                    Some((encoding, bom_len)) if encoding == UTF_8 => &bytes[bom_len..],
                    _ => bytes,
                };
                UTF_8.decode_without_bom_handling_and_without_replacement(body)
            }
            TextEncoding::Latin1 => Some(encoding_rs::mem::decode_latin1(bytes)),
            TextEncoding::Windows1252 => {
                WINDOWS_1252.decode_without_bom_handling_and_without_replacement(bytes)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin-1",
            TextEncoding::Windows1252 => "cp1252",
        }
    }
}

/// Configuration for processing Telepase exports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Number of leading rows searched for the header row
    pub header_scan_rows: usize,

    /// Text encodings tried in order for delimited files
    pub text_encodings: Vec<TextEncoding>,

    /// Candidate delimiters for delimited files, in order of preference
    pub delimiter_candidates: Vec<u8>,

    /// Description phrase marking a manually typed plate
    pub manual_entry_marker: String,

    /// Description keyword marking a successful tag read
    pub tag_keyword: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            header_scan_rows: HEADER_SCAN_ROWS,
            text_encodings: vec![
                TextEncoding::Utf8,
                TextEncoding::Latin1,
                TextEncoding::Windows1252,
            ],
            delimiter_candidates: DEFAULT_DELIMITERS.to_vec(),
            manual_entry_marker: MANUAL_ENTRY_MARKER.to_string(),
            tag_keyword: TAG_KEYWORD.to_string(),
        }
    }
}

impl MonitorConfig {
    /// Override the header scan window
    pub fn with_header_scan_rows(mut self, rows: usize) -> Self {
        self.header_scan_rows = rows;
        self
    }

    /// Override the text encodings tried for delimited files
    pub fn with_text_encodings(mut self, encodings: Vec<TextEncoding>) -> Self {
        self.text_encodings = encodings;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.header_scan_rows == 0 {
            return Err(Error::configuration("header_scan_rows must be greater than 0"));
        }
        if self.text_encodings.is_empty() {
            return Err(Error::configuration("At least one text encoding is required"));
        }
        if self.delimiter_candidates.is_empty() {
            return Err(Error::configuration(
                "At least one delimiter candidate is required",
            ));
        }
        if self
            .delimiter_candidates
            .iter()
            .any(|d| !d.is_ascii() || d.is_ascii_alphanumeric() || *d == b'"')
        {
            return Err(Error::configuration(
                "Delimiter candidates must be ASCII punctuation or whitespace",
            ));
        }
        if self.manual_entry_marker.trim().is_empty() {
            return Err(Error::configuration("manual_entry_marker cannot be empty"));
        }
        if self.tag_keyword.trim().is_empty() {
            return Err(Error::configuration("tag_keyword cannot be empty"));
        }

        debug!("Configuration validated: {:?}", self);
        Ok(())
    }
}
