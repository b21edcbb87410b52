//! Tabular loader for Telepase export uploads
//!
//! Turns the raw bytes of an upload into an untyped [`RawGrid`]. No header is
//! assumed at this stage: title and metadata rows are kept as ordinary rows so
//! the header locator can search for the real header later.
//!
//! ## Architecture
//!
//! Both file families are read with an ordered list of attempts, stopping at
//! the first one that succeeds:
//! - [`spreadsheet`] - extension-specific engine, then calamine auto-detection
//! - [`delimited`] - each configured text encoding with delimiter sniffing

pub mod delimited;
pub mod spreadsheet;

#[cfg(test)]
pub mod tests;

use std::path::Path;
use tracing::{debug, info};

use crate::app::models::RawGrid;
use crate::config::MonitorConfig;
use crate::constants::SUPPORTED_EXTENSIONS;
use crate::{Error, Result};

pub use delimited::{DelimitedAttempt, sniff_delimiter};
pub use spreadsheet::SpreadsheetEngine;

/// Kind of upload, decided from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Xls,
    Xlsx,
    Csv,
}

impl FileKind {
    /// Detect the file kind from a filename, case-insensitively
    pub fn from_filename(filename: &str) -> Result<Self> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "xls" => Ok(FileKind::Xls),
            "xlsx" => Ok(FileKind::Xlsx),
            "csv" => Ok(FileKind::Csv),
            other => Err(Error::load(
                filename,
                format!(
                    "Unsupported file type '{}' (expected one of: {})",
                    other,
                    SUPPORTED_EXTENSIONS.join(", ")
                ),
            )),
        }
    }

    pub fn is_spreadsheet(&self) -> bool {
        matches!(self, FileKind::Xls | FileKind::Xlsx)
    }
}

/// How a grid was decoded, kept for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    Spreadsheet { engine: SpreadsheetEngine },
    Delimited { encoding: String, delimiter: char },
}

impl std::fmt::Display for LoadSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadSource::Spreadsheet { engine } => write!(f, "spreadsheet ({})", engine.name()),
            LoadSource::Delimited {
                encoding,
                delimiter,
            } => write!(f, "delimited text ({}, {:?})", encoding, delimiter),
        }
    }
}

/// Loaded grid with the strategy that produced it
#[derive(Debug, Clone)]
pub struct LoadedGrid {
    pub grid: RawGrid,
    pub source: LoadSource,
}

/// Loader that tries each configured strategy in order
#[derive(Debug, Clone)]
pub struct TabularLoader {
    config: MonitorConfig,
}

impl TabularLoader {
    pub fn new(config: MonitorConfig) -> Self {
        Self { config }
    }

    /// Load an upload into a raw grid
    pub fn load(&self, bytes: &[u8], filename: &str) -> Result<LoadedGrid> {
        let kind = FileKind::from_filename(filename)?;
        info!(
            "Loading '{}' ({} bytes) as {:?}",
            filename,
            bytes.len(),
            kind
        );

        if bytes.is_empty() {
            return Err(Error::load(filename, "File is empty"));
        }

        let loaded = if kind.is_spreadsheet() {
            self.load_spreadsheet(bytes, filename, kind)?
        } else {
            self.load_delimited(bytes, filename)?
        };

        debug!(
            "Loaded {} rows x {} columns via {}",
            loaded.grid.len(),
            loaded.grid.width(),
            loaded.source
        );
        Ok(loaded)
    }

    fn load_spreadsheet(&self, bytes: &[u8], filename: &str, kind: FileKind) -> Result<LoadedGrid> {
        let mut failures = Vec::new();

        for engine in SpreadsheetEngine::attempts_for(kind) {
            match engine.read(bytes, self.config.header_scan_rows) {
                Ok(grid) => {
                    return Ok(LoadedGrid {
                        grid,
                        source: LoadSource::Spreadsheet { engine },
                    });
                }
                Err(reason) => {
                    debug!("Engine {} failed for '{}': {}", engine.name(), filename, reason);
                    failures.push(format!("{}: {}", engine.name(), reason));
                }
            }
        }

        Err(Error::load(
            filename,
            format!(
                "No spreadsheet engine could read the file. Make sure it is not corrupt ({})",
                failures.join("; ")
            ),
        ))
    }

    fn load_delimited(&self, bytes: &[u8], filename: &str) -> Result<LoadedGrid> {
        let mut failures = Vec::new();

        for &encoding in &self.config.text_encodings {
            let attempt = DelimitedAttempt::new(encoding, &self.config.delimiter_candidates);
            match attempt.read(bytes) {
                Ok((grid, delimiter)) => {
                    return Ok(LoadedGrid {
                        grid,
                        source: LoadSource::Delimited {
                            encoding: encoding.name().to_string(),
                            delimiter: delimiter as char,
                        },
                    });
                }
                Err(reason) => {
                    debug!(
                        "Encoding {} failed for '{}': {}",
                        encoding.name(),
                        filename,
                        reason
                    );
                    failures.push(format!("{}: {}", encoding.name(), reason));
                }
            }
        }

        Err(Error::load(
            filename,
            format!(
                "No text encoding could read the file. Make sure it is not corrupt ({})",
                failures.join("; ")
            ),
        ))
    }
}
