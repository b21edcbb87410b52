//! Telepase Monitor Library
//!
//! A Rust library for reading toll-lane transponder ("Telepase") export files
//! and measuring how often the lane antenna read the vehicle's tag.
//!
//! This library provides tools for:
//! - Loading spreadsheet (.xls/.xlsx) and delimited text (.csv) exports
//!   into an untyped grid, trying several engines and text encodings
//! - Locating the real header row hidden below report boilerplate
//! - Normalizing locale and spelling variants of column names
//! - Classifying every transit as a tag read, a manual entry or another event
//! - Summarizing read effectiveness and filtering the result by lane

pub mod config;
pub mod constants;
pub mod processor;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod annotation_extractor;
        pub mod column_normalizer;
        pub mod event_classifier;
        pub mod header_locator;
        pub mod report;
        pub mod tabular_loader;
        pub mod time_formatter;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{CellValue, ClassifiedRecord, RawGrid, ReadStatus};
pub use app::services::report::{ClassificationReport, LaneFilter, StatusSummary};
pub use config::MonitorConfig;
pub use processor::TelepaseProcessor;

/// Result type alias for the Telepase monitor
pub type Result<T> = std::result::Result<T, Error>;

/// Stable error categories reported at the upload boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Load,
    HeaderNotFound,
    RequiredColumnMissing,
    EmptyResult,
    Io,
    Configuration,
    Table,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Load => "LoadError",
            ErrorKind::HeaderNotFound => "HeaderNotFoundError",
            ErrorKind::RequiredColumnMissing => "RequiredColumnMissingError",
            ErrorKind::EmptyResult => "EmptyResultError",
            ErrorKind::Io => "IoError",
            ErrorKind::Configuration => "ConfigurationError",
            ErrorKind::Table => "TableError",
        };
        f.write_str(name)
    }
}

/// Error types for Telepase export processing
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The upload could not be decoded by any engine or text encoding
    #[error("Could not read file '{file}': {message}")]
    Load { file: String, message: String },

    /// No row in the scan window looked like the export header
    #[error("File was read but no 'Hora'/'Vía' header row was found in the first {scanned_rows} rows")]
    HeaderNotFound { scanned_rows: usize },

    /// Descripción or Tránsito is absent after column normalization
    #[error("Required columns not found: {missing:?}. Available: {available:?}")]
    RequiredColumnMissing {
        missing: Vec<String>,
        available: Vec<String>,
    },

    /// The table parsed but no row carried a valid transit number
    #[error("No valid transits found in file '{file}'")]
    EmptyResult { file: String },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Building the tabular view failed
    #[error("Table view error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl Error {
    /// Create a load error for an upload
    pub fn load(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Load {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a header not found error
    pub fn header_not_found(scanned_rows: usize) -> Self {
        Self::HeaderNotFound { scanned_rows }
    }

    /// Create a required column missing error listing the available columns
    pub fn required_column_missing(missing: Vec<String>, available: Vec<String>) -> Self {
        Self::RequiredColumnMissing { missing, available }
    }

    /// Create an empty result error
    pub fn empty_result(file: impl Into<String>) -> Self {
        Self::EmptyResult { file: file.into() }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Category of this error for reporting at the upload boundary
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Load { .. } => ErrorKind::Load,
            Self::HeaderNotFound { .. } => ErrorKind::HeaderNotFound,
            Self::RequiredColumnMissing { .. } => ErrorKind::RequiredColumnMissing,
            Self::EmptyResult { .. } => ErrorKind::EmptyResult,
            Self::Io { .. } => ErrorKind::Io,
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::Polars(_) => ErrorKind::Table,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
