//! Processing pipeline for a single upload.
//!
//! Orchestrates the full Telepase workflow: tabular loading, header
//! location, column normalization and transit classification. Every call
//! starts from the uploaded bytes alone, so running it again on the same file
//! yields the same report.

use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use crate::app::services::column_normalizer::normalize_columns;
use crate::app::services::event_classifier::EventClassifier;
use crate::app::services::header_locator::locate_header;
use crate::app::services::report::ClassificationReport;
use crate::app::services::tabular_loader::TabularLoader;
use crate::config::MonitorConfig;
use crate::{Error, Result};

/// Main processor for Telepase export uploads
#[derive(Debug, Clone)]
pub struct TelepaseProcessor {
    config: MonitorConfig,
    loader: TabularLoader,
    classifier: EventClassifier,
}

impl TelepaseProcessor {
    /// Create a processor after validating the configuration
    pub fn new(config: MonitorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            loader: TabularLoader::new(config.clone()),
            classifier: EventClassifier::new(config.clone()),
            config,
        })
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Run the whole pipeline over an upload
    pub fn process_bytes(&self, bytes: &[u8], filename: &str) -> Result<ClassificationReport> {
        let start_time = Instant::now();

        let loaded = self.loader.load(bytes, filename)?;
        let framed = locate_header(&loaded.grid, self.config.header_scan_rows)?;
        let header_row = framed.header_idx;
        let table = normalize_columns(framed)?;
        let outcome = self.classifier.classify(&table);

        if outcome.records.is_empty() {
            return Err(Error::empty_result(filename));
        }

        info!(
            "Processed '{}': {} transits (header at row {}, {}) in {:?}",
            filename,
            outcome.records.len(),
            header_row,
            loaded.source,
            start_time.elapsed()
        );

        Ok(ClassificationReport {
            filename: filename.to_string(),
            source: loaded.source,
            header_row,
            columns: table.columns().to_vec(),
            records: outcome.records,
            stats: outcome.stats,
        })
    }

    /// Read a file from disk and run the pipeline over it
    pub fn process_file(&self, path: &Path) -> Result<ClassificationReport> {
        let bytes = std::fs::read(path)
            .map_err(|e| Error::io(format!("Failed to read file {}", path.display()), e))?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        debug!("Read {} bytes from {}", bytes.len(), path.display());
        self.process_bytes(&bytes, &filename)
    }
}
