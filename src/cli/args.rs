//! Command-line argument definitions for the Telepase monitor
//!
//! This module defines the CLI interface using the clap derive API.

use crate::app::services::report::LaneFilter;
use crate::config::MonitorConfig;
use crate::constants::{HEADER_SCAN_ROWS, SUPPORTED_EXTENSIONS};
use crate::{Error, Result};
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the Telepase antenna read monitor
///
/// Reads a toll-lane export and reports how many transits were read by the
/// antenna, how many needed a manual plate entry, and the overall
/// effectiveness.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "telepase-monitor",
    version,
    about = "Measure Telepase antenna read effectiveness from toll-lane exports",
    long_about = "Reads a Telepase lane export (.csv, .xls or .xlsx), finds the real header \
                  below the report boilerplate, classifies every transit as a tag read, a \
                  manual plate entry or another event, and prints summary metrics, the \
                  status proportions and the transit table."
)]
pub struct Args {
    /// Export file to analyze
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Only include these lanes (comma-separated, e.g. "1,2")
    ///
    /// Lanes are matched exactly as they appear in the Vía column.
    #[arg(short = 'l', long = "lanes", value_name = "LIST", value_delimiter = ',')]
    pub lanes: Vec<String>,

    /// Number of leading rows searched for the header row
    #[arg(long = "scan-rows", value_name = "N", default_value_t = HEADER_SCAN_ROWS)]
    pub scan_rows: usize,

    /// Skip printing the transit table
    #[arg(long = "no-table")]
    pub no_table: bool,

    /// Print only the first N rows of the transit table
    #[arg(long = "max-rows", value_name = "N")]
    pub max_rows: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Validate arguments before any file is read
    pub fn validate(&self) -> Result<()> {
        let extension = self
            .file
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(Error::configuration(format!(
                "Unsupported file '{}': expected one of {}",
                self.file.display(),
                SUPPORTED_EXTENSIONS.join(", ")
            )));
        }

        if self.scan_rows == 0 {
            return Err(Error::configuration("--scan-rows must be greater than 0"));
        }

        if self.lanes.iter().any(|lane| lane.trim().is_empty()) {
            return Err(Error::configuration("--lanes cannot contain empty entries"));
        }

        Ok(())
    }

    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Processing configuration with CLI overrides applied
    pub fn to_config(&self) -> MonitorConfig {
        MonitorConfig::default().with_header_scan_rows(self.scan_rows)
    }

    /// Lane filter selected on the command line
    pub fn lane_filter(&self) -> LaneFilter {
        if self.lanes.is_empty() {
            LaneFilter::all()
        } else {
            LaneFilter::only(self.lanes.iter().map(|lane| lane.trim().to_string()))
        }
    }
}
