//! Classification report handed to the presentation layer
//!
//! Holds the ordered records of one upload together with the diagnostics
//! gathered along the pipeline, and derives everything a dashboard needs
//! from them: status counts, effectiveness, chart proportions, the distinct
//! lanes and lane-filtered subsets. Filtering never re-runs the pipeline.

pub mod filter;
pub mod summary;
pub mod table;

pub use filter::{LaneFilter, distinct_lanes};
pub use summary::{StatusShare, StatusSummary};
pub use table::records_to_dataframe;

use polars::prelude::DataFrame;

use crate::Result;
use crate::app::models::ClassifiedRecord;
use crate::app::services::event_classifier::ClassifyStats;
use crate::app::services::tabular_loader::LoadSource;

/// Output of one pipeline run over one upload
#[derive(Debug, Clone)]
pub struct ClassificationReport {
    /// Name of the uploaded file
    pub filename: String,

    /// How the upload was decoded
    pub source: LoadSource,

    /// Index of the header row in the raw grid
    pub header_row: usize,

    /// Column names after normalization
    pub columns: Vec<String>,

    /// Classified transits in file order
    pub records: Vec<ClassifiedRecord>,

    /// Classification counters
    pub stats: ClassifyStats,
}

impl ClassificationReport {
    /// Status counts over all records
    pub fn summary(&self) -> StatusSummary {
        StatusSummary::from_records(&self.records)
    }

    /// Distinct lanes, sorted for a selection widget
    pub fn lanes(&self) -> Vec<String> {
        distinct_lanes(&self.records)
    }

    /// Records whose lane is selected by the filter, in file order
    pub fn filtered<'a>(
        &'a self,
        filter: &'a LaneFilter,
    ) -> impl Iterator<Item = &'a ClassifiedRecord> {
        self.records.iter().filter(move |record| filter.matches(record))
    }

    /// Status counts over the records selected by the filter
    pub fn filtered_summary(&self, filter: &LaneFilter) -> StatusSummary {
        StatusSummary::from_records(self.filtered(filter))
    }

    /// Tabular view of the records selected by the filter
    pub fn to_dataframe(&self, filter: &LaneFilter) -> Result<DataFrame> {
        records_to_dataframe(self.filtered(filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::ReadStatus;

    fn record(lane: &str, transit: u64, status: ReadStatus) -> ClassifiedRecord {
        ClassifiedRecord {
            lane: lane.to_string(),
            time: "12:00:00".to_string(),
            transit,
            plate: "N/A".to_string(),
            tag_id: "N/A".to_string(),
            direction: "Norte".to_string(),
            status,
            description: "Tránsito".to_string(),
        }
    }

    fn report() -> ClassificationReport {
        ClassificationReport {
            filename: "reporte.csv".to_string(),
            source: LoadSource::Delimited {
                encoding: "utf-8".to_string(),
                delimiter: ',',
            },
            header_row: 2,
            columns: vec!["Hora".to_string(), "Vía".to_string()],
            records: vec![
                record("2", 1, ReadStatus::ReadOk),
                record("1", 2, ReadStatus::ManualUnread),
                record("2", 3, ReadStatus::ReadOk),
                record("3", 4, ReadStatus::OtherViolationOrExempt),
            ],
            stats: ClassifyStats::default(),
        }
    }

    #[test]
    fn test_lane_filter_does_not_rerun_pipeline() {
        let report = report();
        let filter = LaneFilter::only(["2"]);

        let transits: Vec<u64> = report.filtered(&filter).map(|r| r.transit).collect();
        assert_eq!(transits, vec![1, 3]);

        let summary = report.filtered_summary(&filter);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.effectiveness_label(), "100.0%");

        // The full record list is untouched
        assert_eq!(report.summary().total, 4);
    }

    #[test]
    fn test_dataframe_respects_filter() {
        let report = report();
        let df = report.to_dataframe(&LaneFilter::only(["1", "3"])).unwrap();
        assert_eq!(df.height(), 2);
    }
}
