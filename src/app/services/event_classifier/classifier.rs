//! Table-level classification as a fold over the row sequence

use tracing::{debug, info, warn};

use super::state::{ClassificationRules, ClassificationState, TransitRow};
use super::stats::ClassifyStats;
use crate::app::models::{CanonicalTable, ClassifiedRecord};
use crate::config::MonitorConfig;

/// Records and counters produced by one pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassificationOutcome {
    pub records: Vec<ClassifiedRecord>,
    pub stats: ClassifyStats,
}

/// Classifier for canonical Telepase tables
#[derive(Debug, Clone)]
pub struct EventClassifier {
    config: MonitorConfig,
}

impl EventClassifier {
    pub fn new(config: MonitorConfig) -> Self {
        Self { config }
    }

    /// Classify every row of a table, starting from a fresh state
    pub fn classify(&self, table: &CanonicalTable) -> ClassificationOutcome {
        self.classify_rows(table.iter_rows().map(TransitRow::from_view))
    }

    /// Classify already extracted rows in order
    pub fn classify_rows<I>(&self, rows: I) -> ClassificationOutcome
    where
        I: IntoIterator<Item = TransitRow>,
    {
        let rules = ClassificationRules::from_config(&self.config);

        let (final_state, mut outcome) = rows.into_iter().fold(
            (ClassificationState::default(), ClassificationOutcome::default()),
            |(state, mut outcome), row| {
                let step = state.step(&row, &rules);

                outcome.stats.rows_scanned += 1;
                if step.marker_seen {
                    outcome.stats.manual_markers_seen += 1;
                }
                match step.record {
                    Some(record) => {
                        outcome.stats.records_emitted += 1;
                        outcome.records.push(record);
                    }
                    None => outcome.stats.rows_skipped += 1,
                }

                (step.state, outcome)
            },
        );

        if final_state.manual_pending {
            warn!("Table ended with a manual-entry marker and no transit after it");
            outcome.stats.trailing_manual_marker = true;
        }

        debug!("Classification stats: {:?}", outcome.stats);
        info!(
            "Classified {} transits from {} rows ({} skipped)",
            outcome.stats.records_emitted, outcome.stats.rows_scanned, outcome.stats.rows_skipped
        );

        outcome
    }
}
