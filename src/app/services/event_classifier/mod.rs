//! Transit classification for Telepase exports
//!
//! Walks the canonical table in file order and emits one
//! [`ClassifiedRecord`](crate::app::models::ClassifiedRecord) per row that
//! carries a valid transit number.
//!
//! ## Architecture
//!
//! - [`state`] - the carry-flag state and its per-row transition function
//! - [`classifier`] - folds the transition over a whole table
//! - [`stats`] - counters collected during the fold
//!
//! Lane software logs a manual plate entry as its own description line,
//! usually without a transit number, just before the transit it belongs to.
//! The state carries that marker forward until the next valid transit.

pub mod classifier;
pub mod state;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use classifier::{ClassificationOutcome, EventClassifier};
pub use state::{ClassificationRules, ClassificationState, Step, TransitRow, classify_status};
pub use stats::ClassifyStats;
