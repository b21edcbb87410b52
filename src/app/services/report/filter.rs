//! Lane selection over classified records

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::app::models::ClassifiedRecord;

/// Lane subset chosen by the user; an unrestricted filter selects everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaneFilter {
    selected: Option<BTreeSet<String>>,
}

impl LaneFilter {
    /// Filter that keeps every record
    pub fn all() -> Self {
        Self { selected: None }
    }

    /// Filter that keeps only the given lanes
    pub fn only<I, S>(lanes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected: Some(lanes.into_iter().map(Into::into).collect()),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.selected.is_none()
    }

    pub fn matches(&self, record: &ClassifiedRecord) -> bool {
        match &self.selected {
            None => true,
            Some(lanes) => lanes.contains(&record.lane),
        }
    }
}

/// Distinct lane values, numeric lanes first in numeric order
pub fn distinct_lanes(records: &[ClassifiedRecord]) -> Vec<String> {
    let mut lanes: Vec<String> = records
        .iter()
        .map(|record| record.lane.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    lanes.sort_by(|a, b| compare_lanes(a, b));
    lanes
}

fn compare_lanes(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
