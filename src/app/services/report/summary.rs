//! Status counts, effectiveness and chart proportions

use serde::{Deserialize, Serialize};

use crate::app::models::{ClassifiedRecord, ReadStatus};

/// Per-status counts over a set of records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub total: usize,
    pub read_ok: usize,
    pub manual_unread: usize,
    pub other: usize,
}

/// One slice of the status proportion chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusShare {
    pub status: ReadStatus,
    pub count: usize,
    /// Fraction of the total, between 0 and 1
    pub share: f64,
}

impl StatusSummary {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a ClassifiedRecord>,
    {
        records
            .into_iter()
            .fold(Self::default(), |mut summary, record| {
                summary.total += 1;
                match record.status {
                    ReadStatus::ReadOk => summary.read_ok += 1,
                    ReadStatus::ManualUnread => summary.manual_unread += 1,
                    ReadStatus::OtherViolationOrExempt => summary.other += 1,
                }
                summary
            })
    }

    pub fn count(&self, status: ReadStatus) -> usize {
        match status {
            ReadStatus::ReadOk => self.read_ok,
            ReadStatus::ManualUnread => self.manual_unread,
            ReadStatus::OtherViolationOrExempt => self.other,
        }
    }

    /// Tag reads as a percentage of all transits, 0 when there are none
    pub fn effectiveness(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.read_ok as f64 / self.total as f64) * 100.0
        }
    }

    /// Effectiveness for display: one decimal, or "0%" with no transits
    pub fn effectiveness_label(&self) -> String {
        if self.total == 0 {
            "0%".to_string()
        } else {
            format!("{:.1}%", self.effectiveness())
        }
    }

    /// Statuses present in the records, most frequent first
    pub fn counts_by_frequency(&self) -> Vec<(ReadStatus, usize)> {
        let mut counts: Vec<(ReadStatus, usize)> = ReadStatus::ALL
            .iter()
            .map(|status| (*status, self.count(*status)))
            .filter(|(_, count)| *count > 0)
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        counts
    }

    /// Chart slices in frequency order
    pub fn proportions(&self) -> Vec<StatusShare> {
        self.counts_by_frequency()
            .into_iter()
            .map(|(status, count)| StatusShare {
                status,
                count,
                share: count as f64 / self.total as f64,
            })
            .collect()
    }
}
