use crate::models::PublicationRecord;
use serde::{Deserialize, Serialize};

/// Open/closed series aligned by index with the records they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedSeries {
    pub years: Vec<i32>,
    pub open: Vec<u64>,
    /// `total - open_access`; negative when the data has more OA than total.
    pub closed: Vec<i64>,
}

impl ProjectedSeries {
    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Height of the stacked bar at `idx` (open + closed).
    pub fn stacked_total(&self, idx: usize) -> Option<i64> {
        Some(self.open.get(idx).copied()? as i64 + self.closed.get(idx).copied()?)
    }

    /// Largest stacked height, 0 when empty.
    pub fn max_stacked(&self) -> i64 {
        (0..self.len())
            .filter_map(|i| self.stacked_total(i))
            .max()
            .unwrap_or(0)
    }
}

/// Split records into the open-access and closed-access series.
pub fn project(records: &[PublicationRecord]) -> ProjectedSeries {
    let mut out = ProjectedSeries {
        years: Vec::with_capacity(records.len()),
        open: Vec::with_capacity(records.len()),
        closed: Vec::with_capacity(records.len()),
    };
    for r in records {
        out.years.push(r.year);
        out.open.push(r.open_access);
        out.closed.push(r.closed_access());
    }
    out
}
