use crate::models::PublicationRecord;
use crate::tooltip::oa_percentage;
use serde::{Deserialize, Serialize};

/// Aggregate figures over a selection of years.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RangeSummary {
    pub years: usize,
    pub total: u64,
    pub open_access: u64,
    /// Sum of per-year `total - open_access` (may be negative on unreconciled data).
    pub closed_access: i64,
    /// Overall OA share in percent; `None` when the summed total is zero.
    pub oa_share: Option<f64>,
    /// Year with the highest OA share (first one on ties); `None` if no year has a total.
    pub peak_share_year: Option<i32>,
}

/// Summarize `records` (typically the output of the range filter).
pub fn range_summary(records: &[PublicationRecord]) -> RangeSummary {
    let total: u64 = records.iter().map(|r| r.total).sum();
    let open_access: u64 = records.iter().map(|r| r.open_access).sum();
    let closed_access: i64 = records.iter().map(|r| r.closed_access()).sum();

    let mut peak: Option<(i32, f64)> = None;
    for r in records {
        if let Some(share) = oa_percentage(r.open_access, r.total)
            && peak.is_none_or(|(_, best)| share > best)
        {
            peak = Some((r.year, share));
        }
    }

    RangeSummary {
        years: records.len(),
        total,
        open_access,
        closed_access,
        oa_share: oa_percentage(open_access, total),
        peak_share_year: peak.map(|(y, _)| y),
    }
}
