//! Year-range filtering and the year selector model.

use crate::models::{PublicationRecord, YearRange};
use log::debug;

/// Records whose year lies in `range` (inclusive), in input order.
/// Never fails; no match gives an empty vector.
pub fn filter_by_range(records: &[PublicationRecord], range: YearRange) -> Vec<PublicationRecord> {
    records
        .iter()
        .filter(|r| range.contains(r.year))
        .cloned()
        .collect()
}

/// Memoizes the last filter result for one render pass.
///
/// The cache is keyed on the range and on the full input records, so any change
/// to the data (breakdown included) or to the range triggers recomputation.
/// Nothing is persisted.
#[derive(Debug, Default)]
pub struct RangeFilter {
    last: Option<(CacheKey, Vec<PublicationRecord>)>,
    recomputations: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    range: YearRange,
    input: Vec<PublicationRecord>,
}

impl RangeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, records: &[PublicationRecord], range: YearRange) -> &[PublicationRecord] {
        let stale = !matches!(
            &self.last,
            Some((k, _)) if k.range == range && k.input.as_slice() == records
        );
        if stale {
            let key = CacheKey {
                range,
                input: records.to_vec(),
            };
            let filtered = filter_by_range(records, range);
            debug!(
                "range {} selects {} of {} records",
                range,
                filtered.len(),
                records.len()
            );
            self.recomputations += 1;
            self.last = Some((key, filtered));
        }
        match &self.last {
            Some((_, v)) => v,
            None => &[],
        }
    }

    /// How many times the filter actually ran.
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}

/// Which end of the range a selector edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

/// One entry of a year selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearOption {
    pub year: i32,
    pub selected: bool,
    /// Picking this year would invert the range. Shown but not selectable.
    pub enabled: bool,
}

/// Options for the `bound` selector given the current range. Every year is listed;
/// start years after `range.end()` and end years before `range.start()` are disabled.
pub fn year_options(years: &[i32], range: YearRange, bound: Bound) -> Vec<YearOption> {
    years
        .iter()
        .map(|&year| match bound {
            Bound::Start => YearOption {
                year,
                selected: year == range.start(),
                enabled: year <= range.end(),
            },
            Bound::End => YearOption {
                year,
                selected: year == range.end(),
                enabled: year >= range.start(),
            },
        })
        .collect()
}

/// Apply a selector pick. Disabled picks leave the range unchanged.
pub fn select(range: YearRange, bound: Bound, year: i32) -> YearRange {
    let moved = match bound {
        Bound::Start => range.with_start(year),
        Bound::End => range.with_end(year),
    };
    moved.unwrap_or(range)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SampleData;

    #[test]
    fn memo_skips_identical_requests() {
        let records = SampleData::records();
        let range = YearRange::new(2022, 2025).unwrap();
        let mut f = RangeFilter::new();
        assert_eq!(f.apply(&records, range).len(), 4);
        assert_eq!(f.apply(&records, range).len(), 4);
        assert_eq!(f.recomputations(), 1);

        let other = YearRange::new(2020, 2021).unwrap();
        assert_eq!(f.apply(&records, other).len(), 2);
        assert_eq!(f.recomputations(), 2);

        // same range, different data
        assert_eq!(f.apply(&records[..3], other).len(), 2);
        assert_eq!(f.recomputations(), 3);
    }

    #[test]
    fn select_ignores_inverting_picks() {
        let r = YearRange::new(2022, 2023).unwrap();
        assert_eq!(select(r, Bound::Start, 2024), r);
        assert_eq!(select(r, Bound::End, 2021), r);
        assert_eq!(select(r, Bound::End, 2025).end(), 2025);
    }
}
