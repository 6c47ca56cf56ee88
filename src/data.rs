//! Record sources and the immutable [`DataStore`] built from them.
//!
//! Rendering code only ever sees a `DataStore`; where the records came from
//! (the built-in sample, a JSON file, something else) is behind [`DataProvider`].

use crate::models::{PublicationRecord, YearRange};
use anyhow::{Context, Result};
use log::{debug, info};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Supplies publication records once, at store construction time.
pub trait DataProvider {
    fn load(&self) -> Result<Vec<PublicationRecord>>;

    /// Short human-readable origin, used in logs.
    fn describe(&self) -> String;
}

/// Built-in illustrative dataset covering 2020–2025.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleData;

impl SampleData {
    pub fn records() -> Vec<PublicationRecord> {
        // (year, total, oa, [Green, Diamond, Gold, Hybrid, Bronze, Other,
        //  Diamond+Green, Gold+Green, Hybrid+Green, Bronze+Green, Other+Green])
        let rows: [(i32, u64, u64, [u64; 11]); 6] = [
            (2020, 380, 190, [35, 20, 40, 25, 15, 10, 10, 15, 10, 5, 5]),
            (2021, 440, 240, [45, 30, 50, 25, 20, 10, 15, 25, 10, 5, 5]),
            (2022, 500, 300, [50, 40, 60, 30, 20, 10, 20, 30, 20, 10, 10]),
            (2023, 620, 450, [60, 55, 80, 40, 25, 15, 45, 60, 35, 20, 15]),
            (2024, 750, 580, [70, 90, 110, 50, 30, 20, 60, 70, 40, 25, 15]),
            (2025, 400, 310, [40, 50, 60, 30, 15, 10, 30, 40, 20, 15, 10]),
        ];
        const LABELS: [&str; 11] = [
            "Green",
            "Diamond",
            "Gold",
            "Hybrid",
            "Bronze",
            "Other",
            "Diamond,Green",
            "Gold,Green",
            "Hybrid,Green",
            "Bronze,Green",
            "Other,Green",
        ];
        rows.into_iter()
            .map(|(year, total, oa, counts)| {
                LABELS
                    .iter()
                    .zip(counts)
                    .fold(PublicationRecord::new(year, total, oa), |r, (label, n)| {
                        r.with_category(label, n)
                    })
            })
            .collect()
    }
}

impl DataProvider for SampleData {
    fn load(&self) -> Result<Vec<PublicationRecord>> {
        Ok(Self::records())
    }

    fn describe(&self) -> String {
        "built-in sample".to_string()
    }
}

/// JSON array of records on disk.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl DataProvider for JsonFileProvider {
    fn load(&self) -> Result<Vec<PublicationRecord>> {
        crate::storage::load_json(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Why a set of records cannot back a [`DataStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("year {0} appears more than once")]
    DuplicateYear(i32),
    #[error("year {year}: open-access count {open_access} exceeds total {total}")]
    OpenAccessExceedsTotal {
        year: i32,
        total: u64,
        open_access: u64,
    },
    #[error("year {year}: total {total} is too large")]
    TotalTooLarge { year: i32, total: u64 },
    #[error("year {0} is not in the data")]
    YearNotInData(i32),
}

/// Largest count the signed closed-access series can carry.
const MAX_COUNT: u64 = i64::MAX as u64;

/// Check the invariants that hand-authored data satisfies by construction but
/// external data might not: unique years, `open_access <= total` and
/// `total <= i64::MAX`.
pub fn validate(records: &[PublicationRecord]) -> std::result::Result<(), DataError> {
    let mut seen = BTreeSet::new();
    for r in records {
        if !seen.insert(r.year) {
            return Err(DataError::DuplicateYear(r.year));
        }
        if r.total > MAX_COUNT {
            return Err(DataError::TotalTooLarge {
                year: r.year,
                total: r.total,
            });
        }
        if r.open_access > r.total {
            return Err(DataError::OpenAccessExceedsTotal {
                year: r.year,
                total: r.total,
                open_access: r.open_access,
            });
        }
    }
    Ok(())
}

/// Immutable, validated, ordered sequence of yearly records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataStore {
    records: Vec<PublicationRecord>,
}

impl DataStore {
    pub fn new(records: Vec<PublicationRecord>) -> std::result::Result<Self, DataError> {
        validate(&records)?;
        Ok(Self { records })
    }

    pub fn from_provider(provider: &dyn DataProvider) -> Result<Self> {
        let records = provider
            .load()
            .with_context(|| format!("loading records from {}", provider.describe()))?;
        debug!("validating {} records", records.len());
        let store = Self::new(records)
            .with_context(|| format!("invalid records in {}", provider.describe()))?;
        info!(
            "loaded {} yearly records from {}",
            store.records.len(),
            provider.describe()
        );
        Ok(store)
    }

    /// Store over the built-in sample.
    pub fn sample() -> Self {
        Self {
            records: SampleData::records(),
        }
    }

    /// Built-in sample when `path` is `None`, otherwise the JSON file.
    pub fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_provider(&JsonFileProvider::new(p)),
            None => Self::from_provider(&SampleData),
        }
    }

    pub fn records(&self) -> &[PublicationRecord] {
        &self.records
    }

    /// Years in store order.
    pub fn years(&self) -> Vec<i32> {
        self.records.iter().map(|r| r.year).collect()
    }

    /// Smallest range covering every year, `None` when empty.
    pub fn full_range(&self) -> Option<YearRange> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        YearRange::new(min, max).ok()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Accept `range` only if both endpoints are years of this store.
    pub fn check_range(&self, range: YearRange) -> std::result::Result<YearRange, DataError> {
        for year in [range.start(), range.end()] {
            if !self.records.iter().any(|r| r.year == year) {
                return Err(DataError::YearNotInData(year));
            }
        }
        Ok(range)
    }
}
