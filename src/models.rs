use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Separator used by compound access-category labels such as `"Gold,Green"`.
pub const CATEGORY_SEPARATOR: char = ',';

/// One year of publication counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicationRecord {
    #[serde(deserialize_with = "de_year_from_string_or_number")]
    pub year: i32,
    pub total: u64,
    /// Open-access count. Expected to be `<= total`, see [`crate::data::DataStore`].
    #[serde(alias = "oa")]
    pub open_access: u64,
    /// Per-category counts. Not reconciled with `open_access`.
    #[serde(default, alias = "details")]
    pub breakdown: CategoryBreakdown,
}

impl PublicationRecord {
    pub fn new(year: i32, total: u64, open_access: u64) -> Self {
        Self {
            year,
            total,
            open_access,
            breakdown: CategoryBreakdown::default(),
        }
    }

    /// Builder-style helper used by the sample data and tests.
    pub fn with_category(mut self, label: &str, count: u64) -> Self {
        self.breakdown.push(CategoryLabel::parse(label), count);
        self
    }

    /// `total - open_access`, not clamped at zero: a record with more OA than total
    /// yields a negative value. Counts beyond `i64::MAX` saturate.
    pub fn closed_access(&self) -> i64 {
        let total = i64::try_from(self.total).unwrap_or(i64::MAX);
        let open = i64::try_from(self.open_access).unwrap_or(i64::MAX);
        total.saturating_sub(open)
    }
}

/// Serde helper: some exports encode years as strings (`"2022"`); accept both.
fn de_year_from_string_or_number<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct YearVisitor;

    impl<'de> Visitor<'de> for YearVisitor {
        type Value = i32;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a string or integer representing a calendar year")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            i32::try_from(v).map_err(E::custom)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            i32::try_from(v).map_err(E::custom)
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            s.trim().parse::<i32>().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(YearVisitor)
}

/// An access-category label: either one access type or a combination of several.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryLabel {
    /// e.g. `Gold`
    Single(String),
    /// e.g. `Gold,Green`: a publication reachable through more than one route.
    Combination(Vec<String>),
}

impl CategoryLabel {
    /// Split on `,`, trimming parts and dropping empty ones.
    pub fn parse(raw: &str) -> Self {
        let mut parts: Vec<String> = raw
            .split(CATEGORY_SEPARATOR)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        match parts.len() {
            0 => CategoryLabel::Single(raw.trim().to_string()),
            1 => CategoryLabel::Single(parts.remove(0)),
            _ => CategoryLabel::Combination(parts),
        }
    }

    pub fn is_combination(&self) -> bool {
        matches!(self, CategoryLabel::Combination(_))
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryLabel::Single(name) => f.write_str(name),
            CategoryLabel::Combination(parts) => {
                f.write_str(&parts.join(&CATEGORY_SEPARATOR.to_string()))
            }
        }
    }
}

impl From<&str> for CategoryLabel {
    fn from(raw: &str) -> Self {
        CategoryLabel::parse(raw)
    }
}

/// Ordered mapping from category label to count. Iteration follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryBreakdown {
    entries: Vec<(CategoryLabel, u64)>,
}

impl CategoryBreakdown {
    /// Insert or replace. A replaced label keeps its original position.
    pub fn push(&mut self, label: CategoryLabel, count: u64) {
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some(slot) => slot.1 = count,
            None => self.entries.push((label, count)),
        }
    }

    pub fn get(&self, label: &CategoryLabel) -> Option<u64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CategoryLabel, u64)> {
        self.entries.iter().map(|(l, c)| (l, *c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sum(&self) -> u64 {
        self.entries.iter().map(|(_, c)| *c).sum()
    }
}

impl FromIterator<(CategoryLabel, u64)> for CategoryBreakdown {
    fn from_iter<T: IntoIterator<Item = (CategoryLabel, u64)>>(iter: T) -> Self {
        let mut out = CategoryBreakdown::default();
        for (label, count) in iter {
            out.push(label, count);
        }
        out
    }
}

impl Serialize for CategoryBreakdown {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, count) in &self.entries {
            map.serialize_entry(&label.to_string(), count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryBreakdown {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{MapAccess, Visitor};
        struct BreakdownVisitor;

        impl<'de> Visitor<'de> for BreakdownVisitor {
            type Value = CategoryBreakdown;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a map from category label to count")
            }

            // Entries are visited in document order, which is what we keep.
            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut out = CategoryBreakdown::default();
                while let Some((label, count)) = access.next_entry::<String, u64>()? {
                    out.push(CategoryLabel::parse(&label), count);
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(BreakdownVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("start year {start} is after end year {end}")]
    Inverted { start: i32, end: i32 },
    #[error("invalid year range {0:?}, expected YYYY or YYYY:YYYY")]
    Unparsable(String),
}

/// Inclusive year range, `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct YearRange {
    start: i32,
    end: i32,
}

#[derive(Deserialize)]
struct RawRange {
    start: i32,
    end: i32,
}

impl TryFrom<RawRange> for YearRange {
    type Error = RangeError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        YearRange::new(raw.start, raw.end)
    }
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// A range covering one year.
    pub fn single(year: i32) -> Self {
        Self {
            start: year,
            end: year,
        }
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    /// Move the lower bound. Fails instead of inverting the range.
    pub fn with_start(self, start: i32) -> Result<Self, RangeError> {
        Self::new(start, self.end)
    }

    /// Move the upper bound. Fails instead of inverting the range.
    pub fn with_end(self, end: i32) -> Result<Self, RangeError> {
        Self::new(self.start, end)
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

impl FromStr for YearRange {
    type Err = RangeError;

    /// `YYYY` or `YYYY:YYYY`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || RangeError::Unparsable(s.to_string());
        if let Some((a, b)) = s.split_once(':') {
            let start = a.trim().parse::<i32>().map_err(|_| bad())?;
            let end = b.trim().parse::<i32>().map_err(|_| bad())?;
            YearRange::new(start, end)
        } else {
            s.trim().parse::<i32>().map(YearRange::single).map_err(|_| bad())
        }
    }
}
