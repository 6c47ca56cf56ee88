//! Category → display color resolution.
//!
//! Single access types look up a fixed table; any compound label (`Gold,Green`)
//! resolves to the shared "Mixed" color; unknown names fall back to a light gray.

use crate::models::CategoryLabel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Key of the color used for every compound label.
pub const MIXED_KEY: &str = "Mixed";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color {0:?}, expected #rgb or #rrggbb")]
pub struct ColorParseError(pub String);

/// 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb`.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ColorParseError(s.to_string());
        let digits = s.trim().strip_prefix('#').ok_or_else(bad)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let channel = |i: usize, w: usize| u8::from_str_radix(&digits[i..i + w], 16);
        match digits.len() {
            // `#ccc` → `#cccccc`
            3 => {
                let (r, g, b) = (
                    channel(0, 1).map_err(|_| bad())?,
                    channel(1, 1).map_err(|_| bad())?,
                    channel(2, 1).map_err(|_| bad())?,
                );
                Ok(Rgb::new(r * 17, g * 17, b * 17))
            }
            6 => Ok(Rgb::new(
                channel(0, 2).map_err(|_| bad())?,
                channel(2, 2).map_err(|_| bad())?,
                channel(4, 2).map_err(|_| bad())?,
            )),
            _ => Err(bad()),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

pub const GOLD: Rgb = Rgb::new(0xfa, 0xc8, 0x58);
pub const GREEN: Rgb = Rgb::new(0x91, 0xcc, 0x75);
pub const DIAMOND: Rgb = Rgb::new(0x73, 0xc0, 0xde);
pub const HYBRID: Rgb = Rgb::new(0xee, 0x66, 0x66);
pub const BRONZE: Rgb = Rgb::new(0xfc, 0x84, 0x52);
pub const OTHER: Rgb = Rgb::new(0x7b, 0x7b, 0x7b);
pub const MIXED: Rgb = Rgb::new(0x9a, 0x60, 0xb4);
/// `#ccc`
pub const FALLBACK: Rgb = Rgb::new(0xcc, 0xcc, 0xcc);

/// Open-access series fill.
pub const OPEN_ACCESS_SERIES: Rgb = GREEN;
/// Closed-access series fill.
pub const CLOSED_ACCESS_SERIES: Rgb = Rgb::new(0x54, 0x70, 0xc6);

/// Static category → color table. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryColorMap {
    colors: BTreeMap<String, Rgb>,
    mixed: Rgb,
    fallback: Rgb,
}

impl Default for CategoryColorMap {
    fn default() -> Self {
        let colors = [
            ("Gold", GOLD),
            ("Green", GREEN),
            ("Diamond", DIAMOND),
            ("Hybrid", HYBRID),
            ("Bronze", BRONZE),
            ("Other", OTHER),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        Self {
            colors,
            mixed: MIXED,
            fallback: FALLBACK,
        }
    }
}

impl CategoryColorMap {
    /// Default table with entries replaced/added from `overrides`.
    /// A `"Mixed"` key replaces the compound color.
    pub fn with_overrides(overrides: &BTreeMap<String, Rgb>) -> Self {
        let mut map = Self::default();
        for (name, color) in overrides {
            if name == MIXED_KEY {
                map.mixed = *color;
            } else {
                map.colors.insert(name.clone(), *color);
            }
        }
        map
    }

    pub fn resolve(&self, label: &CategoryLabel) -> Rgb {
        match label {
            CategoryLabel::Combination(_) => self.mixed,
            CategoryLabel::Single(name) if name == MIXED_KEY => self.mixed,
            CategoryLabel::Single(name) => self.colors.get(name).copied().unwrap_or(self.fallback),
        }
    }

    /// Same as [`resolve`](Self::resolve) on a raw label string.
    pub fn resolve_label(&self, label: &str) -> Rgb {
        self.resolve(&CategoryLabel::parse(label))
    }

    pub fn mixed(&self) -> Rgb {
        self.mixed
    }

    pub fn fallback(&self) -> Rgb {
        self.fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip_and_short_form() {
        assert_eq!("#ccc".parse::<Rgb>().unwrap(), FALLBACK);
        assert_eq!("#5470C6".parse::<Rgb>().unwrap().hex(), "#5470c6");
        assert!("5470c6".parse::<Rgb>().is_err());
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("#gggggg".parse::<Rgb>().is_err());
    }

    #[test]
    fn overrides_replace_single_and_mixed() {
        let mut o = BTreeMap::new();
        o.insert("Gold".to_string(), Rgb::new(1, 2, 3));
        o.insert(MIXED_KEY.to_string(), Rgb::new(4, 5, 6));
        let map = CategoryColorMap::with_overrides(&o);
        assert_eq!(map.resolve_label("Gold"), Rgb::new(1, 2, 3));
        assert_eq!(map.resolve_label("Gold,Green"), Rgb::new(4, 5, 6));
        assert_eq!(map.resolve_label("Green"), GREEN);
    }
}
