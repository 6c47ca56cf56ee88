//! Chart settings and the optional TOML configuration file.
//!
//! Every field has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! title = "Publications: open vs closed access"
//! width = 1000
//! height = 600
//! locale = "de"
//! legend = "bottom"
//! zero_total = "not_applicable"   # or "zero"
//! range = { start = 2022, end = 2025 }
//! data = "publications.json"
//!
//! [series]
//! open_access = "#91cc75"
//! closed_access = "#5470c6"
//!
//! [category_colors]
//! Gold = "#ffd700"
//! Mixed = "#9a60b4"
//! ```

use crate::color::{CLOSED_ACCESS_SERIES, CategoryColorMap, OPEN_ACCESS_SERIES, Rgb};
use crate::models::YearRange;
use crate::tooltip::{FormatOptions, ZeroTotalDisplay};
use crate::viz::{DEFAULT_LEGEND_MODE, LegendMode};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_TITLE: &str = "Publications: open vs closed access";
pub const OPEN_ACCESS_LABEL: &str = "Open access";
pub const CLOSED_ACCESS_LABEL: &str = "Closed access";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesColors {
    pub open_access: Rgb,
    pub closed_access: Rgb,
}

impl Default for SeriesColors {
    fn default() -> Self {
        Self {
            open_access: OPEN_ACCESS_SERIES,
            closed_access: CLOSED_ACCESS_SERIES,
        }
    }
}

/// Contents of the TOML file. See the module docs for the layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub locale: String,
    pub legend: LegendMode,
    pub zero_total: ZeroTotalDisplay,
    pub series: SeriesColors,
    pub category_colors: BTreeMap<String, Rgb>,
    /// Initial selection; the whole dataset when absent.
    pub range: Option<YearRange>,
    /// JSON data file; the built-in sample when absent.
    pub data: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            width: 1000,
            height: 600,
            locale: "en".to_string(),
            legend: DEFAULT_LEGEND_MODE,
            zero_total: ZeroTotalDisplay::default(),
            series: SeriesColors::default(),
            category_colors: BTreeMap::new(),
            range: None,
            data: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing configuration")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut cfg = Self::from_toml_str(&content)
            .with_context(|| format!("in config {}", path.display()))?;
        // Relative data paths are relative to the config file.
        if let (Some(data), Some(dir)) = (cfg.data.as_ref(), path.parent())
            && data.is_relative()
        {
            cfg.data = Some(dir.join(data));
        }
        log::debug!("loaded config from {}", path.display());
        Ok(cfg)
    }

    /// `load(path)` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn chart_settings(&self) -> ChartSettings {
        ChartSettings {
            title: self.title.clone(),
            width: self.width,
            height: self.height,
            legend: self.legend,
            series: self.series,
            categories: CategoryColorMap::with_overrides(&self.category_colors),
            format: FormatOptions {
                locale_tag: self.locale.clone(),
                zero_total: self.zero_total,
            },
        }
    }
}

/// Everything the renderers need besides the records.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub legend: LegendMode,
    pub series: SeriesColors,
    pub categories: CategoryColorMap,
    pub format: FormatOptions,
}

impl Default for ChartSettings {
    fn default() -> Self {
        AppConfig::default().chart_settings()
    }
}
