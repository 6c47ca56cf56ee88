//! Public types and constants for the visualization module.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Legend placement options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendMode {
    /// Overlay legend inside the plotting area (may overlap bars).
    Inside,
    /// Separate legend column on the right side.
    Right,
    /// Separate legend band above the chart.
    Top,
    /// Separate legend band below the chart.
    Bottom,
}

/// Legend centered below the bars.
pub const DEFAULT_LEGEND_MODE: LegendMode = LegendMode::Bottom;

/// Output image encoding, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// `.svg` (any case) is SVG; everything else is rendered as PNG.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => ImageFormat::Svg,
            _ => ImageFormat::Png,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}
