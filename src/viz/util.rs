//! Utility functions for visualization: colors, axis bounds, locale mapping.

use crate::color::Rgb;
use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;

use super::text::estimate_text_width_px;

/// Plotters color for a crate [`Rgb`].
#[inline]
pub fn to_plotters(c: Rgb) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Integer tick label with locale grouping (`12,000` / `12.000`).
pub fn format_count(v: f64, locale: &Locale) -> String {
    (v.round() as i64).to_formatted_string(locale)
}

/// Headroom above the tallest bar: next "nice" value (1, 2, 2.5, 5 × 10ⁿ) at or above 110% of `max`.
pub fn axis_upper_bound(max: f64) -> f64 {
    if !max.is_finite() || max <= 0.0 {
        return 1.0;
    }
    let target = max * 1.1;
    let magnitude = 10f64.powi(target.log10().floor() as i32);
    for step in [1.0, 2.0, 2.5, 5.0, 10.0] {
        let candidate = step * magnitude;
        if candidate >= target {
            return candidate;
        }
    }
    10.0 * magnitude
}

/// Width of the left label area so the widest Y tick label fits, clamped to 48..=140 px.
pub fn compute_left_label_area_px(
    ymin: f64,
    ymax: f64,
    ticks: usize,
    font_px: u32,
    locale: &Locale,
) -> u32 {
    let mut max_px = 0u32;
    for i in 0..=ticks {
        let t = if ticks == 0 {
            0.0
        } else {
            i as f64 / ticks as f64
        };
        let s = format_count(ymin + (ymax - ymin) * t, locale);
        max_px = max_px.max(estimate_text_width_px(&s, font_px));
    }
    // tick marks + axis title column
    max_px.saturating_add(34).clamp(48, 140)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_bound_is_nice_and_above_max() {
        assert_eq!(axis_upper_bound(750.0), 1000.0);
        assert_eq!(axis_upper_bound(400.0), 500.0);
        assert_eq!(axis_upper_bound(200.0), 250.0);
        assert_eq!(axis_upper_bound(0.0), 1.0);
    }

    #[test]
    fn locale_grouping() {
        assert_eq!(format_count(12000.0, map_locale("en").0), "12,000");
        assert_eq!(format_count(12000.0, map_locale("de").0), "12.000");
    }
}
