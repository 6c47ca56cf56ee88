//! Tooltip and bar-label formatting.
//!
//! Both are plain functions of a record so they can be used outside any renderer:
//! the CLI prints them, the chart option embeds them, the GUI draws them.

use crate::color::{CategoryColorMap, Rgb};
use crate::models::PublicationRecord;
use crate::viz::util::map_locale;
use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What to show for a percentage whose total is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroTotalDisplay {
    /// `N/A`
    #[default]
    NotApplicable,
    /// `0.0` in tooltips, `0%` on bars.
    Zero,
}

const NOT_APPLICABLE: &str = "N/A";

/// Formatting knobs shared by tooltips and bar labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub locale_tag: String,
    pub zero_total: ZeroTotalDisplay,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            locale_tag: "en".to_string(),
            zero_total: ZeroTotalDisplay::NotApplicable,
        }
    }
}

impl FormatOptions {
    fn locale(&self) -> &'static Locale {
        map_locale(&self.locale_tag).0
    }
}

/// `(open / total) * 100`, `None` when `total == 0`.
pub fn oa_percentage(open: u64, total: u64) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(open as f64 / total as f64 * 100.0)
    }
}

/// Round to one decimal with halves going up (`6.25` → `6.3`).
pub fn round_one_decimal(p: f64) -> f64 {
    (p * 10.0 + 0.5).floor() / 10.0
}

/// Percentage rounded to one decimal (`72.6`), or the zero-total fallback.
pub fn percent_one_decimal(open: u64, total: u64, zero_total: ZeroTotalDisplay) -> String {
    match (oa_percentage(open, total), zero_total) {
        (Some(p), _) => format!("{:.1}", round_one_decimal(p)),
        (None, ZeroTotalDisplay::NotApplicable) => NOT_APPLICABLE.to_string(),
        (None, ZeroTotalDisplay::Zero) => "0.0".to_string(),
    }
}

/// Label drawn inside a bar segment: `value / total` as a whole percentage (`73%`).
///
/// Halves round toward positive infinity so `-2.5` gives `-2`, matching how the
/// chart labels were computed historically.
pub fn bar_label(value: i64, total: u64, zero_total: ZeroTotalDisplay) -> String {
    if total == 0 {
        return match zero_total {
            ZeroTotalDisplay::NotApplicable => NOT_APPLICABLE.to_string(),
            ZeroTotalDisplay::Zero => "0%".to_string(),
        };
    }
    let pct = value as f64 / total as f64 * 100.0;
    format!("{}%", (pct + 0.5).floor() as i64)
}

/// One breakdown line of a tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipRow {
    pub label: String,
    pub count: u64,
    pub color: Rgb,
}

/// Everything a tooltip shows for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tooltip {
    pub year: i32,
    pub total: u64,
    pub open_access: u64,
    /// One decimal, or the zero-total fallback.
    pub open_access_percent: String,
    pub rows: Vec<TooltipRow>,
    #[serde(skip)]
    locale: &'static Locale,
}

/// Build the tooltip for `record`. Rows follow the breakdown's own order.
pub fn format_tooltip(
    record: &PublicationRecord,
    colors: &CategoryColorMap,
    opts: &FormatOptions,
) -> Tooltip {
    let rows = record
        .breakdown
        .iter()
        .map(|(label, count)| TooltipRow {
            label: label.to_string(),
            count,
            color: colors.resolve(label),
        })
        .collect();
    Tooltip {
        year: record.year,
        total: record.total,
        open_access: record.open_access,
        open_access_percent: percent_one_decimal(
            record.open_access,
            record.total,
            opts.zero_total,
        ),
        rows,
        locale: opts.locale(),
    }
}

impl Tooltip {
    /// `450 (72.6%)`, or `0 (N/A)` when the percentage is unavailable.
    pub fn open_access_text(&self) -> String {
        let count = self.open_access.to_formatted_string(self.locale);
        if self.open_access_percent == NOT_APPLICABLE {
            format!("{count} ({NOT_APPLICABLE})")
        } else {
            format!("{count} ({}%)", self.open_access_percent)
        }
    }

    pub fn total_text(&self) -> String {
        self.total.to_formatted_string(self.locale)
    }

    pub fn count_text(&self, row: &TooltipRow) -> String {
        row.count.to_formatted_string(self.locale)
    }

    /// HTML fragment for renderers that accept rich tooltips.
    pub fn to_html(&self) -> String {
        let mut html = format!(
            concat!(
                r#"<div style="font-family:sans-serif; min-width:280px;">"#,
                r#"<div style="font-weight:bold; font-size:14px; margin-bottom:8px; border-bottom:1px solid #eee; padding-bottom:4px;">Year {year}</div>"#,
                r#"<div style="display:flex; justify-content:space-between; margin-bottom:4px;"><span>Total publications:</span> <b>{total}</b></div>"#,
                r#"<div style="display:flex; justify-content:space-between; color:{oa_color}; font-weight:bold; margin-bottom:8px;"><span>Open access:</span> <span>{oa}</span></div>"#,
                r#"<div style="display:grid; grid-template-columns: 1fr 1fr; gap:6px; font-size:11px; background:#f9f9f9; padding:8px; border-radius:4px;">"#,
            ),
            year = self.year,
            total = self.total_text(),
            oa_color = crate::color::OPEN_ACCESS_SERIES.hex(),
            oa = escape_html(&self.open_access_text()),
        );
        for row in &self.rows {
            html.push_str(&format!(
                concat!(
                    r#"<div style="display:flex; align-items:center;">"#,
                    r#"<span style="width:8px; height:8px; border-radius:50%; background:{color}; margin-right:6px; flex-shrink:0;"></span>"#,
                    r#"<span style="color:#666;">{label}:</span> <b style="margin-left:auto; padding-left:8px;">{count}</b>"#,
                    "</div>",
                ),
                color = row.color.hex(),
                label = escape_html(&row.label),
                count = self.count_text(row),
            ));
        }
        html.push_str("</div></div>");
        html
    }
}

impl fmt::Display for Tooltip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Year {}", self.year)?;
        writeln!(f, "  Total publications: {}", self.total_text())?;
        writeln!(f, "  Open access:        {}", self.open_access_text())?;
        let width = self.rows.iter().map(|r| r.label.chars().count()).max().unwrap_or(0);
        for row in &self.rows {
            writeln!(
                f,
                "    {} {:<width$}  {:>6}",
                row.color.hex(),
                format!("{}:", row.label),
                self.count_text(row),
                width = width + 1
            )?;
        }
        Ok(())
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
