//! Visualization: render the open/closed stacked bar chart to **SVG** or **PNG**.
//!
//! - One bar per year, open access at the bottom, closed access stacked on top
//! - Open-access share printed inside the lower segment (`73%`)
//! - Locale-aware Y ticks (`1,000` vs `1.000`)
//! - Legend placement: `Inside`, `Right`, `Top`, `Bottom` (external legends never overlap bars)

pub mod legend;
pub mod text;
pub mod types;
pub mod util;

pub use types::{DEFAULT_LEGEND_MODE, ImageFormat, LegendMode};

use crate::config::{CLOSED_ACCESS_LABEL, ChartSettings, OPEN_ACCESS_LABEL};
use crate::models::{PublicationRecord, YearRange};
use crate::series::project;
use crate::tooltip::bar_label;
use anyhow::{Result, anyhow};
use log::{debug, info};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;
use std::sync::Once;

use legend::{draw_legend_panel, estimate_band_height_px};
use util::{axis_upper_bound, compute_left_label_area_px, format_count, map_locale, to_plotters};

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

/// Fraction of a year slot covered by its bar.
const BAR_WIDTH: f64 = 0.6;

/// Suggested export name for a selection, e.g. `Publications_OA_2022_2025`.
pub fn export_file_stem(range: YearRange) -> String {
    format!("Publications_OA_{}_{}", range.start(), range.end())
}

/// `export_file_stem` plus the image extension.
pub fn export_file_name(range: YearRange, format: ImageFormat) -> String {
    format!("{}.{}", export_file_stem(range), format.extension())
}

/// Render `records` as a stacked bar chart. The format follows the extension of
/// `out_path` (`.svg` → SVG, anything else → PNG).
///
/// ### Errors
/// - `records` is empty
/// - the backend fails to draw or write the file
pub fn plot_publications<P: AsRef<Path>>(
    records: &[PublicationRecord],
    out_path: P,
    settings: &ChartSettings,
) -> Result<()> {
    if records.is_empty() {
        return Err(anyhow!("no data to plot"));
    }
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let size = (settings.width, settings.height);

    match ImageFormat::from_path(out_path) {
        ImageFormat::Svg => {
            let root = SVGBackend::new(path_string.as_str(), size).into_drawing_area();
            draw_chart(root, records, settings)?;
        }
        ImageFormat::Png => {
            let root = BitMapBackend::new(path_string.as_str(), size).into_drawing_area();
            draw_chart(root, records, settings)?;
        }
    }
    info!(
        "wrote {}x{} chart of {} years to {}",
        settings.width,
        settings.height,
        records.len(),
        out_path.display()
    );
    Ok(())
}

fn draw_chart<DB>(
    root: DrawingArea<DB, Shift>,
    records: &[PublicationRecord],
    settings: &ChartSettings,
) -> Result<()>
where
    DB: DrawingBackend,
{
    const MARGIN: i32 = 16;
    let (num_locale, _) = map_locale(&settings.format.locale_tag);
    let series = project(records);
    let n = series.len();

    // ----------------------------
    // 1) Value range: stacked heights above zero, negative closed segments below
    // ----------------------------
    let y_max = axis_upper_bound(series.max_stacked() as f64);
    let most_negative = series.closed.iter().copied().min().unwrap_or(0).min(0);
    let y_min = if most_negative < 0 {
        -axis_upper_bound(-(most_negative as f64))
    } else {
        0.0
    };
    let y_label_count = 8usize;
    let left_label_px = compute_left_label_area_px(y_min, y_max, y_label_count, 12, num_locale);

    // ----------------------------
    // 2) Split plot / legend areas
    // ----------------------------
    let legend_items: Vec<(String, RGBColor)> = vec![
        (
            OPEN_ACCESS_LABEL.to_string(),
            to_plotters(settings.series.open_access),
        ),
        (
            CLOSED_ACCESS_LABEL.to_string(),
            to_plotters(settings.series.closed_access),
        ),
    ];
    let legend_labels: Vec<String> = legend_items.iter().map(|(l, _)| l.clone()).collect();
    let (root_w, root_h) = root.dim_in_pixel();
    let band_h = estimate_band_height_px(&legend_labels, root_w as i32).max(32);

    let (plot_area, legend_area) = match settings.legend {
        LegendMode::Right => {
            let (plot, legend) = root.split_horizontally((85).percent_width());
            (plot, Some(legend))
        }
        LegendMode::Top => {
            let (legend, plot) = root.split_vertically(band_h);
            (plot, Some(legend))
        }
        LegendMode::Bottom => {
            let (plot, legend) = root.split_vertically((root_h as i32 - band_h).max(40));
            (plot, Some(legend))
        }
        LegendMode::Inside => (root, None),
    };

    plot_area
        .fill(&WHITE)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    // ----------------------------
    // 3) Axes: categorical X (one slot per year), counts on Y
    // ----------------------------
    let years = series.years.clone();
    let x_label_fmt = |x: &f64| {
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        years
            .get(idx as usize)
            .map(|y| y.to_string())
            .unwrap_or_default()
    };
    let y_label_fmt = |v: &f64| format_count(*v, num_locale);

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(MARGIN as u32)
        .caption(settings.title.trim(), (FontFamily::SansSerif, 22))
        .set_label_area_size(LabelAreaPosition::Left, left_label_px)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), y_min..y_max)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n + 1)
        .y_labels(y_label_count)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .y_desc("Publications")
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 14))
        .draw()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    // ----------------------------
    // 4) Bars: open access from 0, closed access stacked on top
    // ----------------------------
    let open_color = to_plotters(settings.series.open_access);
    let closed_color = to_plotters(settings.series.closed_access);
    let half = BAR_WIDTH / 2.0;

    let open_bars = (0..n).map(|i| {
        let x = i as f64;
        Rectangle::new(
            [(x - half, 0.0), (x + half, series.open[i] as f64)],
            open_color.filled(),
        )
    });
    let closed_bars = (0..n).map(|i| {
        let x = i as f64;
        let open = series.open[i] as f64;
        let closed = series.closed[i] as f64;
        // A negative closed count cannot sit on top of the open segment; draw it below zero.
        let (y0, y1) = if closed >= 0.0 {
            (open, open + closed)
        } else {
            (closed, 0.0)
        };
        Rectangle::new([(x - half, y0), (x + half, y1)], closed_color.filled())
    });

    let inside_mode = matches!(settings.legend, LegendMode::Inside);
    let open_elem = chart
        .draw_series(open_bars)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if inside_mode {
        open_elem
            .label(OPEN_ACCESS_LABEL)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], open_color.filled()));
    }
    let closed_elem = chart
        .draw_series(closed_bars)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if inside_mode {
        closed_elem.label(CLOSED_ACCESS_LABEL).legend(move |(x, y)| {
            Rectangle::new([(x, y - 5), (x + 10, y + 5)], closed_color.filled())
        });
    }

    // ----------------------------
    // 5) Share labels inside the open-access segment
    // ----------------------------
    let label_style = TextStyle::from((FontFamily::SansSerif, 13))
        .color(&WHITE)
        .pos(Pos::new(HPos::Center, VPos::Center));
    let labels: Vec<Text<'_, (f64, f64), String>> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.open_access > 0)
        .map(|(i, r)| {
            let text = bar_label(r.open_access as i64, r.total, settings.format.zero_total);
            Text::new(
                text,
                (i as f64, r.open_access as f64 / 2.0),
                label_style.clone(),
            )
        })
        .collect();
    debug!("drawing {} bar labels", labels.len());
    chart
        .draw_series(labels)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    // ----------------------------
    // 6) Legend
    // ----------------------------
    if inside_mode {
        chart
            .configure_series_labels()
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.85))
            .label_font((FontFamily::SansSerif, 14))
            .draw()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    } else if let Some(ref legend_area) = legend_area {
        draw_legend_panel(legend_area, &legend_items, settings.legend)?;
    }

    plot_area
        .present()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if let Some(ref legend_area) = legend_area {
        legend_area
            .present()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }
    Ok(())
}
