//! Legend layout and drawing for the external (non-overlay) placements.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::{estimate_text_width_px, truncate_to_width};
use super::types::LegendMode;

// Layout constants shared by the estimator and the painter.
const FONT_PX: u32 = 14;
const SWATCH_PX: i32 = 12;
const SWATCH_TO_TEXT: i32 = 6;
const ITEM_GAP: i32 = 20;
const ROW_GAP: i32 = 6;
const PAD: i32 = 8;

fn line_h() -> i32 {
    FONT_PX as i32 + 4
}

fn item_width(label: &str) -> i32 {
    SWATCH_PX + SWATCH_TO_TEXT + estimate_text_width_px(label, FONT_PX) as i32
}

/// Greedy flow of legend items into rows no wider than `usable_w`.
/// Returns item indices per row; an item wider than the band gets a row of its own.
pub fn layout_rows(labels: &[String], usable_w: i32) -> Vec<Vec<usize>> {
    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut cur: Vec<usize> = Vec::new();
    let mut x = 0;
    for (i, label) in labels.iter().enumerate() {
        let w = item_width(label);
        let needed = if cur.is_empty() { w } else { x + ITEM_GAP + w };
        if needed > usable_w && !cur.is_empty() {
            rows.push(std::mem::take(&mut cur));
            x = w;
        } else {
            x = needed;
        }
        cur.push(i);
    }
    if !cur.is_empty() {
        rows.push(cur);
    }
    rows
}

/// Height in pixels of a Top/Bottom legend band for `labels` over `total_w` pixels.
pub fn estimate_band_height_px(labels: &[String], total_w: i32) -> i32 {
    let rows = layout_rows(labels, total_w - 2 * PAD).len().max(1) as i32;
    2 * PAD + rows * line_h() + (rows - 1) * ROW_GAP
}

/// Draw square swatches with labels into `legend_area`.
///
/// `Top`/`Bottom` center each row horizontally; `Right` stacks items in one column.
/// `Inside` draws nothing here (the chart's own series labels handle it).
pub fn draw_legend_panel<DB: DrawingBackend>(
    legend_area: &DrawingArea<DB, Shift>,
    items: &[(String, RGBColor)],
    placement: LegendMode,
) -> Result<()> {
    legend_area
        .fill(&WHITE)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let (w_u32, _) = legend_area.dim_in_pixel();
    let w = w_u32 as i32;
    let label_style: TextStyle =
        TextStyle::from((FontFamily::SansSerif, FONT_PX)).pos(Pos::new(HPos::Left, VPos::Center));

    let draw_item = |x: i32, y_center: i32, label: &str, color: RGBColor| -> Result<()> {
        let half = SWATCH_PX / 2;
        legend_area
            .draw(&Rectangle::new(
                [(x, y_center - half), (x + SWATCH_PX, y_center + half)],
                color.filled(),
            ))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        legend_area
            .draw(&Text::new(
                label.to_string(),
                (x + SWATCH_PX + SWATCH_TO_TEXT, y_center),
                label_style.clone(),
            ))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        Ok(())
    };

    match placement {
        LegendMode::Right => {
            let max_text = (w - 2 * PAD - SWATCH_PX - SWATCH_TO_TEXT).max(24) as u32;
            let mut y = PAD + line_h() / 2;
            for (label, color) in items {
                let shown = truncate_to_width(label, FONT_PX, max_text);
                draw_item(PAD, y, &shown, *color)?;
                y += line_h() + ROW_GAP;
            }
        }
        LegendMode::Top | LegendMode::Bottom => {
            let labels: Vec<String> = items.iter().map(|(l, _)| l.clone()).collect();
            let mut y = PAD + line_h() / 2;
            for row in layout_rows(&labels, w - 2 * PAD) {
                let row_w: i32 = row.iter().map(|&i| item_width(&labels[i])).sum::<i32>()
                    + ITEM_GAP * (row.len() as i32 - 1);
                let mut x = ((w - row_w) / 2).max(PAD);
                for i in row {
                    let (label, color) = &items[i];
                    draw_item(x, y, label, *color)?;
                    x += item_width(label) + ITEM_GAP;
                }
                y += line_h() + ROW_GAP;
            }
        }
        LegendMode::Inside => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_short_items_share_a_row() {
        let labels = vec!["Open access".to_string(), "Closed access".to_string()];
        assert_eq!(layout_rows(&labels, 800), vec![vec![0, 1]]);
        assert_eq!(layout_rows(&labels, 150), vec![vec![0], vec![1]]);
        assert!(estimate_band_height_px(&labels, 150) > estimate_band_height_px(&labels, 800));
    }
}
