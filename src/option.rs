//! Declarative chart configuration for an external ECharts-compatible renderer.
//!
//! Formatter callbacks cannot travel as JSON, so bar labels and tooltip HTML are
//! computed here and attached to each data item.

use crate::config::{CLOSED_ACCESS_LABEL, ChartSettings, OPEN_ACCESS_LABEL};
use crate::models::{PublicationRecord, YearRange};
use crate::series::project;
use crate::tooltip::{bar_label, format_tooltip};
use crate::viz::export_file_stem;
use serde_json::{Value, json};

/// Build the option object for `records`. `range` only feeds the export file name;
/// callers pass records already filtered to it.
pub fn chart_option(
    records: &[PublicationRecord],
    range: YearRange,
    settings: &ChartSettings,
) -> Value {
    let series = project(records);
    let years: Vec<String> = series.years.iter().map(|y| y.to_string()).collect();

    let open_data: Vec<Value> = records
        .iter()
        .map(|r| {
            let tip = format_tooltip(r, &settings.categories, &settings.format);
            json!({
                "value": r.open_access,
                "label": {
                    "formatter": bar_label(r.open_access as i64, r.total, settings.format.zero_total),
                },
                "tooltip": { "formatter": tip.to_html() },
            })
        })
        .collect();
    let closed_data: Vec<Value> = records
        .iter()
        .map(|r| {
            let tip = format_tooltip(r, &settings.categories, &settings.format);
            json!({
                "value": r.closed_access(),
                "tooltip": { "formatter": tip.to_html() },
            })
        })
        .collect();

    json!({
        "title": { "text": settings.title, "left": "center", "top": 10 },
        "legend": { "data": [OPEN_ACCESS_LABEL, CLOSED_ACCESS_LABEL], "bottom": 0 },
        "tooltip": { "trigger": "item" },
        "toolbox": {
            "feature": {
                "saveAsImage": { "type": "png", "name": export_file_stem(range) },
            },
        },
        "xAxis": { "type": "category", "data": years },
        "yAxis": { "type": "value", "name": "Publications" },
        "series": [
            {
                "name": OPEN_ACCESS_LABEL,
                "type": "bar",
                "stack": "total",
                "emphasis": { "focus": "series" },
                "itemStyle": { "color": settings.series.open_access.hex() },
                "label": {
                    "show": true,
                    "position": "inside",
                    "color": "#fff",
                    "fontWeight": "bold",
                },
                "data": open_data,
            },
            {
                "name": CLOSED_ACCESS_LABEL,
                "type": "bar",
                "stack": "total",
                "emphasis": { "focus": "series" },
                "itemStyle": { "color": settings.series.closed_access.hex() },
                "data": closed_data,
            },
        ],
    })
}
