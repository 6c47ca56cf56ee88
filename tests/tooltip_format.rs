use oa_pubstats::color::{CategoryColorMap, MIXED};
use oa_pubstats::tooltip::{
    FormatOptions, ZeroTotalDisplay, bar_label, format_tooltip, percent_one_decimal,
};
use oa_pubstats::{DataStore, PublicationRecord};

fn year(store: &DataStore, y: i32) -> PublicationRecord {
    store
        .records()
        .iter()
        .find(|r| r.year == y)
        .cloned()
        .expect("year in sample")
}

#[test]
fn tooltip_for_2023() {
    let store = DataStore::sample();
    let tip = format_tooltip(
        &year(&store, 2023),
        &CategoryColorMap::default(),
        &FormatOptions::default(),
    );

    assert_eq!(tip.year, 2023);
    assert_eq!(tip.total_text(), "620");
    assert_eq!(tip.open_access_percent, "72.6");
    assert_eq!(tip.open_access_text(), "450 (72.6%)");

    let labels: Vec<&str> = tip.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels[..3], ["Green", "Diamond", "Gold"]);
    assert_eq!(tip.rows.len(), 11);
    let gold_green = tip.rows.iter().find(|r| r.label == "Gold,Green").unwrap();
    assert_eq!(gold_green.count, 60);
    assert_eq!(gold_green.color, MIXED);
}

#[test]
fn html_lists_rows_with_swatches() {
    let store = DataStore::sample();
    let tip = format_tooltip(
        &year(&store, 2023),
        &CategoryColorMap::default(),
        &FormatOptions::default(),
    );
    let html = tip.to_html();
    assert!(html.contains("Year 2023"));
    assert!(html.contains("Total publications:"));
    assert!(html.contains("450 (72.6%)"));
    assert!(html.contains("background:#fac858"));
    assert!(html.contains("background:#9a60b4"));
    // breakdown order survives into the markup
    let green = html.find(">Green:<").unwrap();
    let diamond = html.find(">Diamond:<").unwrap();
    assert!(green < diamond);
}

#[test]
fn plain_text_rendering() {
    let store = DataStore::sample();
    let tip = format_tooltip(
        &year(&store, 2022),
        &CategoryColorMap::default(),
        &FormatOptions::default(),
    );
    let text = tip.to_string();
    assert!(text.starts_with("Year 2022"));
    assert!(text.contains("300 (60.0%)"));
    assert!(text.contains("Hybrid,Green:"));
}

#[test]
fn zero_total_never_shows_nan() {
    let r = PublicationRecord::new(2030, 0, 0);
    let tip = format_tooltip(&r, &CategoryColorMap::default(), &FormatOptions::default());
    assert_eq!(tip.open_access_percent, "N/A");
    assert_eq!(tip.open_access_text(), "0 (N/A)");
    assert!(!tip.to_html().contains("NaN"));
    assert!(tip.rows.is_empty());

    let opts = FormatOptions {
        zero_total: ZeroTotalDisplay::Zero,
        ..FormatOptions::default()
    };
    let tip = format_tooltip(&r, &CategoryColorMap::default(), &opts);
    assert_eq!(tip.open_access_text(), "0 (0.0%)");
}

#[test]
fn locale_groups_large_counts() {
    let r = PublicationRecord::new(2030, 12_345, 6_789).with_category("Gold", 1_500);
    let opts = FormatOptions {
        locale_tag: "de".into(),
        ..FormatOptions::default()
    };
    let tip = format_tooltip(&r, &CategoryColorMap::default(), &opts);
    assert_eq!(tip.total_text(), "12.345");
    assert_eq!(tip.count_text(&tip.rows[0]), "1.500");
}

#[test]
fn bar_labels_round_to_whole_percent() {
    let na = ZeroTotalDisplay::NotApplicable;
    assert_eq!(bar_label(450, 620, na), "73%");
    assert_eq!(bar_label(170, 620, na), "27%");
    assert_eq!(bar_label(300, 500, na), "60%");
    assert_eq!(bar_label(1, 8, na), "13%"); // 12.5 rounds up
    assert_eq!(bar_label(-1, 40, na), "-2%"); // -2.5 rounds toward +inf
    assert_eq!(bar_label(29, 200, na), "14%"); // division happens before scaling
    assert_eq!(bar_label(5, 0, na), "N/A");
    assert_eq!(bar_label(5, 0, ZeroTotalDisplay::Zero), "0%");
}

#[test]
fn one_decimal_percentages_round_ties_up() {
    let na = ZeroTotalDisplay::NotApplicable;
    assert_eq!(percent_one_decimal(1, 16, na), "6.3");
    assert_eq!(percent_one_decimal(1, 80, na), "1.3");
    assert_eq!(percent_one_decimal(1, 400, na), "0.3");

    // the tooltip shows the same figure
    let r = PublicationRecord::new(2030, 16, 1);
    let tip = format_tooltip(&r, &CategoryColorMap::default(), &FormatOptions::default());
    assert_eq!(tip.open_access_text(), "1 (6.3%)");
}
