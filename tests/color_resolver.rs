use oa_pubstats::CategoryLabel;
use oa_pubstats::color::{CategoryColorMap, FALLBACK, GOLD, MIXED, Rgb};
use std::collections::BTreeMap;

#[test]
fn every_combination_shares_the_mixed_color() {
    let map = CategoryColorMap::default();
    let a = map.resolve(&CategoryLabel::parse("Gold,Green"));
    let b = map.resolve(&CategoryLabel::parse("Diamond,Hybrid"));
    assert_eq!(a, b);
    assert_eq!(a, MIXED);
    assert_eq!(map.resolve_label("Mixed"), MIXED);
}

#[test]
fn known_and_unknown_labels() {
    let map = CategoryColorMap::default();
    assert_eq!(map.resolve_label("Gold"), GOLD);
    assert_eq!(map.resolve_label("Gold").hex(), "#fac858");
    assert_eq!(map.resolve_label("Unknown"), FALLBACK);
    assert_eq!(map.resolve_label("Unknown").hex(), "#cccccc");
}

#[test]
fn overrides_replace_single_and_mixed_colors() {
    let mut overrides = BTreeMap::new();
    overrides.insert("Gold".to_string(), Rgb::new(0xff, 0xd7, 0x00));
    overrides.insert("Mixed".to_string(), "#123".parse::<Rgb>().unwrap());
    let map = CategoryColorMap::with_overrides(&overrides);

    assert_eq!(map.resolve_label("Gold").hex(), "#ffd700");
    assert_eq!(map.resolve_label("Bronze,Green").hex(), "#112233");
    assert_eq!(map.resolve_label("Nope"), FALLBACK);
}

#[test]
fn hex_parsing_rejects_garbage() {
    assert!("#12345".parse::<Rgb>().is_err());
    assert!("zzzzzz".parse::<Rgb>().is_err());
    assert_eq!("#5470C6".parse::<Rgb>().unwrap().hex(), "#5470c6");
}
