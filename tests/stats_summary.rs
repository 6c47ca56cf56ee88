use oa_pubstats::filter::filter_by_range;
use oa_pubstats::stats::range_summary;
use oa_pubstats::{DataStore, PublicationRecord, YearRange};

#[test]
fn summary_over_selected_years() {
    let store = DataStore::sample();
    let selected = filter_by_range(store.records(), YearRange::new(2022, 2025).unwrap());
    let s = range_summary(&selected);
    assert_eq!(s.years, 4);
    assert_eq!(s.total, 2270);
    assert_eq!(s.open_access, 1640);
    assert_eq!(s.closed_access, 630);
    let share = s.oa_share.unwrap();
    assert!((share - 72.246).abs() < 0.01, "share was {share}");
    // 2025: 310/400 = 77.5%
    assert_eq!(s.peak_share_year, Some(2025));
}

#[test]
fn empty_and_zero_totals() {
    let s = range_summary(&[]);
    assert_eq!(s.years, 0);
    assert!(s.oa_share.is_none());
    assert!(s.peak_share_year.is_none());

    let s = range_summary(&[PublicationRecord::new(2030, 0, 0)]);
    assert_eq!(s.years, 1);
    assert!(s.oa_share.is_none());
    assert!(s.peak_share_year.is_none());
}
