use oa_pubstats::filter::filter_by_range;
use oa_pubstats::series::project;
use oa_pubstats::{DataStore, PublicationRecord, YearRange};

#[test]
fn open_plus_closed_equals_total() {
    let store = DataStore::sample();
    let selected = filter_by_range(store.records(), YearRange::new(2022, 2025).unwrap());
    let s = project(&selected);

    assert_eq!(s.years, vec![2022, 2023, 2024, 2025]);
    assert_eq!(s.open, vec![300, 450, 580, 310]);
    assert_eq!(s.closed, vec![200, 170, 170, 90]);
    assert_eq!(s.open.len(), s.closed.len());
    for (i, r) in selected.iter().enumerate() {
        assert_eq!(s.stacked_total(i), Some(r.total as i64));
    }
    assert_eq!(s.max_stacked(), 750);
}

#[test]
fn empty_selection_projects_to_empty_series() {
    let s = project(&[]);
    assert!(s.is_empty());
    assert!(s.open.is_empty() && s.closed.is_empty());
    assert_eq!(s.max_stacked(), 0);
}

#[test]
fn inconsistent_record_gives_negative_closed_value() {
    let s = project(&[PublicationRecord::new(2030, 40, 100)]);
    assert_eq!(s.closed, vec![-60]);
    assert_eq!(s.stacked_total(0), Some(40));
}
