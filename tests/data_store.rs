use oa_pubstats::data::{DataError, JsonFileProvider, SampleData};
use oa_pubstats::{DataProvider, DataStore, PublicationRecord, YearRange, storage};
use tempfile::tempdir;

#[test]
fn sample_store_covers_six_years() {
    let store = DataStore::open(None).unwrap();
    assert_eq!(store.years(), vec![2020, 2021, 2022, 2023, 2024, 2025]);
    let range = store.full_range().unwrap();
    assert_eq!((range.start(), range.end()), (2020, 2025));
    for r in store.records() {
        assert_eq!(r.breakdown.sum(), r.open_access, "year {}", r.year);
    }
}

#[test]
fn store_rejects_duplicates_and_excess_open_access() {
    let dup = vec![
        PublicationRecord::new(2022, 10, 5),
        PublicationRecord::new(2022, 12, 5),
    ];
    assert_eq!(DataStore::new(dup).unwrap_err(), DataError::DuplicateYear(2022));

    let excess = vec![PublicationRecord::new(2022, 10, 11)];
    assert!(matches!(
        DataStore::new(excess),
        Err(DataError::OpenAccessExceedsTotal { year: 2022, .. })
    ));

    let empty = DataStore::new(Vec::new()).unwrap();
    assert!(empty.is_empty());
    assert!(empty.full_range().is_none());
}

#[test]
fn json_provider_feeds_the_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("pubs.json");
    storage::save_json(&SampleData::records()[2..4], &path).unwrap();

    let provider = JsonFileProvider::new(&path);
    assert!(provider.describe().contains("pubs.json"));
    let store = DataStore::from_provider(&provider).unwrap();
    assert_eq!(store.years(), vec![2022, 2023]);
    assert_eq!(DataStore::open(Some(path.as_path())).unwrap(), store);
}

#[test]
fn invalid_file_is_reported_with_context() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"[{"year": 2022, "total": 1, "open_access": 2}]"#).unwrap();
    let err = DataStore::open(Some(path.as_path())).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("invalid records"));
    assert!(msg.contains("exceeds total"));
}

#[test]
fn ranges_must_use_years_from_the_store() {
    let store = DataStore::sample();
    let ok = YearRange::new(2021, 2024).unwrap();
    assert_eq!(store.check_range(ok), Ok(ok));
    assert_eq!(
        store.check_range(YearRange::new(2019, 2024).unwrap()),
        Err(DataError::YearNotInData(2019))
    );
    assert_eq!(
        store.check_range(YearRange::single(2026)),
        Err(DataError::YearNotInData(2026))
    );
}

#[test]
fn totals_beyond_the_signed_range_are_rejected() {
    let huge = vec![PublicationRecord::new(2022, u64::MAX, 1)];
    assert!(matches!(
        DataStore::new(huge),
        Err(DataError::TotalTooLarge { year: 2022, .. })
    ));
    let ok = vec![PublicationRecord::new(2022, i64::MAX as u64, 1)];
    assert_eq!(DataStore::new(ok).unwrap().records()[0].closed_access(), i64::MAX - 1);
}
