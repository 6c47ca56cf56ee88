use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn oapub() -> Command {
    Command::cargo_bin("oapub").unwrap()
}

#[test]
fn cli_shows_help() {
    oapub()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("oapub"))
        .stdout(predicate::str::contains("tooltip"));
}

#[test]
fn lists_sample_years() {
    oapub()
        .arg("years")
        .assert()
        .success()
        .stdout("2020\n2021\n2022\n2023\n2024\n2025\n");
}

#[test]
fn tooltip_for_a_year() {
    oapub()
        .args(["tooltip", "--year", "2023"])
        .assert()
        .success()
        .stdout(predicate::str::contains("450 (72.6%)"))
        .stdout(predicate::str::contains("Gold,Green:"));

    oapub()
        .args(["tooltip", "--year", "2023", "--html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<div"));

    oapub()
        .args(["tooltip", "--year", "1999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no record for year 1999"));
}

#[test]
fn stats_for_a_range() {
    oapub()
        .args(["stats", "--range", "2022:2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("years=4"))
        .stdout(predicate::str::contains("oa_share=72.2%"))
        .stdout(predicate::str::contains("peak_year=2025"));

    oapub()
        .args(["stats", "--range", "2025:2022"])
        .assert()
        .failure();
}

#[test]
fn chart_and_export_write_files() {
    let dir = tempdir().unwrap();
    let svg = dir.path().join("chart.svg");
    oapub()
        .args(["chart", "--range", "2022:2025", "--legend", "right", "--out"])
        .arg(&svg)
        .assert()
        .success();
    assert!(fs::read_to_string(&svg).unwrap().contains("<svg"));

    let csv = dir.path().join("oa.csv");
    oapub()
        .args(["export", "--range", "2023", "--out"])
        .arg(&csv)
        .assert()
        .success();
    assert_eq!(fs::read_to_string(&csv).unwrap().lines().count(), 2);
}

#[test]
fn chart_defaults_to_the_export_file_name() {
    let dir = tempdir().unwrap();
    oapub()
        .current_dir(dir.path())
        .args(["chart", "--range", "2022:2023", "--format", "svg"])
        .assert()
        .success();
    assert!(dir.path().join("Publications_OA_2022_2023.svg").exists());
}

#[test]
fn config_file_supplies_range_and_data() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("pubs.json"),
        r#"[{"year": 2023, "total": 10, "oa": 4, "details": {"Gold": 4}},
            {"year": 2024, "total": 8, "oa": 8}]"#,
    )
    .unwrap();
    let cfg = dir.path().join("oapub.toml");
    fs::write(&cfg, "data = \"pubs.json\"\nrange = { start = 2024, end = 2024 }\n").unwrap();

    oapub()
        .arg("--config")
        .arg(&cfg)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("years=1"))
        .stdout(predicate::str::contains("oa_share=100.0%"));
}

#[test]
fn option_prints_json() {
    let out = oapub()
        .args(["option", "--range", "2024:2025"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["xAxis"]["data"], serde_json::json!(["2024", "2025"]));
}

#[test]
fn range_outside_the_data_is_rejected() {
    oapub()
        .args(["stats", "--range", "2019:2023"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("year 2019 is not in the data"))
        .stderr(predicate::str::contains("2020:2025"));

    let dir = tempdir().unwrap();
    oapub()
        .current_dir(dir.path())
        .args(["chart", "--range", "2023:2030"])
        .assert()
        .failure();
    assert!(fs::read_dir(dir.path()).unwrap().next().is_none());
}
