use oa_pubstats::config::ChartSettings;
use oa_pubstats::filter::filter_by_range;
use oa_pubstats::option::chart_option;
use oa_pubstats::{DataStore, YearRange};

#[test]
fn option_has_two_stacked_series() {
    let store = DataStore::sample();
    let range = YearRange::new(2022, 2025).unwrap();
    let selected = filter_by_range(store.records(), range);
    let opt = chart_option(&selected, range, &ChartSettings::default());

    assert_eq!(opt["xAxis"]["data"], serde_json::json!(["2022", "2023", "2024", "2025"]));
    assert_eq!(
        opt["toolbox"]["feature"]["saveAsImage"]["name"],
        "Publications_OA_2022_2025"
    );

    let series = opt["series"].as_array().unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series[0]["name"], "Open access");
    assert_eq!(series[1]["name"], "Closed access");
    assert_eq!(series[0]["stack"], "total");
    assert_eq!(series[1]["stack"], "total");
    assert_eq!(series[0]["itemStyle"]["color"], "#91cc75");
    assert_eq!(series[1]["itemStyle"]["color"], "#5470c6");

    let open = series[0]["data"].as_array().unwrap();
    assert_eq!(open[1]["value"], 450);
    assert_eq!(open[1]["label"]["formatter"], "73%");
    let tip = open[1]["tooltip"]["formatter"].as_str().unwrap();
    assert!(tip.contains("Year 2023"));

    let closed = series[1]["data"].as_array().unwrap();
    assert_eq!(closed[1]["value"], 170);
}

#[test]
fn empty_selection_gives_empty_axes() {
    let range = YearRange::single(1999);
    let opt = chart_option(&[], range, &ChartSettings::default());
    assert_eq!(opt["xAxis"]["data"].as_array().unwrap().len(), 0);
    assert_eq!(opt["series"][0]["data"].as_array().unwrap().len(), 0);
}
