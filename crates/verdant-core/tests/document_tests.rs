//! Serialization contract tests for analysis documents.
//!
//! Downstream chart and report consumers read these documents by fixed key
//! paths, so the layout is checked explicitly here.

use proptest::prelude::*;
use serde_json::json;
use verdant_core::prelude::*;

fn series(values: &[f64], unit: &str) -> MetricSeries {
    let previous = values.len().checked_sub(2).map(|i| values[i]);
    MetricSeries {
        values: values.to_vec(),
        unit: unit.to_string(),
        stats: MetricStats {
            current: values[values.len() - 1],
            previous,
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            average: 0.0,
            trend: values[values.len() - 1] - values[0],
            year_over_year_change: previous.map_or(0.0, |p| values[values.len() - 1] - p),
            unit: unit.to_string(),
        },
    }
}

fn sample_result() -> AnalysisResult {
    let asset = AssetAnalysis {
        name: "Acme Industrial".to_string(),
        sector: Some("Industrials".to_string()),
        time_series: TimeSeries {
            time_points: vec!["January".into(), "February".into(), "March".into()],
            metrics: MetricSet::from_fn(|path| series(&[10.0, 20.0, 15.0], path.metric_name())),
        },
    };
    AnalysisResult {
        fund_name: "Green Horizons".to_string(),
        analysis_period: "Q1".to_string(),
        assets_analysis: vec![asset],
        fund_statistics: MetricSet::from_fn(|_| -5.0),
    }
}

// =============================================================================
// LAYOUT
// =============================================================================

#[test]
fn test_chart_paths_are_present() {
    let value = serde_json::to_value(sample_result()).unwrap();

    let co2 = &value["assets_analysis"][0]["time_series"]["metrics"]["environmental"]
        ["CO2_emission"]["values"];
    assert_eq!(co2, &json!([10.0, 20.0, 15.0]));

    let female = &value["assets_analysis"][0]["time_series"]["metrics"]["social"]
        ["board_diversity"]["female_percentage"]["stats"]["current"];
    assert_eq!(female, &json!(15.0));

    assert_eq!(value["assets_analysis"][0]["sector"], "Industrials");
    assert_eq!(
        value["assets_analysis"][0]["time_series"]["time_points"],
        json!(["January", "February", "March"])
    );
}

#[test]
fn test_fund_statistics_layout() {
    let value = serde_json::to_value(sample_result()).unwrap();
    let stats = &value["fund_statistics"];

    assert_eq!(stats["environmental"]["CO2_emission"], -5.0);
    assert_eq!(stats["social"]["board_diversity"]["minority_percentage"], -5.0);
    assert_eq!(stats["governance"]["cybersecurity_incidents"], -5.0);
}

#[test]
fn test_previous_omitted_for_single_observation() {
    let single = series(&[42.0], "tCO2e");
    let value = serde_json::to_value(&single).unwrap();

    assert!(value["stats"].get("previous").is_none());
    assert_eq!(value["stats"]["year_over_year_change"], 0.0);
    assert_eq!(value["unit"], "tCO2e");
}

#[test]
fn test_missing_sector_omitted() {
    let mut result = sample_result();
    result.assets_analysis[0].sector = None;
    let value = serde_json::to_value(&result).unwrap();
    assert!(value["assets_analysis"][0].get("sector").is_none());
}

#[test]
fn test_chart_images_field_is_ignored() {
    let mut value = serde_json::to_value(sample_result()).unwrap();
    value["chart_images"] = json!({ "co2_emissions": "data:image/png;base64,AAAA" });

    let parsed: AnalysisResult = serde_json::from_value(value).unwrap();
    assert_eq!(parsed, sample_result());
}

// =============================================================================
// ROUND TRIP
// =============================================================================

#[test]
fn test_result_round_trip() {
    let original = sample_result();
    let text = serde_json::to_string_pretty(&original).unwrap();
    let parsed: AnalysisResult = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, original);
}

proptest! {
    #[test]
    fn prop_fund_statistics_round_trip(values in prop::collection::vec(-1.0e9f64..1.0e9, 10)) {
        let stats: FundStatistics = MetricSet::from_fn(|path| {
            let index = MetricPath::ALL.iter().position(|p| *p == path).unwrap();
            values[index]
        });
        let text = serde_json::to_string(&stats).unwrap();
        let parsed: FundStatistics = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(parsed, stats);
    }
}
