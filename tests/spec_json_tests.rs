use chart_sync::ChartError;
use chart_sync::api::{ChangeSet, ChartEngine};
use chart_sync::core::{ChartKind, ChartSpec, DataPoint, Dataset, SeriesData, Viewport};
use chart_sync::render::{HeadlessBackend, LiveChart, Surface};
use serde_json::json;

const SALES_SPEC: &str = r##"{
  "chartType": "bar",
  "labels": ["2006", "2007", "2008"],
  "datasets": [
    { "label": "Series A", "data": [65, 59, 80], "borderWidth": 2 },
    { "label": "Series B", "data": [28, null, 40], "backgroundColor": "#222" }
  ],
  "legend": false,
  "options": { "responsive": true, "scales": { "y": { "beginAtZero": true } } }
}"##;

#[test]
fn chart_spec_parses_camel_case_json() {
    let spec = ChartSpec::from_json_str(SALES_SPEC).expect("valid spec json");

    assert_eq!(spec.kind, ChartKind::Bar);
    assert_eq!(spec.labels, vec!["2006", "2007", "2008"]);
    assert!(spec.data.is_empty());
    assert_eq!(spec.legend, Some(false));
    assert_eq!(spec.options.get("responsive"), Some(&json!(true)));

    assert_eq!(spec.datasets.len(), 2);
    assert_eq!(spec.datasets[0].label.as_deref(), Some("Series A"));
    assert_eq!(spec.datasets[0].style.get("borderWidth"), Some(&json!(2)));
    assert_eq!(spec.datasets[1].data[1], DataPoint::Null);
    assert_eq!(spec.datasets[1].style.get("backgroundColor"), Some(&json!("#222")));
}

#[test]
fn flat_series_json_distinguishes_single_and_multi() {
    let single = ChartSpec::from_json_str(r#"{ "chartType": "pie", "data": [1, 2, 3] }"#)
        .expect("single series");
    assert_eq!(single.data.series_count(), 1);
    assert!(matches!(single.data, SeriesData::Single(_)));

    let multi = ChartSpec::from_json_str(
        r#"{ "chartType": "polarArea", "data": [[1, 2], [3, 4]], "seriesLabels": ["a", "b"] }"#,
    )
    .expect("multi series");
    assert_eq!(multi.kind, ChartKind::PolarArea);
    assert_eq!(multi.data.series_count(), 2);
    assert_eq!(multi.series_labels, vec!["a", "b"]);
}

#[test]
fn missing_chart_type_defaults_to_line() {
    let spec = ChartSpec::from_json_str(r#"{ "data": [1] }"#).expect("spec json");
    assert_eq!(spec.kind, ChartKind::Line);
}

#[test]
fn malformed_json_is_invalid_data() {
    let err = ChartSpec::from_json_str("{ \"chartType\": ").expect_err("truncated json");
    assert!(matches!(err, ChartError::InvalidData(_)));

    let err = ChartSpec::from_json_str(r#"{ "chartType": "scatter" }"#)
        .expect_err("unsupported kind");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn serialized_spec_parses_back() {
    let spec = ChartSpec::from_json_str(SALES_SPEC).expect("valid spec json");
    let text = spec.to_json_pretty().expect("serialize");
    let parsed = ChartSpec::from_json_str(&text).expect("reparse");

    assert_eq!(parsed.kind, spec.kind);
    assert_eq!(parsed.labels, spec.labels);
    assert_eq!(parsed.datasets, spec.datasets);
    assert_eq!(parsed.options.values(), spec.options.values());
}

#[test]
fn json_spec_drives_a_headless_chart() {
    let spec = ChartSpec::from_json_str(SALES_SPEC).expect("valid spec json");
    let mut engine = ChartEngine::new(
        HeadlessBackend::new(),
        Surface::new(Viewport::new(640, 480)),
        spec,
    );
    engine.initialize().expect("initialize");

    let chart = engine.chart().expect("live chart");
    let chart = chart.borrow();
    assert_eq!(chart.kind(), ChartKind::Bar);
    assert_eq!(chart.options().legend_display(), Some(false));
    assert_eq!(chart.options().get("responsive"), Some(&json!(true)));
    assert_eq!(chart.data().datasets[0].style.get("borderWidth"), Some(&json!(2)));
    assert!(chart.data().datasets[0].style.get("hoverBackgroundColor").is_some());
}

#[test]
fn empty_json_data_does_not_trigger_a_refresh() {
    let declared = ChartSpec::new(ChartKind::Bar)
        .with_labels(["x"])
        .with_datasets(vec![Dataset::new("A", DataPoint::series(&[1.0]))]);
    let parsed = ChartSpec::from_json_str(
        r#"{ "chartType": "bar", "labels": ["x"], "data": [],
             "datasets": [{ "label": "A", "data": [1] }] }"#,
    )
    .expect("spec json");

    let changes = ChangeSet::between(&declared, &parsed);
    assert!(changes.is_empty());

    let mut engine = ChartEngine::new(
        HeadlessBackend::new(),
        Surface::new(Viewport::new(640, 480)),
        declared,
    );
    engine.initialize().expect("initialize");
    let report = engine.apply(changes).expect("apply");
    assert!(!report.redrawn);
    assert!(report.diagnostics.is_empty());
}
