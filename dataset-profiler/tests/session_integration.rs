//! Integration tests for AnalysisSession and chart projections.

use std::sync::Arc;

use dataset_profiler::analyzers::{BinCount, ColumnKind, FrequencyEntry, NULL_LABEL};
use dataset_profiler::chart::{ChartDataset, ChartMode, ChartRequest, CHART_HISTOGRAM_BINS};
use dataset_profiler::dataset::Dataset;
use dataset_profiler::error::ProfileError;
use dataset_profiler::profiler::ProfileConfig;
use dataset_profiler::session::AnalysisSession;
use dataset_profiler::test_fixtures::{create_basic_dataset, create_sensor_dataset};

fn sensor_session(rows: usize) -> AnalysisSession {
    let mut session = AnalysisSession::new();
    session.load(create_sensor_dataset(rows).unwrap());
    session
}

#[test]
fn test_load_classifies_and_selects_defaults() {
    let session = sensor_session(50);
    assert_eq!(session.kinds().get("id"), Some(&ColumnKind::Numeric));
    assert_eq!(session.kinds().get("station"), Some(&ColumnKind::Categorical));
    assert_eq!(session.kinds().get("reading"), Some(&ColumnKind::Numeric));

    // The first numeric column may be x itself
    assert_eq!(session.selection().x.as_deref(), Some("id"));
    assert_eq!(session.selection().y.as_deref(), Some("id"));
}

#[test]
fn test_bar_chart_switches_on_column_kind() {
    let mut session = sensor_session(50);

    session.set_x("station").unwrap();
    let chart = session.chart();
    let ChartDataset::Categories(bars) = &*chart else {
        panic!("expected categories, got {chart:?}");
    };
    assert_eq!(bars.len(), 5);
    assert_eq!(bars.iter().map(|b| b.count).sum::<usize>(), 50);

    session.set_x("reading").unwrap();
    let chart = session.chart();
    let ChartDataset::Histogram(bins) = &*chart else {
        panic!("expected histogram, got {chart:?}");
    };
    assert_eq!(bins.len(), CHART_HISTOGRAM_BINS);
}

#[test]
fn test_bar_chart_buckets_missing_categories() {
    let mut session = AnalysisSession::new();
    session.load(Dataset::from_csv_str("tag,n\nred,1\n,2\nNA,3\nred,4\n").unwrap());
    let chart = session.chart();
    assert_eq!(
        *chart,
        ChartDataset::Categories(vec![
            FrequencyEntry::new("red", 2),
            FrequencyEntry::new(NULL_LABEL, 2),
        ])
    );
}

#[test]
fn test_line_and_scatter_asymmetry() {
    let mut session = sensor_session(60);
    session.set_x("label").unwrap();
    session.set_y("reading").unwrap();

    session.set_mode(ChartMode::Line);
    let line = session.chart();
    let ChartDataset::Line(series) = &*line else {
        panic!("expected line");
    };
    assert_eq!(series.len(), 60);
    assert!(series.gap_count() > 0);
    assert_eq!(series.points[0].x.as_deref(), Some("t00000"));

    session.set_x("id").unwrap();
    session.set_mode(ChartMode::Scatter);
    let scatter = session.chart();
    let ChartDataset::Scatter(points) = &*scatter else {
        panic!("expected scatter");
    };
    assert_eq!(points.len(), 60 - series.gap_count());
}

#[test]
fn test_selection_errors_leave_state_untouched() {
    let mut session = AnalysisSession::new();
    session.load(create_basic_dataset().unwrap());

    let err = session.set_x("missing").unwrap_err();
    assert!(matches!(err, ProfileError::ColumnNotFound { .. }));
    assert_eq!(err.to_string(), "Column 'missing' not found in dataset");
    assert_eq!(session.selection().x.as_deref(), Some("a"));
}

#[test]
fn test_results_are_recomputed_per_dataset() {
    let mut session = AnalysisSession::new();
    session.load(create_basic_dataset().unwrap());
    let before = session.profile();
    assert_eq!(before.null_counts.get("a"), Some(&1));

    session.load(Dataset::from_csv_str("a,b\n5,z\n").unwrap());
    let after = session.profile();
    assert_eq!(after.null_counts.get("a"), Some(&0));
    assert_eq!(after.row_count, 1);
    assert_ne!(before.dataset_id, after.dataset_id);
}

#[test]
fn test_memoized_chart_matches_fresh_build() {
    let mut session = sensor_session(80);
    let request = ChartRequest::scatter("id", "reading");

    let cached = session.chart_for(&request);
    let again = session.chart_for(&request);
    assert!(Arc::ptr_eq(&cached, &again));

    let mut fresh = sensor_session(80);
    assert_eq!(*fresh.chart_for(&request), *cached);
}

#[test]
fn test_standalone_histogram_and_top_k_parameters() {
    let mut session = sensor_session(100);
    session.set_x("station").unwrap();
    session.set_top_k(2);
    assert_eq!(session.top_k().len(), 2);

    session.set_x("reading").unwrap();
    session.set_bins(BinCount::Fixed(4));
    assert_eq!(session.histogram().len(), 4);
    session.set_bins(BinCount::SquareRoot);
    assert!(session.histogram().len() >= 9);
}

#[test]
fn test_custom_config_applies_to_session() {
    let config = ProfileConfig {
        chart_histogram_bins: 5,
        null_label: "<none>".to_string(),
        preview_rows: 10,
        ..ProfileConfig::default()
    };
    let mut session = AnalysisSession::with_config(config).unwrap();
    session.load(create_sensor_dataset(40).unwrap());

    assert_eq!(session.preview().len(), 10);
    let histogram = session.chart_for(&ChartRequest::bar("reading"));
    assert!(matches!(&*histogram, ChartDataset::Histogram(bins) if bins.len() == 5));

    session.load(Dataset::from_csv_str("t,u\n,1\nx,2\n").unwrap());
    let chart = session.chart();
    let ChartDataset::Categories(bars) = &*chart else {
        panic!("expected categories");
    };
    assert_eq!(bars[0].label, "<none>");

    let invalid = ProfileConfig {
        chart_histogram_bins: 0,
        ..ProfileConfig::default()
    };
    assert!(AnalysisSession::with_config(invalid).is_err());
}

#[test]
fn test_clear_yields_empty_everything() {
    let mut session = sensor_session(30);
    session.chart();
    session.profile();
    session.clear();

    assert!(session.is_empty());
    assert!(session.chart().is_empty());
    assert!(session.summaries().is_empty());
    assert_eq!(session.duplicate_count(), 0);
    assert!(session.preview().is_empty());
}
