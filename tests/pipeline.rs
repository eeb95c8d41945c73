//! End-to-end pipeline checks over a synthetic raw observation table:
//! derive features, attach labels, train, evaluate, render plots.

use chrono::{Duration, NaiveDate};
use floodcast::{
    attach_label, derive_features, plot_correlation_heatmap, plot_predicted_events,
    plot_time_series, train_flood_classifier, ForestParams, DEFAULT_FLOOD_THRESHOLD_MM,
    RAW_DATE_COLUMN, RAW_MEAN_TEMP_COLUMN, RAW_PRECIP_COLUMN,
};
use polars::df;
use polars::prelude::DataFrame;

/// 120 days with a heavy-rain spell every 11th day and an occasional missing
/// temperature reading.
fn synthetic_season() -> DataFrame {
    let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
    let mut dates = Vec::new();
    let mut precip = Vec::new();
    let mut temp = Vec::new();
    for i in 0..120i64 {
        dates.push((start + Duration::days(i)).to_string());
        precip.push(Some(if i % 11 == 0 {
            18.0
        } else {
            (i % 4) as f64
        }));
        temp.push(if i % 17 == 0 {
            None
        } else {
            Some(-2.0 + (i % 20) as f64)
        });
    }
    df!(
        RAW_DATE_COLUMN => dates,
        RAW_PRECIP_COLUMN => precip,
        RAW_MEAN_TEMP_COLUMN => temp,
    )
    .unwrap()
}

#[test]
fn features_align_one_to_one_with_raw_rows() {
    let raw = synthetic_season();
    let rows = derive_features(&raw).unwrap();
    assert_eq!(rows.len(), raw.height());
    for pair in rows.windows(2) {
        assert!(pair[0].date < pair[1].date);
        assert_eq!(pair[1].precip_prev_day, pair[0].precipitation);
    }
}

#[test]
fn labels_flag_exactly_the_days_before_heavy_rain() {
    let rows = derive_features(&synthetic_season()).unwrap();
    let labeled = attach_label(&rows, DEFAULT_FLOOD_THRESHOLD_MM);
    for i in 0..labeled.len() {
        let expected = match rows.get(i + 1) {
            Some(next) => i32::from(next.precipitation >= DEFAULT_FLOOD_THRESHOLD_MM),
            None => 0,
        };
        assert_eq!(labeled[i].flood_imminent, expected, "label mismatch at row {i}");
    }
}

#[test]
fn training_splits_chronologically_and_reports() {
    let rows = derive_features(&synthetic_season()).unwrap();
    let labeled = attach_label(&rows, DEFAULT_FLOOD_THRESHOLD_MM);
    let outcome = train_flood_classifier(&labeled, ForestParams::default()).unwrap();

    assert_eq!(outcome.train_rows.len(), 96);
    assert_eq!(outcome.test_rows.len(), 24);
    assert_eq!(outcome.test_rows[..], labeled[96..]);
    assert_eq!(outcome.predictions.len(), 24);

    let confusion_total: usize = outcome.summary.confusion.iter().flatten().sum();
    assert_eq!(confusion_total, 24);
    assert!((0.0..=1.0).contains(&outcome.summary.accuracy));
    assert!((0.0..=1.0).contains(&outcome.summary.roc_auc));
    assert!(outcome.summary.report.contains("precision"));
}

#[test]
fn pipeline_outputs_render_to_png() {
    let rows = derive_features(&synthetic_season()).unwrap();
    let labeled = attach_label(&rows, DEFAULT_FLOOD_THRESHOLD_MM);
    let outcome = train_flood_classifier(&labeled, ForestParams::default()).unwrap();

    let dir = tempfile::tempdir().unwrap();

    let dates: Vec<NaiveDate> = rows.iter().map(|row| row.date).collect();
    let precip: Vec<f64> = rows.iter().map(|row| row.precipitation).collect();
    let series_path = dir.path().join("charts/daily_precipitation.png");
    plot_time_series(
        &dates,
        &precip,
        "Precipitation (mm)",
        "Daily Precipitation",
        &series_path,
    )
    .unwrap();
    assert!(series_path.metadata().unwrap().len() > 0);

    let heatmap_path = dir.path().join("charts/feature_correlation.png");
    plot_correlation_heatmap(&rows, &heatmap_path).unwrap();
    assert!(heatmap_path.exists());

    let test_dates: Vec<NaiveDate> = outcome.test_rows.iter().map(|row| row.features.date).collect();
    let events_path = dir.path().join("charts/predicted_events.png");
    plot_predicted_events(
        &test_dates,
        &outcome.predictions,
        "Predicted Flood Events",
        &events_path,
    )
    .unwrap();
    assert!(events_path.exists());
}
