//! demos/synthetic_pipeline.rs
//!
//! Runs the whole pipeline offline on a generated season of weather so the
//! crate can be exercised without network access:
//! cargo run --example synthetic_pipeline

use chrono::{Duration, NaiveDate};
use floodcast::{
    attach_label, derive_features, plot_correlation_heatmap, plot_predicted_events,
    plot_time_series, train_flood_classifier, ForestParams, DEFAULT_FLOOD_THRESHOLD_MM,
    RAW_DATE_COLUMN, RAW_MEAN_TEMP_COLUMN, RAW_PRECIP_COLUMN,
};
use polars::df;
use polars::prelude::DataFrame;
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    println!("Generating a synthetic season of daily weather...");
    let raw = synthetic_season(240);

    let rows = derive_features(&raw)?;
    let labeled = attach_label(&rows, DEFAULT_FLOOD_THRESHOLD_MM);
    let positives: i32 = labeled.iter().map(|row| row.flood_imminent).sum();
    println!(
        "Derived {} feature rows, {} labeled flood-imminent.",
        rows.len(),
        positives
    );

    println!("Training the flood classifier...");
    let outcome = train_flood_classifier(&labeled, ForestParams::default())?;
    println!(
        "Accuracy {:.3}, ROC-AUC {:.3}, confusion {:?}",
        outcome.summary.accuracy, outcome.summary.roc_auc, outcome.summary.confusion
    );
    println!("{}", outcome.summary.report);

    println!("Rendering plots to visualizations/ ...");
    let out = Path::new("visualizations");
    let dates: Vec<NaiveDate> = rows.iter().map(|row| row.date).collect();
    let precip: Vec<f64> = rows.iter().map(|row| row.precipitation).collect();
    plot_time_series(
        &dates,
        &precip,
        "Precipitation (mm)",
        "Daily Precipitation",
        &out.join("daily_precipitation.png"),
    )?;
    plot_correlation_heatmap(&rows, &out.join("feature_correlation.png"))?;

    let test_dates: Vec<NaiveDate> = outcome
        .test_rows
        .iter()
        .map(|row| row.features.date)
        .collect();
    plot_predicted_events(
        &test_dates,
        &outcome.predictions,
        "Predicted Flood Events (held-out period)",
        &out.join("predicted_events.png"),
    )?;

    println!("Done.");
    Ok(())
}

/// A season with a heavy-rain spell roughly every other week.
fn synthetic_season(days: i64) -> DataFrame {
    let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
    let mut dates = Vec::new();
    let mut precip = Vec::new();
    let mut temp = Vec::new();
    for i in 0..days {
        dates.push((start + Duration::days(i)).to_string());
        precip.push(if i % 13 == 0 { 22.0 } else { (i % 5) as f64 });
        temp.push(-4.0 + (i % 25) as f64);
    }
    df!(
        RAW_DATE_COLUMN => dates,
        RAW_PRECIP_COLUMN => precip,
        RAW_MEAN_TEMP_COLUMN => temp,
    )
    .expect("synthetic frame construction cannot fail")
}
