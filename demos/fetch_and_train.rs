//! demos/fetch_and_train.rs
//!
//! Fetches real historical observations from the Environment Canada bulk
//! service, trains the flood classifier, and renders the diagnostics:
//! cargo run --example fetch_and_train

use chrono::NaiveDate;
use floodcast::{plot_predicted_events, plot_time_series, Floodcast};
use std::error::Error;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let client = Floodcast::new();
    let station = 31688; // Toronto City Centre
    let years = vec![2018, 2019, 2020];

    println!("Fetching daily observations for station {station}...");
    let outcome = client
        .train()
        .station(station)
        .years(years)
        .call()
        .await?;

    println!(
        "Trained on {} rows, evaluated on {}.",
        outcome.train_rows.len(),
        outcome.test_rows.len()
    );
    println!(
        "Accuracy {:.3}, ROC-AUC {:.3}",
        outcome.summary.accuracy, outcome.summary.roc_auc
    );
    println!("{}", outcome.summary.report);

    let out = Path::new("visualizations");
    let train_dates: Vec<NaiveDate> = outcome
        .train_rows
        .iter()
        .map(|row| row.features.date)
        .collect();
    let train_precip: Vec<f64> = outcome
        .train_rows
        .iter()
        .map(|row| row.features.precipitation)
        .collect();
    plot_time_series(
        &train_dates,
        &train_precip,
        "Precipitation (mm)",
        "Daily Precipitation (training period)",
        &out.join("station_precipitation.png"),
    )?;

    let test_dates: Vec<NaiveDate> = outcome
        .test_rows
        .iter()
        .map(|row| row.features.date)
        .collect();
    plot_predicted_events(
        &test_dates,
        &outcome.predictions,
        "Predicted Flood Events (held-out period)",
        &out.join("station_predicted_events.png"),
    )?;

    println!("Plots written to visualizations/.");
    Ok(())
}
