//! Main entry point for running the flood-forecasting pipeline.
//!
//! [`Floodcast`] composes the stages — acquisition, feature engineering,
//! labeling, training — behind builder-style methods, so a whole training
//! run is one call. The individual stage functions stay public for callers
//! that want to intercept intermediate tables.

use crate::error::FloodcastError;
use crate::features::engineer::derive_features;
use crate::features::label::{attach_label, DEFAULT_FLOOD_THRESHOLD_MM};
use crate::ingest::downloader::ClimateDownloader;
use crate::model::training::{train_flood_classifier, ForestParams, TrainingOutcome};
use bon::bon;
use polars::frame::DataFrame;

/// Client for fetching station weather data and training flood classifiers.
///
/// # Examples
///
/// ```no_run
/// # use floodcast::{Floodcast, FloodcastError};
/// # async fn run() -> Result<(), FloodcastError> {
/// let client = Floodcast::new();
///
/// let outcome = client
///     .train()
///     .station(31688) // Toronto City Centre
///     .years(vec![2019, 2020])
///     .call()
///     .await?;
///
/// println!("{}", outcome.summary.report);
/// # Ok(())
/// # }
/// ```
pub struct Floodcast {
    downloader: ClimateDownloader,
}

#[bon]
impl Floodcast {
    pub fn new() -> Self {
        Self {
            downloader: ClimateDownloader::new(),
        }
    }

    /// Fetches the raw daily observation table for a station.
    ///
    /// One request per year, sequential, stacked in request order. Column
    /// names are the provider's, verbatim; pass the result straight to
    /// [`derive_features`](crate::derive_features).
    ///
    /// # Errors
    ///
    /// Returns [`FloodcastError::Ingest`] when any year's fetch or parse
    /// fails; no partial table is returned.
    #[builder]
    pub async fn observations(
        &self,
        station: u32,
        years: Vec<i32>,
    ) -> Result<DataFrame, FloodcastError> {
        let frame = self.downloader.daily_observations(station, &years).await?;
        Ok(frame)
    }

    /// Runs the whole pipeline: fetch, derive features, label, train.
    ///
    /// # Arguments
    ///
    /// * `.station(u32)`: **Required.** Environment Canada station id.
    /// * `.years(Vec<i32>)`: **Required.** Years to fetch, requested in order.
    /// * `.threshold_mm(f64)`: Optional. Next-day precipitation at or above
    ///   this labels a row flood-imminent. Defaults to 10.0 mm.
    /// * `.params(ForestParams)`: Optional. Forest size and seed; defaults
    ///   to 200 seeded trees.
    ///
    /// # Errors
    ///
    /// The [`FloodcastError`] variant names the stage that failed:
    /// acquisition, feature engineering, or training.
    #[builder]
    pub async fn train(
        &self,
        station: u32,
        years: Vec<i32>,
        threshold_mm: Option<f64>,
        params: Option<ForestParams>,
    ) -> Result<TrainingOutcome, FloodcastError> {
        let threshold_mm = threshold_mm.unwrap_or(DEFAULT_FLOOD_THRESHOLD_MM);
        let params = params.unwrap_or_default();

        let raw = self.downloader.daily_observations(station, &years).await?;
        let features = derive_features(&raw)?;
        let labeled = attach_label(&features, threshold_mm);
        let outcome = train_flood_classifier(&labeled, params)?;
        Ok(outcome)
    }
}

impl Default for Floodcast {
    fn default() -> Self {
        Self::new()
    }
}
