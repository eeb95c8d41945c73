//! Downloads historical daily weather observations from the Environment and
//! Climate Change Canada bulk-data service.
//!
//! The service emits one headered CSV per station and year; this module
//! fetches the requested years one at a time and stacks them into a single
//! table in request order. Provider column names pass through verbatim.

use crate::ingest::error::IngestError;
use log::{info, warn};
use polars::frame::DataFrame;
use polars::prelude::{CsvReadOptions, SerReader};
use reqwest::Client;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::task;

const BULK_DATA_URL: &str = "https://climate-data.canada.ca/doc/cron_download/download";

/// Every request uses the same fixed timeout; the service can be slow but a
/// hung connection should not stall the pipeline indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct ClimateDownloader {
    client: Client,
}

impl ClimateDownloader {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Fetches daily observations for `station` across `years` and returns
    /// them as one table, years stacked in request order.
    ///
    /// Years are requested sequentially. The first failing year aborts the
    /// whole fetch; no partial multi-year table is ever returned.
    ///
    /// # Errors
    ///
    /// [`IngestError::NoYearsRequested`] for an empty year list, transport
    /// and status errors per failing request, and CSV parse errors per
    /// malformed body.
    pub async fn daily_observations(
        &self,
        station: u32,
        years: &[i32],
    ) -> Result<DataFrame, IngestError> {
        if years.is_empty() {
            return Err(IngestError::NoYearsRequested { station });
        }

        let mut combined: Option<DataFrame> = None;
        for &year in years {
            info!("Downloading daily observations for station {station}, year {year}");
            let body = self.download_year(station, year).await?;
            let frame = Self::csv_to_dataframe(body.into_bytes(), station).await?;
            combined = Some(match combined {
                None => frame,
                Some(mut acc) => {
                    acc.vstack_mut(&frame)
                        .map_err(|source| IngestError::Stack { station, source })?;
                    acc
                }
            });
        }

        // years is non-empty, so at least one frame landed
        let combined = combined.unwrap_or_default();
        info!(
            "Fetched {} daily observation rows for station {station}",
            combined.height()
        );
        Ok(combined)
    }

    /// Performs the single blocking-from-the-caller's-perspective request
    /// for one station-year and returns the CSV body.
    async fn download_year(&self, station: u32, year: i32) -> Result<String, IngestError> {
        let url = format!(
            "{BULK_DATA_URL}?stationID={station}&Year={year}&Month=1&Day=1&format=csv&timeframe=2&submit=Download+Data"
        );

        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| IngestError::Network(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {url}: {e:?}");
                return Err(if let Some(status) = e.status() {
                    IngestError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    IngestError::Network(url, e)
                });
            }
        };

        response.text().await.map_err(|e| IngestError::Body(url, e))
    }

    /// Parses one year's headered CSV body into a DataFrame on a blocking
    /// task, going through a temp file so polars can read it by path.
    async fn csv_to_dataframe(bytes: Vec<u8>, station: u32) -> Result<DataFrame, IngestError> {
        task::spawn_blocking(move || {
            let mut temp_file =
                NamedTempFile::new().map_err(|source| IngestError::CsvReadIo { station, source })?;
            temp_file
                .write_all(&bytes)
                .map_err(|source| IngestError::CsvReadIo { station, source })?;
            temp_file
                .flush()
                .map_err(|source| IngestError::CsvReadIo { station, source })?;

            CsvReadOptions::default()
                .with_has_header(true)
                .try_into_reader_with_file_path(Some(temp_file.path().to_path_buf()))
                .map_err(|source| IngestError::CsvReadPolars { station, source })?
                .finish()
                .map_err(|source| IngestError::CsvReadPolars { station, source })
        })
        .await?
    }
}

impl Default for ClimateDownloader {
    fn default() -> Self {
        Self::new()
    }
}
