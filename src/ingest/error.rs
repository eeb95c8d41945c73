use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("No years requested for station {station}")]
    NoYearsRequested { station: u32 },

    #[error("Network request failed for {0}")]
    Network(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body for {0}")]
    Body(String, #[source] reqwest::Error),

    #[error("I/O error processing CSV data for station {station}")]
    CsvReadIo {
        station: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("Parsing error processing CSV data for station {station}")]
    CsvReadPolars {
        station: u32,
        #[source]
        source: PolarsError,
    },

    #[error("Failed to stack year tables for station {station}")]
    Stack {
        station: u32,
        #[source]
        source: PolarsError,
    },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
