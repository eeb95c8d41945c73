use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("Required column '{column}' not found in raw observation table")]
    MissingColumn { column: &'static str },

    #[error("Failed to read column '{column}' from raw observation table")]
    ColumnRead {
        column: &'static str,
        #[source]
        source: PolarsError,
    },

    #[error("Raw observation row {row} has no date value")]
    MissingDate { row: usize },

    #[error("Failed to parse raw date value '{value}'")]
    DateParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
