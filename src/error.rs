use crate::features::error::FeatureError;
use crate::ingest::error::IngestError;
use crate::model::error::TrainingError;
use crate::plot::error::PlotError;
use thiserror::Error;

/// Crate-level error: every variant names the pipeline stage that failed,
/// with the stage's own error as the cause.
#[derive(Debug, Error)]
pub enum FloodcastError {
    #[error("Data acquisition failed")]
    Ingest(#[from] IngestError),

    #[error("Feature engineering failed")]
    Feature(#[from] FeatureError),

    #[error("Model training failed")]
    Training(#[from] TrainingError),

    #[error("Plot rendering failed")]
    Plot(#[from] PlotError),
}
