use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("Cannot split {0} labeled rows chronologically; at least 2 are required")]
    NotEnoughRows(usize),

    #[error("Feature '{column}' is not a finite number at row {row}")]
    NonFiniteFeature { row: usize, column: &'static str },

    #[error("Failed to assemble the feature matrix: {0}")]
    InvalidData(String),

    #[error("Random forest training failed: {0}")]
    TrainingFailed(String),

    #[error("Random forest prediction failed: {0}")]
    PredictionFailed(String),
}
