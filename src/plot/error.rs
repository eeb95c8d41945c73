use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Failed to create parent directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to render chart to '{path}': {message}")]
    Render { path: PathBuf, message: String },

    #[error("Nothing to plot: the input is empty")]
    EmptyInput,

    #[error("Series lengths differ: {dates} dates vs {values} values")]
    LengthMismatch { dates: usize, values: usize },
}
