mod error;
mod features;
mod floodcast;
mod ingest;
mod model;
mod plot;
mod types;

pub use error::FloodcastError;
pub use floodcast::*;

pub use features::engineer::derive_features;
pub use features::error::FeatureError;
pub use features::label::{attach_label, DEFAULT_FLOOD_THRESHOLD_MM};

pub use ingest::downloader::ClimateDownloader;
pub use ingest::error::IngestError;

pub use model::error::TrainingError;
pub use model::metrics;
pub use model::training::{
    train_flood_classifier, EvaluationSummary, FloodClassifier, ForestParams, TrainingOutcome,
    TRAIN_FRACTION,
};

pub use plot::charts::{plot_correlation_heatmap, plot_predicted_events, plot_time_series};
pub use plot::error::PlotError;

pub use types::feature_row::{FeatureRow, LabeledRow, FEATURE_COLUMNS};
pub use types::raw_schema::{
    RAW_DATE_COLUMN, RAW_MEAN_TEMP_COLUMN, RAW_PRECIP_COLUMN, REQUIRED_RAW_COLUMNS,
};
