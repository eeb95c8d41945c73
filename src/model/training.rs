//! Fits and evaluates the next-day flood classifier.
//!
//! The split is chronological, never shuffled: the first 80% of rows train,
//! the remaining tail evaluates. Shuffling a time series here would leak
//! future rows into training.

use crate::model::error::TrainingError;
use crate::model::metrics;
use crate::types::feature_row::{LabeledRow, FEATURE_COLUMNS};
use log::info;
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

/// The fitted ensemble type, concrete over the crate's matrix and label
/// representations.
pub type FloodClassifier = RandomForestClassifier<f64, i32, DenseMatrix<f64>, Vec<i32>>;

/// Share of rows assigned to the training partition.
pub const TRAIN_FRACTION: f64 = 0.8;

/// Random-forest hyperparameters the pipeline exposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestParams {
    /// Number of trees in the ensemble.
    pub n_trees: u16,
    /// Seed for bootstrap sampling, fixed so runs reproduce exactly.
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 200,
            seed: 42,
        }
    }
}

/// Test-partition metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub accuracy: f64,
    /// 0.0 when the test partition holds only one class (AUC undefined).
    pub roc_auc: f64,
    /// Rows index the truth, columns the prediction, class order 0 then 1.
    pub confusion: [[usize; 2]; 2],
    /// Per-class precision/recall/F1/support text block.
    pub report: String,
}

/// Everything one training invocation produces. Created once, then read-only;
/// nothing here is persisted.
#[derive(Debug)]
pub struct TrainingOutcome {
    pub model: FloodClassifier,
    /// The chronological head used for fitting, in input order.
    pub train_rows: Vec<LabeledRow>,
    /// The held-out chronological tail, in input order.
    pub test_rows: Vec<LabeledRow>,
    /// Predictions aligned with `test_rows`.
    pub predictions: Vec<i32>,
    pub summary: EvaluationSummary,
}

/// Trains a seeded random forest on the chronological head of `rows` and
/// evaluates it on the tail.
///
/// The training slice is rebalanced by deterministically duplicating
/// minority-class rows to parity before fitting; the test slice is never
/// resampled or reordered.
///
/// # Errors
///
/// [`TrainingError::NotEnoughRows`] for fewer than 2 rows,
/// [`TrainingError::NonFiniteFeature`] when any predictor is NaN or
/// infinite, and fit/predict failures from the underlying ensemble.
pub fn train_flood_classifier(
    rows: &[LabeledRow],
    params: ForestParams,
) -> Result<TrainingOutcome, TrainingError> {
    if rows.len() < 2 {
        return Err(TrainingError::NotEnoughRows(rows.len()));
    }
    validate_finite(rows)?;

    let split = (rows.len() as f64 * TRAIN_FRACTION) as usize;
    let (train_rows, test_rows) = rows.split_at(split);
    info!(
        "Fitting flood classifier on {} rows, holding out {}",
        train_rows.len(),
        test_rows.len()
    );

    let balanced = balance_classes(train_rows);
    let x_train = feature_matrix(&balanced)?;
    let y_train: Vec<i32> = balanced.iter().map(|row| row.flood_imminent).collect();

    let model = RandomForestClassifier::fit(
        &x_train,
        &y_train,
        RandomForestClassifierParameters::default()
            .with_n_trees(params.n_trees)
            .with_seed(params.seed),
    )
    .map_err(|e| TrainingError::TrainingFailed(e.to_string()))?;

    let x_test = feature_matrix(test_rows)?;
    let y_test: Vec<i32> = test_rows.iter().map(|row| row.flood_imminent).collect();
    let predictions = model
        .predict(&x_test)
        .map_err(|e| TrainingError::PredictionFailed(e.to_string()))?;

    let summary = evaluate(&y_test, &predictions);
    info!(
        "Flood classifier evaluated: accuracy {:.3}, roc_auc {:.3}",
        summary.accuracy, summary.roc_auc
    );

    Ok(TrainingOutcome {
        model,
        train_rows: train_rows.to_vec(),
        test_rows: test_rows.to_vec(),
        predictions,
        summary,
    })
}

fn validate_finite(rows: &[LabeledRow]) -> Result<(), TrainingError> {
    for (row, labeled) in rows.iter().enumerate() {
        for (&column, value) in FEATURE_COLUMNS.iter().zip(labeled.features.feature_vector()) {
            if !value.is_finite() {
                return Err(TrainingError::NonFiniteFeature { row, column });
            }
        }
    }
    Ok(())
}

fn feature_matrix(rows: &[LabeledRow]) -> Result<DenseMatrix<f64>, TrainingError> {
    let vectors: Vec<Vec<f64>> = rows
        .iter()
        .map(|row| row.features.feature_vector().to_vec())
        .collect();
    DenseMatrix::from_2d_vec(&vectors).map_err(|e| TrainingError::InvalidData(e.to_string()))
}

/// Duplicates minority-class rows cyclically until both classes have equal
/// counts. The forest has no per-class weighting, so parity in the bootstrap
/// pool stands in for it. A single-class slice comes back unchanged.
fn balance_classes(rows: &[LabeledRow]) -> Vec<LabeledRow> {
    let minority_class = {
        let positives = rows.iter().filter(|row| row.flood_imminent == 1).count();
        let negatives = rows.len() - positives;
        if positives == 0 || negatives == 0 {
            return rows.to_vec();
        }
        i32::from(positives < negatives)
    };
    let minority: Vec<&LabeledRow> = rows
        .iter()
        .filter(|row| row.flood_imminent == minority_class)
        .collect();
    let deficit = rows.len() - 2 * minority.len();

    let mut balanced = rows.to_vec();
    for i in 0..deficit {
        balanced.push(minority[i % minority.len()].clone());
    }
    balanced
}

fn evaluate(y_true: &[i32], y_pred: &[i32]) -> EvaluationSummary {
    let both_classes = y_true.contains(&0) && y_true.contains(&1);
    let scores: Vec<f64> = y_pred.iter().map(|&pred| f64::from(pred)).collect();
    EvaluationSummary {
        accuracy: metrics::accuracy(y_true, y_pred),
        roc_auc: if both_classes {
            metrics::roc_auc(y_true, &scores)
        } else {
            0.0
        },
        confusion: metrics::confusion_matrix(y_true, y_pred),
        report: metrics::classification_report(y_true, y_pred),
    }
}
