//! Evaluation metrics for the binary flood classifier.
//!
//! All functions operate on plain slices; truth and prediction slices must
//! have equal length. Classes are the label values 0 and 1.

use std::cmp::Ordering;

/// Fraction of predictions matching the truth. Empty input scores 0.0.
pub fn accuracy(y_true: &[i32], y_pred: &[i32]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_true
        .iter()
        .zip(y_pred)
        .filter(|(truth, pred)| truth == pred)
        .count();
    correct as f64 / y_true.len() as f64
}

/// `TP / (TP + FP)` for the given class; 0.0 when nothing was predicted as it.
pub fn precision(y_true: &[i32], y_pred: &[i32], class: i32) -> f64 {
    let predicted = y_pred.iter().filter(|&&pred| pred == class).count();
    if predicted == 0 {
        return 0.0;
    }
    let hits = y_true
        .iter()
        .zip(y_pred)
        .filter(|(&truth, &pred)| truth == class && pred == class)
        .count();
    hits as f64 / predicted as f64
}

/// `TP / (TP + FN)` for the given class; 0.0 when the class never occurs.
pub fn recall(y_true: &[i32], y_pred: &[i32], class: i32) -> f64 {
    let actual = y_true.iter().filter(|&&truth| truth == class).count();
    if actual == 0 {
        return 0.0;
    }
    let hits = y_true
        .iter()
        .zip(y_pred)
        .filter(|(&truth, &pred)| truth == class && pred == class)
        .count();
    hits as f64 / actual as f64
}

/// Harmonic mean of precision and recall for the given class.
pub fn f1_score(y_true: &[i32], y_pred: &[i32], class: i32) -> f64 {
    let precision = precision(y_true, y_pred, class);
    let recall = recall(y_true, y_pred, class);
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

/// 2×2 confusion matrix: rows index the truth, columns the prediction, class
/// order 0 then 1.
pub fn confusion_matrix(y_true: &[i32], y_pred: &[i32]) -> [[usize; 2]; 2] {
    let mut matrix = [[0usize; 2]; 2];
    for (&truth, &pred) in y_true.iter().zip(y_pred) {
        let row = usize::from(truth == 1);
        let column = usize::from(pred == 1);
        matrix[row][column] += 1;
    }
    matrix
}

/// Area under the ROC curve via the rank-sum formulation, with tied scores
/// sharing their average rank.
///
/// AUC is undefined unless both classes appear in the truth; that case
/// returns the 0.0 sentinel the evaluation contract specifies.
pub fn roc_auc(y_true: &[i32], scores: &[f64]) -> f64 {
    let positives = y_true.iter().filter(|&&truth| truth == 1).count();
    let negatives = y_true.len() - positives;
    if positives == 0 || negatives == 0 {
        return 0.0;
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].partial_cmp(&scores[b]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0.0; scores.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        // 1-based rank averaged over the tie group [i, j]
        let rank = (i + j) as f64 / 2.0 + 1.0;
        for &index in &order[i..=j] {
            ranks[index] = rank;
        }
        i = j + 1;
    }

    let positive_rank_sum: f64 = y_true
        .iter()
        .zip(&ranks)
        .filter(|(&truth, _)| truth == 1)
        .map(|(_, &rank)| rank)
        .sum();
    let positives = positives as f64;
    let negatives = negatives as f64;
    (positive_rank_sum - positives * (positives + 1.0) / 2.0) / (positives * negatives)
}

/// Per-class precision/recall/F1/support plus overall accuracy, formatted as
/// a fixed-width text block. Every class present in the truth or the
/// predictions gets a line.
pub fn classification_report(y_true: &[i32], y_pred: &[i32]) -> String {
    let mut classes: Vec<i32> = y_true.iter().chain(y_pred).copied().collect();
    classes.sort_unstable();
    classes.dedup();

    let mut report = String::from("              precision    recall  f1-score   support\n\n");
    for &class in &classes {
        let support = y_true.iter().filter(|&&truth| truth == class).count();
        report.push_str(&format!(
            "{:>12}{:>11.2}{:>10.2}{:>10.2}{:>10}\n",
            class,
            precision(y_true, y_pred, class),
            recall(y_true, y_pred, class),
            f1_score(y_true, y_pred, class),
            support,
        ));
    }
    report.push_str(&format!(
        "\n{:>12}{:>31.2}{:>10}\n",
        "accuracy",
        accuracy(y_true, y_pred),
        y_true.len(),
    ));
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_counts_matches() {
        let y_true = [0, 1, 1, 0, 1];
        let y_pred = [0, 1, 0, 0, 1];
        assert!((accuracy(&y_true, &y_pred) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn precision_and_recall_against_hand_counts() {
        // TP=2, FP=1, FN=1, TN=1 for class 1
        let y_true = [1, 1, 1, 0, 0];
        let y_pred = [1, 1, 0, 1, 0];
        assert!((precision(&y_true, &y_pred, 1) - 2.0 / 3.0).abs() < 1e-12);
        assert!((recall(&y_true, &y_pred, 1) - 2.0 / 3.0).abs() < 1e-12);
        assert!((f1_score(&y_true, &y_pred, 1) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn confusion_matrix_layout_is_truth_by_prediction() {
        let y_true = [0, 0, 1, 1, 1];
        let y_pred = [0, 1, 1, 0, 1];
        let matrix = confusion_matrix(&y_true, &y_pred);
        assert_eq!(matrix, [[1, 1], [1, 2]]);
    }

    #[test]
    fn roc_auc_matches_known_value() {
        let y_true = [0, 0, 1, 1];
        let scores = [0.1, 0.4, 0.35, 0.8];
        assert!((roc_auc(&y_true, &scores) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn roc_auc_averages_tied_scores() {
        let y_true = [0, 1];
        let scores = [0.5, 0.5];
        assert!((roc_auc(&y_true, &scores) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn roc_auc_is_zero_for_single_class_truth() {
        assert_eq!(roc_auc(&[0, 0, 0], &[0.2, 0.4, 0.9]), 0.0);
        assert_eq!(roc_auc(&[1, 1], &[0.2, 0.4]), 0.0);
    }

    #[test]
    fn report_lists_every_observed_class() {
        let y_true = [0, 0, 0];
        let y_pred = [0, 1, 0];
        let report = classification_report(&y_true, &y_pred);
        assert!(report.contains("\n           0"));
        assert!(report.contains("\n           1"));
        assert!(report.contains("accuracy"));
    }

    #[test]
    fn report_support_matches_confusion_totals() {
        let y_true = [0, 1, 1, 0, 1, 1];
        let y_pred = [0, 1, 0, 0, 1, 1];
        let matrix = confusion_matrix(&y_true, &y_pred);
        let report = classification_report(&y_true, &y_pred);
        let zero_support: usize = matrix[0].iter().sum();
        let one_support: usize = matrix[1].iter().sum();
        assert!(report.contains(&format!("{:>10}\n", zero_support)));
        assert!(report.contains(&format!("{:>10}\n", one_support)));
    }
}
