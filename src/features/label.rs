//! Attaches the supervised flood-imminent target to a feature table.

use crate::types::feature_row::{FeatureRow, LabeledRow};

/// Precipitation threshold in mm above which the following day counts as a
/// potential flood event.
pub const DEFAULT_FLOOD_THRESHOLD_MM: f64 = 10.0;

/// Labels every row by looking exactly one row ahead in sort order.
///
/// Row `i` gets `flood_imminent = 1` iff row `i + 1`'s precipitation is at
/// least `threshold_mm` (meeting the threshold counts). The last row has no
/// successor and assumes a dry follow-up day, so it labels 0 for any positive
/// threshold. The feature fields pass through unmodified; the lookahead flows
/// only into the label, never back into a feature.
pub fn attach_label(rows: &[FeatureRow], threshold_mm: f64) -> Vec<LabeledRow> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let next_precip = rows.get(i + 1).map_or(0.0, |next| next.precipitation);
            LabeledRow {
                features: row.clone(),
                flood_imminent: i32::from(next_precip >= threshold_mm),
            }
        })
        .collect()
}
