//! Typed per-day records produced by the feature engineering stage.

use chrono::NaiveDate;

/// Names of the model feature columns, in the order
/// [`FeatureRow::feature_vector`] emits them.
///
/// `day_of_year` and `month` are carried on the row for display and grouping
/// but are not part of the matrix; their cyclical encodings are.
pub const FEATURE_COLUMNS: [&str; 10] = [
    "precipitation",
    "mean_temperature",
    "precip_prev_day",
    "mean_temp_prev_day",
    "precip_sum_3d",
    "precip_sum_7d",
    "day_of_year_sin",
    "day_of_year_cos",
    "month_sin",
    "month_cos",
];

/// One day's engineered record.
///
/// Rows are produced sorted ascending by date, one per raw observation row.
/// All lag and window fields are positional: they refer to neighboring rows
/// in sort order, not to neighboring calendar days.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub date: NaiveDate,
    /// Daily precipitation total in mm, missing readings already zeroed.
    pub precipitation: f64,
    /// Mean daily temperature in °C, missing readings already filled.
    pub mean_temperature: f64,
    /// Previous row's precipitation; 0.0 for the first row.
    pub precip_prev_day: f64,
    /// Previous row's temperature; the first row carries its own value.
    pub mean_temp_prev_day: f64,
    /// Trailing inclusive 3-row precipitation sum, truncated at the start.
    pub precip_sum_3d: f64,
    /// Trailing inclusive 7-row precipitation sum, truncated at the start.
    pub precip_sum_7d: f64,
    /// Ordinal day of year (1-366).
    pub day_of_year: u32,
    /// Calendar month (1-12).
    pub month: u32,
    pub day_of_year_sin: f64,
    pub day_of_year_cos: f64,
    pub month_sin: f64,
    pub month_cos: f64,
}

impl FeatureRow {
    /// The row's numeric predictors in [`FEATURE_COLUMNS`] order.
    pub fn feature_vector(&self) -> [f64; 10] {
        [
            self.precipitation,
            self.mean_temperature,
            self.precip_prev_day,
            self.mean_temp_prev_day,
            self.precip_sum_3d,
            self.precip_sum_7d,
            self.day_of_year_sin,
            self.day_of_year_cos,
            self.month_sin,
            self.month_cos,
        ]
    }
}

/// A [`FeatureRow`] with its supervised target attached.
///
/// `flood_imminent` is 1 when the *next* row's precipitation meets the
/// labeling threshold, 0 otherwise. The label is the only field the labeling
/// stage adds; the feature fields pass through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledRow {
    pub features: FeatureRow,
    pub flood_imminent: i32,
}
