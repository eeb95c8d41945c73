//! Derives the model feature set from a raw daily-observation table.
//!
//! This is the stage the rest of the pipeline depends on for correctness:
//! every derived value must be computable from the row itself and its
//! predecessors, never from later rows, so that no future information leaks
//! into a predictor.

use crate::features::error::FeatureError;
use crate::types::feature_row::FeatureRow;
use crate::types::raw_schema::{RAW_DATE_COLUMN, RAW_MEAN_TEMP_COLUMN, RAW_PRECIP_COLUMN};
use chrono::{Datelike, NaiveDate};
use polars::prelude::{Column, DataFrame, DataType};
use std::f64::consts::PI;

/// Format the provider uses for the `Date/Time` column of daily data.
const RAW_DATE_FORMAT: &str = "%Y-%m-%d";

/// Transforms a raw observation table into per-day [`FeatureRow`] records.
///
/// The input must carry the provider's `Date/Time`, `Total Precip (mm)` and
/// `Mean Temp (°C)` columns; anything else is ignored. Rows come back sorted
/// ascending by date, exactly one per input row, with:
///
/// * missing precipitation read as 0.0 (no reading means no rain),
/// * missing temperature forward-filled from the most recent reading and
///   back-filled across a leading run of missing values,
/// * previous-row lags (the first row lags to 0.0 precipitation and to its
///   own temperature),
/// * trailing inclusive 3-row and 7-row precipitation sums, truncated at the
///   start of the series,
/// * sine/cosine encodings of day-of-year and month, so the end of each
///   cycle sits numerically next to its start.
///
/// Lag and window arithmetic is positional: gaps in the calendar do not
/// widen a window, and duplicate dates are kept where the stable sort left
/// them.
///
/// # Errors
///
/// [`FeatureError::MissingColumn`] when a required column is absent,
/// [`FeatureError::ColumnRead`] when a column cannot be coerced to its
/// expected type, and [`FeatureError::MissingDate`] /
/// [`FeatureError::DateParse`] for null or malformed date cells.
pub fn derive_features(df: &DataFrame) -> Result<Vec<FeatureRow>, FeatureError> {
    let date_col = raw_column(df, RAW_DATE_COLUMN, &DataType::String)?;
    let precip_col = raw_column(df, RAW_PRECIP_COLUMN, &DataType::Float64)?;
    let temp_col = raw_column(df, RAW_MEAN_TEMP_COLUMN, &DataType::Float64)?;

    let dates = date_col.str().map_err(|source| FeatureError::ColumnRead {
        column: RAW_DATE_COLUMN,
        source,
    })?;
    let precip = precip_col
        .f64()
        .map_err(|source| FeatureError::ColumnRead {
            column: RAW_PRECIP_COLUMN,
            source,
        })?;
    let temp = temp_col.f64().map_err(|source| FeatureError::ColumnRead {
        column: RAW_MEAN_TEMP_COLUMN,
        source,
    })?;

    let mut observations: Vec<(NaiveDate, Option<f64>, Option<f64>)> =
        Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let value = dates.get(row).ok_or(FeatureError::MissingDate { row })?;
        let date = NaiveDate::parse_from_str(value, RAW_DATE_FORMAT).map_err(|source| {
            FeatureError::DateParse {
                value: value.to_string(),
                source,
            }
        })?;
        observations.push((date, precip.get(row), temp.get(row)));
    }

    // Stable, so duplicate dates keep their arrival order.
    observations.sort_by_key(|(date, _, _)| *date);

    let precipitation: Vec<f64> = observations
        .iter()
        .map(|(_, precip, _)| precip.unwrap_or(0.0))
        .collect();
    let temperature = fill_temperature(observations.iter().map(|(_, _, temp)| *temp).collect());

    let mut rows = Vec::with_capacity(observations.len());
    for (i, (date, _, _)) in observations.iter().enumerate() {
        let day_of_year = date.ordinal();
        let month = date.month();
        let day_angle = 2.0 * PI * f64::from(day_of_year) / 365.25;
        let month_angle = 2.0 * PI * f64::from(month) / 12.0;

        rows.push(FeatureRow {
            date: *date,
            precipitation: precipitation[i],
            mean_temperature: temperature[i],
            precip_prev_day: if i == 0 { 0.0 } else { precipitation[i - 1] },
            mean_temp_prev_day: if i == 0 {
                temperature[0]
            } else {
                temperature[i - 1]
            },
            precip_sum_3d: trailing_sum(&precipitation, i, 3),
            precip_sum_7d: trailing_sum(&precipitation, i, 7),
            day_of_year,
            month,
            day_of_year_sin: day_angle.sin(),
            day_of_year_cos: day_angle.cos(),
            month_sin: month_angle.sin(),
            month_cos: month_angle.cos(),
        });
    }
    Ok(rows)
}

/// Looks a required raw column up by its verbatim provider name and coerces
/// it to the type the derivation needs. CSV inference may have typed an
/// all-integer precipitation column as integers; the cast normalizes that.
fn raw_column(
    df: &DataFrame,
    column: &'static str,
    dtype: &DataType,
) -> Result<Column, FeatureError> {
    let raw = df
        .column(column)
        .map_err(|_| FeatureError::MissingColumn { column })?;
    raw.cast(dtype)
        .map_err(|source| FeatureError::ColumnRead { column, source })
}

/// Two-pass fill for missing temperature readings: a forward scan carrying
/// the last seen value, then a backward scan for any leading run that the
/// forward scan could not reach. An all-missing series fills with 0.0.
fn fill_temperature(mut values: Vec<Option<f64>>) -> Vec<f64> {
    let mut last_seen = None;
    for value in values.iter_mut() {
        match *value {
            Some(temp) => last_seen = Some(temp),
            None => *value = last_seen,
        }
    }
    let mut next_seen = None;
    for value in values.iter_mut().rev() {
        match *value {
            Some(temp) => next_seen = Some(temp),
            None => *value = next_seen,
        }
    }
    values.into_iter().map(|temp| temp.unwrap_or(0.0)).collect()
}

/// Sum of `values[max(0, end + 1 - window) ..= end]`: a trailing inclusive
/// window that shrinks at the start of the series instead of padding.
fn trailing_sum(values: &[f64], end: usize, window: usize) -> f64 {
    let start = (end + 1).saturating_sub(window);
    values[start..=end].iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn raw_frame(
        dates: Vec<&str>,
        precip: Vec<Option<f64>>,
        temp: Vec<Option<f64>>,
    ) -> DataFrame {
        df!(
            RAW_DATE_COLUMN => dates,
            RAW_PRECIP_COLUMN => precip,
            RAW_MEAN_TEMP_COLUMN => temp,
        )
        .unwrap()
    }

    fn ten_day_frame() -> DataFrame {
        raw_frame(
            vec![
                "2020-01-01",
                "2020-01-02",
                "2020-01-03",
                "2020-01-04",
                "2020-01-05",
                "2020-01-06",
                "2020-01-07",
                "2020-01-08",
                "2020-01-09",
                "2020-01-10",
            ],
            (0..10).map(|i| Some(i as f64)).collect(),
            (0..10).map(|i| Some(-5.0 + i as f64)).collect(),
        )
    }

    #[test]
    fn row_count_is_preserved() {
        let rows = derive_features(&ten_day_frame()).unwrap();
        assert_eq!(rows.len(), 10);
    }

    #[test]
    fn rows_come_back_sorted_by_date() {
        let df = raw_frame(
            vec!["2020-01-03", "2020-01-01", "2020-01-02"],
            vec![Some(3.0), Some(1.0), Some(2.0)],
            vec![Some(0.0), Some(0.0), Some(0.0)],
        );
        let rows = derive_features(&df).unwrap();
        let dates: Vec<_> = rows.iter().map(|row| row.date.to_string()).collect();
        assert_eq!(dates, ["2020-01-01", "2020-01-02", "2020-01-03"]);
        assert_eq!(rows[0].precipitation, 1.0);
        assert_eq!(rows[2].precipitation, 3.0);
    }

    #[test]
    fn lags_shift_by_one_row() {
        let rows = derive_features(&ten_day_frame()).unwrap();
        for i in 1..rows.len() {
            assert_eq!(rows[i].precip_prev_day, rows[i - 1].precipitation);
            assert_eq!(rows[i].mean_temp_prev_day, rows[i - 1].mean_temperature);
        }
    }

    #[test]
    fn first_row_lag_defaults() {
        let rows = derive_features(&ten_day_frame()).unwrap();
        assert_eq!(rows[0].precip_prev_day, 0.0);
        assert_eq!(rows[0].mean_temp_prev_day, rows[0].mean_temperature);
    }

    #[test]
    fn trailing_sums_truncate_at_series_start() {
        let rows = derive_features(&ten_day_frame()).unwrap();
        // precipitation is 0,1,2,... so the sums are easy to state exactly
        assert_eq!(rows[0].precip_sum_3d, 0.0);
        assert_eq!(rows[1].precip_sum_3d, 1.0);
        assert_eq!(rows[2].precip_sum_3d, 3.0);
        assert_eq!(rows[5].precip_sum_3d, 3.0 + 4.0 + 5.0);
        assert_eq!(rows[3].precip_sum_7d, 0.0 + 1.0 + 2.0 + 3.0);
        assert_eq!(rows[9].precip_sum_7d, (3..=9).map(f64::from).sum::<f64>());
    }

    #[test]
    fn missing_precipitation_reads_as_zero() {
        let df = raw_frame(
            vec!["2020-01-01", "2020-01-02", "2020-01-03"],
            vec![Some(4.0), None, Some(2.0)],
            vec![Some(1.0), Some(1.0), Some(1.0)],
        );
        let rows = derive_features(&df).unwrap();
        assert_eq!(rows[1].precipitation, 0.0);
        assert_eq!(rows[2].precip_prev_day, 0.0);
        assert_eq!(rows[2].precip_sum_3d, 6.0);
    }

    #[test]
    fn temperature_fills_forward_then_backward() {
        let df = raw_frame(
            vec![
                "2020-01-01",
                "2020-01-02",
                "2020-01-03",
                "2020-01-04",
                "2020-01-05",
            ],
            vec![Some(0.0); 5],
            vec![None, None, Some(3.0), None, Some(7.0)],
        );
        let rows = derive_features(&df).unwrap();
        let temps: Vec<f64> = rows.iter().map(|row| row.mean_temperature).collect();
        // leading run back-fills from the first reading, interior gap
        // forward-fills from the one before it
        assert_eq!(temps, [3.0, 3.0, 3.0, 3.0, 7.0]);
    }

    #[test]
    fn cyclical_encodings_lie_on_the_unit_circle() {
        let rows = derive_features(&ten_day_frame()).unwrap();
        for row in &rows {
            let day = row.day_of_year_sin.powi(2) + row.day_of_year_cos.powi(2);
            let month = row.month_sin.powi(2) + row.month_cos.powi(2);
            assert!((day - 1.0).abs() < 1e-12);
            assert!((month - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn year_end_and_year_start_encode_close_together() {
        let df = raw_frame(
            vec!["2020-12-31", "2021-01-01"],
            vec![Some(0.0), Some(0.0)],
            vec![Some(0.0), Some(0.0)],
        );
        let rows = derive_features(&df).unwrap();
        let gap = (rows[0].day_of_year_sin - rows[1].day_of_year_sin).abs();
        assert!(gap < 0.1, "day 366 and day 1 should be numerically close");
    }

    #[test]
    fn integer_typed_columns_are_coerced() {
        let df = df!(
            RAW_DATE_COLUMN => ["2020-01-01", "2020-01-02"],
            RAW_PRECIP_COLUMN => [3i64, 15i64],
            RAW_MEAN_TEMP_COLUMN => [1i64, 2i64],
        )
        .unwrap();
        let rows = derive_features(&df).unwrap();
        assert_eq!(rows[1].precipitation, 15.0);
        assert_eq!(rows[1].mean_temperature, 2.0);
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let df = df!(
            RAW_DATE_COLUMN => ["2020-01-01"],
            RAW_MEAN_TEMP_COLUMN => [Some(1.0)],
        )
        .unwrap();
        let err = derive_features(&df).unwrap_err();
        assert!(matches!(
            err,
            FeatureError::MissingColumn {
                column: RAW_PRECIP_COLUMN
            }
        ));
    }

    #[test]
    fn malformed_date_is_an_error() {
        let df = raw_frame(
            vec!["2020-01-01", "not-a-date"],
            vec![Some(0.0), Some(0.0)],
            vec![Some(0.0), Some(0.0)],
        );
        assert!(matches!(
            derive_features(&df),
            Err(FeatureError::DateParse { .. })
        ));
    }

    #[test]
    fn all_missing_temperature_fills_with_zero() {
        let df = raw_frame(
            vec!["2020-01-01", "2020-01-02"],
            vec![Some(1.0), Some(2.0)],
            vec![None, None],
        );
        let rows = derive_features(&df).unwrap();
        assert!(rows.iter().all(|row| row.mean_temperature == 0.0));
    }
}
