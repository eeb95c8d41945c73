//! Renders diagnostic charts to PNG files.
//!
//! Pure presentation: every function takes already-computed values, renders
//! one image, creates missing parent directories and propagates filesystem
//! or rendering failures. Nothing here feeds back into the pipeline.

use crate::plot::error::PlotError;
use crate::types::feature_row::{FeatureRow, FEATURE_COLUMNS};
use chrono::NaiveDate;
use plotters::prelude::*;
use std::path::Path;

const STEEL_BLUE: RGBColor = RGBColor(70, 130, 180);
const EVENT_RED: RGBColor = RGBColor(178, 24, 43);

/// Line chart of one variable over time.
pub fn plot_time_series(
    dates: &[NaiveDate],
    values: &[f64],
    value_label: &str,
    title: &str,
    path: &Path,
) -> Result<(), PlotError> {
    check_series(dates, values.len())?;
    ensure_parent_dir(path)?;

    let (first, last) = (dates[0], dates[dates.len() - 1]);
    let (low, high) = value_bounds(values);

    let root = BitMapBackend::new(path, (1000, 400)).into_drawing_area();
    (|| {
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(50)
            .build_cartesian_2d(first..last, low..high)?;
        chart
            .configure_mesh()
            .x_desc("Date")
            .y_desc(value_label)
            .draw()?;
        chart.draw_series(LineSeries::new(
            dates.iter().copied().zip(values.iter().copied()),
            &STEEL_BLUE,
        ))?;
        root.present()
    })()
    .map_err(|e| render_error(path, e))
}

/// Pearson correlation heatmap over the ten model feature columns, diverging
/// blue/white/red fill with per-cell annotations.
pub fn plot_correlation_heatmap(rows: &[FeatureRow], path: &Path) -> Result<(), PlotError> {
    if rows.is_empty() {
        return Err(PlotError::EmptyInput);
    }
    ensure_parent_dir(path)?;

    let n = FEATURE_COLUMNS.len();
    let columns: Vec<Vec<f64>> = (0..n)
        .map(|k| rows.iter().map(|row| row.feature_vector()[k]).collect())
        .collect();
    let correlation: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| {
                    if i == j {
                        1.0
                    } else {
                        pearson(&columns[i], &columns[j])
                    }
                })
                .collect()
        })
        .collect();
    let correlation = &correlation;

    let root = BitMapBackend::new(path, (860, 760)).into_drawing_area();
    (|| {
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption("Correlation Matrix", ("sans-serif", 22))
            .margin(10)
            .x_label_area_size(130)
            .y_label_area_size(130)
            .build_cartesian_2d(0f64..n as f64, 0f64..n as f64)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(n)
            .y_labels(n)
            .x_label_formatter(&|x| column_label(*x))
            .y_label_formatter(&|y| column_label(*y))
            .draw()?;

        chart.draw_series((0..n).flat_map(|i| {
            (0..n).map(move |j| {
                // row i drawn top-down so the matrix reads like a table
                let y = (n - 1 - i) as f64;
                Rectangle::new(
                    [(j as f64, y), (j as f64 + 1.0, y + 1.0)],
                    diverging_color(correlation[i][j]).filled(),
                )
            })
        }))?;
        chart.draw_series((0..n).flat_map(|i| {
            (0..n).map(move |j| {
                let y = (n - 1 - i) as f64;
                Text::new(
                    format!("{:.2}", correlation[i][j]),
                    (j as f64 + 0.28, y + 0.45),
                    ("sans-serif", 13),
                )
            })
        }))?;
        root.present()
    })()
    .map_err(|e| render_error(path, e))
}

/// 0/1 event markers over time: predicted flood days in red on the upper
/// band, quiet days in grey on the lower band.
pub fn plot_predicted_events(
    dates: &[NaiveDate],
    predictions: &[i32],
    title: &str,
    path: &Path,
) -> Result<(), PlotError> {
    check_series(dates, predictions.len())?;
    ensure_parent_dir(path)?;

    let (first, last) = (dates[0], dates[dates.len() - 1]);

    let root = BitMapBackend::new(path, (1000, 220)).into_drawing_area();
    (|| {
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(70)
            .build_cartesian_2d(first..last, -0.5f64..1.5f64)?;
        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(2)
            .y_label_formatter(&|y| {
                if *y >= 0.5 {
                    "Flood".to_string()
                } else {
                    "No Flood".to_string()
                }
            })
            .x_desc("Date")
            .draw()?;
        chart.draw_series(dates.iter().zip(predictions).map(|(&date, &pred)| {
            let color = if pred == 1 { EVENT_RED } else { RGBColor(150, 150, 150) };
            Circle::new((date, f64::from(pred)), 4, color.filled())
        }))?;
        root.present()
    })()
    .map_err(|e| render_error(path, e))
}

fn check_series(dates: &[NaiveDate], values: usize) -> Result<(), PlotError> {
    if dates.len() != values {
        return Err(PlotError::LengthMismatch {
            dates: dates.len(),
            values,
        });
    }
    if dates.is_empty() {
        return Err(PlotError::EmptyInput);
    }
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<(), PlotError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|source| PlotError::DirCreation(parent.to_path_buf(), source))?;
        }
    }
    Ok(())
}

fn render_error<E: std::fmt::Display>(path: &Path, error: E) -> PlotError {
    PlotError::Render {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

fn value_bounds(values: &[f64]) -> (f64, f64) {
    let low = values.iter().copied().fold(f64::INFINITY, f64::min);
    let high = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if low == high {
        // a flat series still needs a non-degenerate axis
        (low - 1.0, high + 1.0)
    } else {
        (low, high)
    }
}

fn column_label(position: f64) -> String {
    let index = position.floor() as usize;
    FEATURE_COLUMNS
        .get(index)
        .map(|name| name.to_string())
        .unwrap_or_default()
}

/// Pearson correlation coefficient; 0.0 when either series is constant.
fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;
    let mut covariance = 0.0;
    let mut variance_a = 0.0;
    let mut variance_b = 0.0;
    for (&x, &y) in a.iter().zip(b) {
        covariance += (x - mean_a) * (y - mean_b);
        variance_a += (x - mean_a).powi(2);
        variance_b += (y - mean_b).powi(2);
    }
    if variance_a == 0.0 || variance_b == 0.0 {
        return 0.0;
    }
    covariance / (variance_a.sqrt() * variance_b.sqrt())
}

/// Maps [-1, 1] onto blue → white → red.
fn diverging_color(value: f64) -> RGBColor {
    let t = value.clamp(-1.0, 1.0);
    let fade = (255.0 * (1.0 - t.abs())) as u8;
    if t >= 0.0 {
        RGBColor(255, fade, fade)
    } else {
        RGBColor(fade, fade, 255)
    }
}
