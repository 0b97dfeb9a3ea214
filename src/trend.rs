//! Trend slopes, divergence correction, and change-point detection

use crate::error::{ForecastError, Result};
use crate::features::FeatureSet;
use crate::models::{CurveModel, LinearRegression};

/// A recent trend counts as diverged when it differs from the overall
/// trend by more than this fraction of the overall slope.
const DIVERGENCE_RATIO: f64 = 0.5;

/// Least-squares slope of a value slice over its positional indices
pub fn index_slope(values: &[f64]) -> Result<f64> {
    let offsets: Vec<i64> = (0..values.len() as i64).collect();
    let features = FeatureSet::new(offsets, values.to_vec())?;
    let fitted = LinearRegression::new().fit(&features)?;
    Ok(fitted.slope())
}

/// Compare the slope of the last `window` values against the slope of the
/// whole slice. Returns the per-step adjustment (recent - overall) when
/// the recent trend has materially diverged, `None` when the series is
/// well behaved.
pub fn trend_divergence(values: &[f64], window: usize) -> Result<Option<f64>> {
    if values.len() < window {
        return Err(ForecastError::DataError(format!(
            "Need at least {} observations for a recent-trend window, got {}",
            window,
            values.len()
        )));
    }

    let recent = index_slope(&values[values.len() - window..])?;
    let overall = index_slope(values)?;

    if (recent - overall).abs() > overall.abs() * DIVERGENCE_RATIO {
        Ok(Some(recent - overall))
    } else {
        Ok(None)
    }
}

/// Detect indices where the rolling-mean first difference jumps beyond
/// twice its standard deviation. Series shorter than 2 × window yield no
/// change points.
pub fn detect_trend_changes(values: &[f64], window: usize) -> Vec<usize> {
    if window == 0 || values.len() < window * 2 {
        return Vec::new();
    }

    // Rolling mean is undefined for the first window-1 positions, its
    // first difference for one more.
    let mut rolling_diff: Vec<Option<f64>> = vec![None; values.len()];
    let mut previous_mean = None;
    for i in window - 1..values.len() {
        let mean = values[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
        if let Some(prev) = previous_mean {
            rolling_diff[i] = Some(mean - prev);
        }
        previous_mean = Some(mean);
    }

    let defined: Vec<f64> = rolling_diff.iter().flatten().copied().collect();
    if defined.len() < 2 {
        return Vec::new();
    }

    // Sample standard deviation of the defined differences
    let mean = defined.iter().sum::<f64>() / defined.len() as f64;
    let variance = defined
        .iter()
        .map(|d| (d - mean).powi(2))
        .sum::<f64>()
        / (defined.len() - 1) as f64;
    let threshold = variance.sqrt() * 2.0;

    let mut change_points = Vec::new();
    for i in window..values.len().saturating_sub(window) {
        if let Some(diff) = rolling_diff[i] {
            if diff.abs() > threshold {
                change_points.push(i);
            }
        }
    }

    change_points
}
