//! Accuracy metrics for evaluating fitted models

use crate::error::{ForecastError, Result};

/// Calculate the mean absolute error between actual and predicted values
pub fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_lengths(actual, predicted)?;

    let n = actual.len() as f64;
    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum();

    Ok(sum / n)
}

/// Calculate the mean squared error between actual and predicted values
pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_lengths(actual, predicted)?;

    let n = actual.len() as f64;
    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    Ok(sum / n)
}

/// Calculate the root mean squared error between actual and predicted values
pub fn root_mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    Ok(mean_squared_error(actual, predicted)?.sqrt())
}

/// Calculate the coefficient of determination (R²).
///
/// 1.0 is a perfect fit; the score can be negative when the fit is worse
/// than predicting the mean. A constant actual slice has zero total
/// variance; the score is then 1.0 for a (near-)exact fit and 0.0
/// otherwise.
pub fn r2_score(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_lengths(actual, predicted)?;

    let n = actual.len() as f64;
    let mean = actual.iter().sum::<f64>() / n;

    let ss_res: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();

    if ss_tot == 0.0 {
        if ss_res < f64::EPSILON {
            return Ok(1.0);
        }
        return Ok(0.0);
    }

    Ok(1.0 - ss_res / ss_tot)
}

fn check_lengths(actual: &[f64], predicted: &[f64]) -> Result<()> {
    if actual.len() != predicted.len() || actual.is_empty() {
        return Err(ForecastError::DataError(
            "Actual and predicted values must have the same non-zero length".to_string(),
        ));
    }
    Ok(())
}
