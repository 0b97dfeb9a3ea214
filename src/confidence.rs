//! Confidence interval computation for point forecasts

use crate::error::{ForecastError, Result};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Compute a symmetric confidence interval around each prediction.
///
/// The margin is the two-sided Student-t critical value at the requested
/// confidence level (degrees of freedom = number of predictions - 1)
/// multiplied by the in-sample mean absolute error, which stands in for a
/// residual standard error. Lower bounds are clipped at zero.
///
/// A single prediction leaves zero degrees of freedom, for which the
/// t-distribution is undefined; degrees of freedom are clamped to 1 in
/// that case so the interval stays defined.
pub fn confidence_interval(
    predictions: &[f64],
    mae: f64,
    confidence: f64,
) -> Result<(Vec<f64>, Vec<f64>)> {
    if confidence <= 0.0 || confidence >= 1.0 {
        return Err(ForecastError::InvalidParameter(
            "Confidence level must be between 0 and 1".to_string(),
        ));
    }
    if predictions.is_empty() {
        return Err(ForecastError::DataError(
            "Cannot compute an interval around zero predictions".to_string(),
        ));
    }

    let freedom = (predictions.len() - 1).max(1) as f64;
    let alpha = 1.0 - confidence;
    let t_value = StudentsT::new(0.0, 1.0, freedom)
        .map_err(|e| ForecastError::MathError(e.to_string()))?
        .inverse_cdf(1.0 - alpha / 2.0);

    let margin = t_value * mae;
    let lower = predictions.iter().map(|p| (p - margin).max(0.0)).collect();
    let upper = predictions.iter().map(|p| p + margin).collect();

    Ok((lower, upper))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_margin() {
        let predictions = vec![100.0, 110.0, 120.0, 130.0, 140.0];
        let (lower, upper) = confidence_interval(&predictions, 2.0, 0.95).unwrap();

        for i in 0..predictions.len() {
            let below = predictions[i] - lower[i];
            let above = upper[i] - predictions[i];
            assert!((below - above).abs() < 1e-9);
            assert!(below > 0.0);
        }
    }

    #[test]
    fn test_zero_mae_collapses_interval() {
        let predictions = vec![50.0, 60.0, 70.0];
        let (lower, upper) = confidence_interval(&predictions, 0.0, 0.95).unwrap();

        assert_eq!(lower, predictions);
        assert_eq!(upper, predictions);
    }

    #[test]
    fn test_lower_bound_clipped() {
        let predictions = vec![1.0, 2.0, 3.0];
        let (lower, _) = confidence_interval(&predictions, 100.0, 0.95).unwrap();

        assert!(lower.iter().all(|l| *l == 0.0));
    }

    #[test]
    fn test_single_prediction_stays_defined() {
        let (lower, upper) = confidence_interval(&[10.0], 1.0, 0.95).unwrap();

        // df clamped to 1: t ≈ 12.706
        assert_eq!(lower[0], 0.0);
        assert!((upper[0] - (10.0 + 12.706)).abs() < 0.01);
    }

    #[test]
    fn test_invalid_confidence_rejected() {
        assert!(confidence_interval(&[1.0, 2.0], 1.0, 0.0).is_err());
        assert!(confidence_interval(&[1.0, 2.0], 1.0, 1.0).is_err());
    }
}
