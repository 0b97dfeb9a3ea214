//! Least-squares line fitting

use crate::error::{ForecastError, Result};
use crate::features::FeatureSet;
use crate::models::{CurveModel, FittedCurve};

/// Plain linear regression over (day offset, value) pairs
#[derive(Debug, Clone)]
pub struct LinearRegression {
    /// Name of the model
    name: String,
}

/// Fitted linear regression
#[derive(Debug, Clone)]
pub struct FittedLinear {
    /// Name of the model
    name: String,
    /// Fitted intercept
    intercept: f64,
    /// Fitted slope
    slope: f64,
}

impl LinearRegression {
    /// Create a new linear regression model
    pub fn new() -> Self {
        Self {
            name: "linear".to_string(),
        }
    }
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl CurveModel for LinearRegression {
    type Fitted = FittedLinear;

    fn fit(&self, features: &FeatureSet) -> Result<FittedLinear> {
        let n = features.len();
        if n < 2 {
            return Err(ForecastError::FitFailure(format!(
                "Insufficient data for linear regression. Need at least 2 observations, got {}.",
                n
            )));
        }

        let xs: Vec<f64> = features.offsets.iter().map(|o| *o as f64).collect();
        let ys = &features.values;

        let n = n as f64;
        let sum_x: f64 = xs.iter().sum();
        let sum_y: f64 = ys.iter().sum();
        let sum_xx: f64 = xs.iter().map(|x| x * x).sum();
        let sum_xy: f64 = xs.iter().zip(ys.iter()).map(|(x, y)| x * y).sum();

        let denom = n * sum_xx - sum_x * sum_x;
        if denom == 0.0 {
            return Err(ForecastError::FitFailure(
                "All day offsets are identical; the slope is undetermined".to_string(),
            ));
        }

        let slope = (n * sum_xy - sum_x * sum_y) / denom;
        let intercept = (sum_y - slope * sum_x) / n;

        Ok(FittedLinear {
            name: self.name.clone(),
            intercept,
            slope,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedLinear {
    /// Fitted slope of the line
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Fitted intercept of the line
    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl FittedCurve for FittedLinear {
    fn predict(&self, offsets: &[i64]) -> Result<Vec<f64>> {
        Ok(offsets
            .iter()
            .map(|o| self.intercept + self.slope * *o as f64)
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
