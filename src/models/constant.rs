//! Constant model for degenerate single-value series

use crate::error::{ForecastError, Result};
use crate::features::FeatureSet;
use crate::models::{CurveModel, FittedCurve};

/// Model that replays a single observed value for every offset
#[derive(Debug, Clone)]
pub struct ConstantModel {
    /// Name of the model
    name: String,
}

/// Fitted constant model
#[derive(Debug, Clone)]
pub struct FittedConstant {
    /// Name of the model
    name: String,
    /// The replayed value
    value: f64,
}

impl ConstantModel {
    /// Create a new constant model
    pub fn new() -> Self {
        Self {
            name: "constant".to_string(),
        }
    }
}

impl Default for ConstantModel {
    fn default() -> Self {
        Self::new()
    }
}

impl CurveModel for ConstantModel {
    type Fitted = FittedConstant;

    fn fit(&self, features: &FeatureSet) -> Result<FittedConstant> {
        let value = *features.values.first().ok_or_else(|| {
            ForecastError::FitFailure("Cannot fit a constant to an empty series".to_string())
        })?;

        Ok(FittedConstant {
            name: self.name.clone(),
            value,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl FittedConstant {
    /// The replayed value
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl FittedCurve for FittedConstant {
    fn predict(&self, offsets: &[i64]) -> Result<Vec<f64>> {
        Ok(vec![self.value; offsets.len()])
    }

    fn name(&self) -> &str {
        &self.name
    }
}
