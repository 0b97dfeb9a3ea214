//! Regression models for cumulative case series

use crate::error::Result;
use crate::features::FeatureSet;
use std::fmt::Debug;

pub mod constant;
pub mod linear;
pub mod polynomial;

pub use constant::{ConstantModel, FittedConstant};
pub use linear::{FittedLinear, LinearRegression};
pub use polynomial::{FittedPolynomial, PolynomialRegression};

/// Regression model that can be fitted to a feature set
pub trait CurveModel: Debug + Clone {
    /// The type of fitted model produced
    type Fitted: FittedCurve;

    /// Fit the model to the given features
    fn fit(&self, features: &FeatureSet) -> Result<Self::Fitted>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// Fitted regression model that predicts values for day offsets
pub trait FittedCurve: Debug {
    /// Predict values at the given day offsets
    fn predict(&self, offsets: &[i64]) -> Result<Vec<f64>>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Tagged model strategy used for runtime dispatch between the
/// candidate families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Plain least-squares line
    Linear,
    /// Least-squares polynomial of the given degree
    Polynomial(usize),
    /// Single repeated value
    Constant,
}

impl ModelKind {
    /// Fit this model family to the given features
    pub fn fit(&self, features: &FeatureSet) -> Result<FittedModel> {
        match self {
            ModelKind::Linear => LinearRegression::new().fit(features).map(FittedModel::Linear),
            ModelKind::Polynomial(degree) => PolynomialRegression::new(*degree)?
                .fit(features)
                .map(FittedModel::Polynomial),
            ModelKind::Constant => ConstantModel::new().fit(features).map(FittedModel::Constant),
        }
    }
}

/// A fitted model from any of the candidate families
#[derive(Debug, Clone)]
pub enum FittedModel {
    /// Fitted least-squares line
    Linear(FittedLinear),
    /// Fitted polynomial
    Polynomial(FittedPolynomial),
    /// Fitted constant
    Constant(FittedConstant),
}

impl FittedCurve for FittedModel {
    fn predict(&self, offsets: &[i64]) -> Result<Vec<f64>> {
        match self {
            FittedModel::Linear(fitted) => fitted.predict(offsets),
            FittedModel::Polynomial(fitted) => fitted.predict(offsets),
            FittedModel::Constant(fitted) => fitted.predict(offsets),
        }
    }

    fn name(&self) -> &str {
        match self {
            FittedModel::Linear(fitted) => fitted.name(),
            FittedModel::Polynomial(fitted) => fitted.name(),
            FittedModel::Constant(fitted) => fitted.name(),
        }
    }
}
