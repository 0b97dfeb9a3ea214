//! Error types for the forecast_cases crate

use polars::prelude::PolarsError;
use thiserror::Error;

/// Custom error types for the forecast_cases crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Too few observations (or a zero-day horizon) for a forecast
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// A model fit or prediction failed beyond recovery
    #[error("Fit failure: {0}")]
    FitFailure(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error from mathematical operations
    #[error("Math error: {0}")]
    MathError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}
