//! # Forecast Cases
//!
//! A Rust library for forecasting cumulative epidemic case counts, built
//! for the COVID-19 statistics dashboard.
//!
//! ## Features
//!
//! - Case series handling (date-indexed cumulative counts, CSV ingestion)
//! - Regression models (linear, polynomial, constant) with a fit/predict
//!   contract
//! - Automatic model selection over a chronological holdout split
//! - Student-t confidence intervals around point forecasts
//! - Trend-divergence correction for recent acceleration or deceleration
//! - Data quality reporting and trend change-point detection
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use forecast_cases::{forecast, ModelType, SeriesLoader};
//!
//! # fn main() -> forecast_cases::Result<()> {
//! // Load a per-country extract
//! let series = SeriesLoader::from_csv("cases.csv")?;
//!
//! // Forecast a week ahead, letting the selector pick the model
//! let result = forecast(&series, 7, ModelType::Auto)?;
//!
//! println!("model: {}", result.model_name);
//! for (date, prediction) in result.dates.iter().zip(&result.predictions) {
//!     println!("{}: {:.0}", date, prediction);
//! }
//! # Ok(())
//! # }
//! ```

pub mod confidence;
pub mod data;
pub mod error;
pub mod features;
pub mod forecast;
pub mod metrics;
pub mod models;
pub mod selection;
pub mod trend;
pub mod utils;

// Re-export commonly used types
pub use crate::confidence::confidence_interval;
pub use crate::data::{CaseSeries, DataQuality, SeriesLoader};
pub use crate::error::{ForecastError, Result};
pub use crate::features::FeatureSet;
pub use crate::forecast::{forecast, forecast_linear, Forecast, ModelType};
pub use crate::models::{CurveModel, FittedCurve, ModelKind};
pub use crate::selection::select_best_model;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
