//! Utility functions for the forecast_cases crate

use crate::error::{ForecastError, Result};
use crate::features::FeatureSet;
use chrono::{Duration, NaiveDate};

/// Split a feature set into a leading training segment and a trailing
/// holdout segment, preserving temporal order.
///
/// The holdout holds ceil(len × test_fraction) observations. Shuffling
/// would leak future observations into training, so rows keep their
/// chronological positions.
pub fn train_test_split(features: &FeatureSet, test_fraction: f64) -> Result<(FeatureSet, FeatureSet)> {
    if test_fraction <= 0.0 || test_fraction >= 1.0 {
        return Err(ForecastError::InvalidParameter(
            "Test fraction must be between 0 and 1".to_string(),
        ));
    }

    let n = features.len();
    let test_size = ((n as f64) * test_fraction).ceil() as usize;
    if test_size == 0 || test_size >= n {
        return Err(ForecastError::DataError(format!(
            "Cannot split {} observations with test fraction {}",
            n, test_fraction
        )));
    }

    let train_size = n - test_size;
    Ok((features.head(train_size), features.tail(train_size)))
}

/// Create future dates for forecasting, one per day after the last
/// observed date.
pub fn future_dates(last_date: NaiveDate, horizon: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(horizon);
    let mut current = last_date;

    for _ in 0..horizon {
        current = current + Duration::days(1);
        dates.push(current);
    }

    dates
}

/// Date parsing helpers for the formats the dashboard extracts use
pub mod date_parser {
    use super::*;

    const FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];

    /// Parse a date string, trying each supported format in turn
    pub fn parse_date(value: &str) -> Result<NaiveDate> {
        for format in FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(value.trim(), format) {
                return Ok(date);
            }
        }

        Err(ForecastError::DataError(format!(
            "Unrecognized date format: '{}'",
            value
        )))
    }
}
