//! Forecast engine: model dispatch, horizon projection, trend correction

use crate::confidence::confidence_interval;
use crate::data::CaseSeries;
use crate::error::{ForecastError, Result};
use crate::features::FeatureSet;
use crate::metrics::{mean_absolute_error, r2_score};
use crate::models::{FittedCurve, ModelKind};
use crate::selection::select_best_model;
use crate::trend::trend_divergence;
use crate::utils::future_dates;
use chrono::NaiveDate;
use serde::Serialize;

/// Minimum number of observations for any forecast
const MIN_SERIES_LEN: usize = 10;
/// Minimum number of observations for the trend correction
const TREND_MIN_LEN: usize = 14;
/// Recent-trend window length
const TREND_WINDOW: usize = 7;
/// Confidence level of the reported interval
const DEFAULT_CONFIDENCE: f64 = 0.95;
/// Holdout fraction used by auto model selection
const HOLDOUT_FRACTION: f64 = 0.2;

/// Requested model family for a forecast call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelType {
    /// Search the candidate set by holdout score
    Auto,
    /// Plain linear regression
    Linear,
    /// Polynomial regression with a data-sized degree
    Polynomial,
}

impl Default for ModelType {
    fn default() -> Self {
        ModelType::Linear
    }
}

impl From<&str> for ModelType {
    /// Unrecognized strings are treated as linear, never rejected
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "auto" => ModelType::Auto,
            "polynomial" => ModelType::Polynomial,
            _ => ModelType::Linear,
        }
    }
}

/// Forecast payload returned to the dashboard layer
#[derive(Debug, Clone, Serialize)]
pub struct Forecast {
    /// Future dates, one per forecast day
    pub dates: Vec<NaiveDate>,
    /// Future day offsets from the first observed date
    pub offsets: Vec<i64>,
    /// Point predictions, clipped at zero
    pub predictions: Vec<f64>,
    /// In-sample mean absolute error
    pub mae: f64,
    /// Lower confidence bounds, clipped at zero
    pub confidence_lower: Vec<f64>,
    /// Upper confidence bounds
    pub confidence_upper: Vec<f64>,
    /// In-sample fit quality (R² floored at 0)
    pub fit_quality: f64,
    /// Name of the model actually used
    pub model_name: String,
}

/// Forecast cumulative cases `days_ahead` days past the end of the series.
///
/// The requested model is fitted on the entire series; holdout splitting
/// happens only inside auto selection. A failed fit or projection falls
/// back to plain linear regression under the name "linear_fallback"; the
/// fallback's own failure propagates. A series with a single distinct
/// value short-circuits to a constant forecast with ±5% bounds.
pub fn forecast(series: &CaseSeries, days_ahead: usize, model_type: ModelType) -> Result<Forecast> {
    if days_ahead < 1 {
        return Err(ForecastError::InsufficientData(
            "At least one forecast day is required".to_string(),
        ));
    }
    if series.len() < MIN_SERIES_LEN {
        return Err(ForecastError::InsufficientData(format!(
            "Need at least {} observations, got {}",
            MIN_SERIES_LEN,
            series.len()
        )));
    }

    let features = FeatureSet::from_series(series)?;
    let last_offset = features.offsets[features.len() - 1];
    let dates = series.dates();
    let last_date = dates[dates.len() - 1];

    let future_offsets: Vec<i64> = (1..=days_ahead as i64).map(|i| last_offset + i).collect();
    let horizon_dates = future_dates(last_date, days_ahead);

    // Single distinct value: no curve to fit
    let first = features.values[0];
    if features.values.iter().all(|v| *v == first) {
        let fitted = ModelKind::Constant.fit(&features)?;
        let predictions = fitted.predict(&future_offsets)?;
        let confidence_lower = predictions.iter().map(|p| p * 0.95).collect();
        let confidence_upper = predictions.iter().map(|p| p * 1.05).collect();

        return Ok(Forecast {
            dates: horizon_dates,
            offsets: future_offsets,
            predictions,
            mae: 0.0,
            confidence_lower,
            confidence_upper,
            fit_quality: 1.0,
            model_name: "constant".to_string(),
        });
    }

    let (kind, mut model_name) = match model_type {
        ModelType::Auto => select_best_model(&features, HOLDOUT_FRACTION),
        ModelType::Polynomial => {
            let degree = (features.len() / 5).clamp(2, 3);
            (ModelKind::Polynomial(degree), format!("polynomial_{}", degree))
        }
        ModelType::Linear => (ModelKind::Linear, "linear".to_string()),
    };

    // Final fit always uses the full series
    let fitted = match kind.fit(&features) {
        Ok(fitted) => fitted,
        Err(_) => {
            model_name = "linear_fallback".to_string();
            ModelKind::Linear.fit(&features)?
        }
    };

    let in_sample = fitted.predict(&features.offsets)?;
    let mut mae = mean_absolute_error(&features.values, &in_sample)?;
    let mut raw_r2 = r2_score(&features.values, &in_sample)?;

    let mut predictions = match fitted.predict(&future_offsets) {
        Ok(predictions) => predictions,
        Err(_) => {
            model_name = "linear_fallback".to_string();
            let fallback = ModelKind::Linear.fit(&features)?;
            let fallback_in_sample = fallback.predict(&features.offsets)?;
            mae = mean_absolute_error(&features.values, &fallback_in_sample)?;
            raw_r2 = r2_score(&features.values, &fallback_in_sample)?;
            fallback.predict(&future_offsets)?
        }
    };

    clip_non_negative(&mut predictions);

    // Interval bounds come from the projection before any trend adjustment
    let (confidence_lower, confidence_upper) =
        confidence_interval(&predictions, mae, DEFAULT_CONFIDENCE)?;

    if features.len() >= TREND_MIN_LEN {
        if let Some(adjustment) = trend_divergence(&features.values, TREND_WINDOW)? {
            for (i, prediction) in predictions.iter_mut().enumerate() {
                *prediction += adjustment * (i + 1) as f64;
            }
            clip_non_negative(&mut predictions);
        }
    }

    Ok(Forecast {
        dates: horizon_dates,
        offsets: future_offsets,
        predictions,
        mae,
        confidence_lower,
        confidence_upper,
        fit_quality: raw_r2.max(0.0),
        model_name,
    })
}

/// Simplified entry point: always a plain linear fit, point predictions
/// only. Returns the future dates and the clipped predictions.
pub fn forecast_linear(series: &CaseSeries, days_ahead: usize) -> Result<(Vec<NaiveDate>, Vec<f64>)> {
    if days_ahead < 1 {
        return Err(ForecastError::InsufficientData(
            "At least one forecast day is required".to_string(),
        ));
    }
    if series.len() < MIN_SERIES_LEN {
        return Err(ForecastError::InsufficientData(format!(
            "Need at least {} observations, got {}",
            MIN_SERIES_LEN,
            series.len()
        )));
    }

    let features = FeatureSet::from_series(series)?;
    let last_offset = features.offsets[features.len() - 1];
    let dates = series.dates();
    let last_date = dates[dates.len() - 1];

    let future_offsets: Vec<i64> = (1..=days_ahead as i64).map(|i| last_offset + i).collect();

    let fitted = ModelKind::Linear.fit(&features)?;
    let mut predictions = fitted.predict(&future_offsets)?;
    clip_non_negative(&mut predictions);

    Ok((future_dates(last_date, days_ahead), predictions))
}

fn clip_non_negative(values: &mut [f64]) {
    for value in values.iter_mut() {
        if *value < 0.0 {
            *value = 0.0;
        }
    }
}
