//! Cumulative case series data handling

use crate::error::{ForecastError, Result};
use crate::utils::date_parser;
use chrono::{Duration, NaiveDate};
use polars::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()
}

/// Daily cumulative case counts for a single country, ordered by date
#[derive(Debug, Clone)]
pub struct CaseSeries {
    /// Data frame holding the normalized series
    df: DataFrame,
    /// Name of the date column
    date_column: String,
    /// Name of the cumulative-count column
    value_column: String,
}

/// Loader for the dashboard's per-country CSV extracts
#[derive(Debug)]
pub struct SeriesLoader;

impl SeriesLoader {
    /// Load a case series from a CSV file with a date column and a
    /// cumulative-count column, detected by name. Rows are sorted by
    /// date; rows missing either field are skipped.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<CaseSeries> {
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        let date_column = Self::detect_date_column(&df)?;
        let value_column = Self::detect_value_column(&df, &date_column)?;

        let dates = Self::column_as_dates(&df, &date_column)?;
        let values = Self::column_as_values(&df, &value_column)?;

        let pairs: Vec<(NaiveDate, f64)> = dates
            .into_iter()
            .zip(values)
            .filter_map(|(date, value)| Some((date?, value?)))
            .collect();

        CaseSeries::new(pairs)
    }

    /// Detect the date column in a DataFrame
    fn detect_date_column(df: &DataFrame) -> Result<String> {
        let column_names = df.get_column_names();

        for name in &column_names {
            let lower_name = name.to_lowercase();
            if lower_name.contains("date") || lower_name.contains("time") {
                return Ok(name.to_string());
            }
        }

        // Fall back to the first temporal column
        if let Some(first_col) = df.get_columns().iter().find(|c| c.dtype().is_temporal()) {
            return Ok(first_col.name().to_string());
        }

        Err(ForecastError::DataError(
            "No date column found in data".to_string(),
        ))
    }

    /// Detect the cumulative-count column in a DataFrame
    fn detect_value_column(df: &DataFrame, date_column: &str) -> Result<String> {
        let column_names = df.get_column_names();

        for needle in ["cases", "total", "count"] {
            for name in &column_names {
                if *name != date_column && name.to_lowercase().contains(needle) {
                    return Ok(name.to_string());
                }
            }
        }

        Err(ForecastError::DataError(
            "No case-count column found in data".to_string(),
        ))
    }

    fn column_as_dates(df: &DataFrame, column_name: &str) -> Result<Vec<Option<NaiveDate>>> {
        let col = df.column(column_name)?;

        match col.dtype() {
            DataType::Utf8 => {
                let mut dates = Vec::with_capacity(col.len());
                for value in col.utf8().unwrap() {
                    match value {
                        Some(text) => dates.push(Some(date_parser::parse_date(text)?)),
                        None => dates.push(None),
                    }
                }
                Ok(dates)
            }
            DataType::Date => Ok(col
                .date()
                .unwrap()
                .into_iter()
                .map(|opt_days| opt_days.map(|days| epoch() + Duration::days(days as i64)))
                .collect()),
            _ => Err(ForecastError::DataError(format!(
                "Column '{}' cannot be interpreted as dates",
                column_name
            ))),
        }
    }

    fn column_as_values(df: &DataFrame, column_name: &str) -> Result<Vec<Option<f64>>> {
        let col = df.column(column_name)?;

        match col.dtype() {
            DataType::Float64 => Ok(col.f64().unwrap().into_iter().collect()),
            DataType::Float32 => Ok(col
                .f32()
                .unwrap()
                .into_iter()
                .map(|v| v.map(|v| v as f64))
                .collect()),
            DataType::Int64 => Ok(col
                .i64()
                .unwrap()
                .into_iter()
                .map(|v| v.map(|v| v as f64))
                .collect()),
            DataType::Int32 => Ok(col
                .i32()
                .unwrap()
                .into_iter()
                .map(|v| v.map(|v| v as f64))
                .collect()),
            _ => Err(ForecastError::DataError(format!(
                "Column '{}' cannot be converted to f64",
                column_name
            ))),
        }
    }
}

impl CaseSeries {
    /// Create a series from (date, cumulative count) pairs. Pairs are
    /// sorted by date; at least one observation is required.
    pub fn new(mut pairs: Vec<(NaiveDate, f64)>) -> Result<Self> {
        if pairs.is_empty() {
            return Err(ForecastError::DataError(
                "Cannot build a case series from zero observations".to_string(),
            ));
        }

        pairs.sort_by_key(|(date, _)| *date);

        let days: Vec<i32> = pairs
            .iter()
            .map(|(date, _)| (*date - epoch()).num_days() as i32)
            .collect();
        let values: Vec<f64> = pairs.iter().map(|(_, value)| *value).collect();

        let date_series = Series::new("date", days);
        let value_series = Series::new("total_cases", values);
        let df = DataFrame::new(vec![date_series, value_series])?;

        Ok(Self {
            df,
            date_column: "date".to_string(),
            value_column: "total_cases".to_string(),
        })
    }

    /// Get the DataFrame
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Get the date column name
    pub fn date_column(&self) -> &str {
        &self.date_column
    }

    /// Get the cumulative-count column name
    pub fn value_column(&self) -> &str {
        &self.value_column
    }

    /// Get the observation dates, in order
    pub fn dates(&self) -> Vec<NaiveDate> {
        let col = self.df.column(&self.date_column).unwrap();
        col.i32()
            .unwrap()
            .into_iter()
            .flatten()
            .map(|days| epoch() + Duration::days(days as i64))
            .collect()
    }

    /// Get the cumulative counts, in date order
    pub fn values(&self) -> Vec<f64> {
        let col = self.df.column(&self.value_column).unwrap();
        match col.dtype() {
            DataType::Float64 => col.f64().unwrap().into_iter().flatten().collect(),
            DataType::Int64 => col
                .i64()
                .unwrap()
                .into_iter()
                .flatten()
                .map(|v| v as f64)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Get the length of the series
    pub fn len(&self) -> usize {
        self.df.height()
    }

    /// Summarize the structural quality of the series
    pub fn quality_report(&self) -> DataQuality {
        let dates = self.dates();
        let values = self.values();

        let zero_values = values.iter().filter(|v| **v == 0.0).count();
        let negative_values = values.iter().filter(|v| **v < 0.0).count();

        // A drop beyond the threshold marks a reporting correction
        let monotonic = values.windows(2).all(|w| w[1] >= w[0]);
        let significant_decreases = values
            .windows(2)
            .filter(|w| w[1] - w[0] < -DECREASE_THRESHOLD)
            .count();

        DataQuality {
            total_points: values.len(),
            date_range: (dates[0], dates[dates.len() - 1]),
            zero_values,
            negative_values,
            consistent: monotonic || significant_decreases == 0,
            significant_decreases,
        }
    }
}

/// Day-over-day drop beyond which a cumulative series counts as inconsistent
const DECREASE_THRESHOLD: f64 = 1000.0;

/// Structural quality report for a case series
#[derive(Debug, Clone, Serialize)]
pub struct DataQuality {
    /// Number of observations
    pub total_points: usize,
    /// First and last observation dates
    pub date_range: (NaiveDate, NaiveDate),
    /// Number of zero counts
    pub zero_values: usize,
    /// Number of negative counts
    pub negative_values: usize,
    /// Whether the series behaves like a cumulative count
    pub consistent: bool,
    /// Day-over-day drops beyond the reporting-correction threshold
    pub significant_decreases: usize,
}
