//! Numeric feature construction for regression fitting

use crate::data::CaseSeries;
use crate::error::{ForecastError, Result};

/// Training features derived from a case series: integer day offsets from
/// the first observation paired with the cumulative counts.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    /// Day distance of each observation from the first date
    pub offsets: Vec<i64>,
    /// Cumulative count at each observation
    pub values: Vec<f64>,
}

impl FeatureSet {
    /// Create a feature set from matching offset and value vectors
    pub fn new(offsets: Vec<i64>, values: Vec<f64>) -> Result<Self> {
        if offsets.len() != values.len() {
            return Err(ForecastError::DataError(format!(
                "Offsets length ({}) doesn't match values length ({})",
                offsets.len(),
                values.len()
            )));
        }

        Ok(Self { offsets, values })
    }

    /// Build features from a case series: offset i is the day distance
    /// from the earliest date, value i the cumulative count on that day.
    pub fn from_series(series: &CaseSeries) -> Result<Self> {
        let dates = series.dates();
        let values = series.values();

        if dates.is_empty() {
            return Err(ForecastError::DataError(
                "Empty case series".to_string(),
            ));
        }

        let first = dates[0];
        let offsets = dates.iter().map(|d| (*d - first).num_days()).collect();

        Self::new(offsets, values)
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the feature set holds no observations
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Take the leading `len` observations as an owned feature set
    pub fn head(&self, len: usize) -> Self {
        Self {
            offsets: self.offsets[..len.min(self.offsets.len())].to_vec(),
            values: self.values[..len.min(self.values.len())].to_vec(),
        }
    }

    /// Take everything from index `start` onwards as an owned feature set
    pub fn tail(&self, start: usize) -> Self {
        Self {
            offsets: self.offsets[start.min(self.offsets.len())..].to_vec(),
            values: self.values[start.min(self.values.len())..].to_vec(),
        }
    }
}
