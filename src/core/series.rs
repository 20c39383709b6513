//! Validated input series.

use crate::error::{ForecastError, Result};
use crate::utils::stats::{summarize, SeriesSummary};

/// An ordered, non-empty sequence of finite observations.
///
/// Missing or non-numeric entries are expected to be filtered out before a
/// series reaches the engine; construction rejects anything that slipped
/// through.
///
/// # Example
/// ```
/// use decomp_forecast::core::Series;
///
/// let series = Series::new(vec![10.0, 12.0, 11.0]).unwrap();
/// assert_eq!(series.len(), 3);
/// assert!(Series::new(vec![1.0, f64::NAN]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    values: Vec<f64>,
}

impl Series {
    /// Create a series, rejecting empty input and NaN/infinite values.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        validate_values(&values)?;
        Ok(Self { values })
    }

    /// Observations in time order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of observations (always at least 1).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Descriptive statistics of the whole series.
    pub fn summary(&self) -> SeriesSummary {
        // Non-empty by construction.
        summarize(&self.values).unwrap_or_default()
    }

    /// Consume the series, returning its observations.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

impl TryFrom<Vec<f64>> for Series {
    type Error = ForecastError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Self::new(values)
    }
}

impl TryFrom<&[f64]> for Series {
    type Error = ForecastError;

    fn try_from(values: &[f64]) -> Result<Self> {
        Self::new(values.to_vec())
    }
}

impl AsRef<[f64]> for Series {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// Check that `values` is non-empty and every entry is finite.
pub fn validate_values(values: &[f64]) -> Result<()> {
    if values.is_empty() {
        return Err(ForecastError::EmptyData);
    }
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ForecastError::NonFiniteInput { index }),
        None => Ok(()),
    }
}
