//! Forecast result structure for holding multi-step predictions.

use serde::Serialize;

/// Point forecasts for `horizon` steps ahead, with optional prediction intervals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Forecast {
    /// Point predictions, one per step.
    values: Vec<f64>,
    /// Lower prediction interval bounds.
    #[serde(skip_serializing_if = "Option::is_none")]
    lower: Option<Vec<f64>>,
    /// Upper prediction interval bounds.
    #[serde(skip_serializing_if = "Option::is_none")]
    upper: Option<Vec<f64>>,
    /// Coverage of the intervals, e.g. 0.95.
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<f64>,
}

impl Forecast {
    /// Create a forecast from point predictions.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self {
            values,
            lower: None,
            upper: None,
            level: None,
        }
    }

    /// Create a forecast with prediction intervals at the given coverage.
    pub fn from_values_with_intervals(
        values: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
        level: f64,
    ) -> Self {
        Self {
            values,
            lower: Some(lower),
            upper: Some(upper),
            level: Some(level),
        }
    }

    /// Number of forecast steps.
    pub fn horizon(&self) -> usize {
        self.values.len()
    }

    /// Check if the forecast is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Point predictions.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Lower interval bounds, if computed.
    pub fn lower(&self) -> Option<&[f64]> {
        self.lower.as_deref()
    }

    /// Upper interval bounds, if computed.
    pub fn upper(&self) -> Option<&[f64]> {
        self.upper.as_deref()
    }

    /// Interval coverage, if intervals were computed.
    pub fn level(&self) -> Option<f64> {
        self.level
    }

    /// Check if prediction intervals are available.
    pub fn has_intervals(&self) -> bool {
        self.lower.is_some() && self.upper.is_some()
    }

    /// Consume the forecast, returning the point predictions.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_from_values() {
        let forecast = Forecast::from_values(vec![1.0, 2.0, 3.0]);
        assert_eq!(forecast.horizon(), 3);
        assert!(!forecast.is_empty());
        assert!(!forecast.has_intervals());
        assert!(forecast.lower().is_none());
        assert!(forecast.level().is_none());
    }

    #[test]
    fn forecast_with_intervals() {
        let forecast =
            Forecast::from_values_with_intervals(vec![5.0, 5.0], vec![4.0, 3.5], vec![6.0, 6.5], 0.9);
        assert!(forecast.has_intervals());
        assert_eq!(forecast.lower().unwrap(), &[4.0, 3.5]);
        assert_eq!(forecast.upper().unwrap(), &[6.0, 6.5]);
        assert_eq!(forecast.level(), Some(0.9));
        assert_eq!(forecast.into_values(), vec![5.0, 5.0]);
    }

    #[test]
    fn forecast_serializes_without_missing_intervals() {
        let forecast = Forecast::from_values(vec![1.5]);
        let json = serde_json::to_string(&forecast).unwrap();
        assert_eq!(json, r#"{"values":[1.5]}"#);
    }
}
