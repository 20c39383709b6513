//! Accuracy metrics for comparing fitted values with observations.

use serde::Serialize;

use crate::error::{ForecastError, Result};

/// Accuracy of one-step-ahead fitted values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AccuracyMetrics {
    /// Mean Squared Error
    pub mse: f64,
    /// Mean Absolute Error
    pub mae: f64,
    /// Root Mean Squared Error, always `mse.sqrt()`
    pub rmse: f64,
    /// Mean Absolute Percentage Error over non-zero actuals (None if every actual is zero)
    pub mape: Option<f64>,
}

/// Calculate accuracy metrics between actual and fitted values.
///
/// # Arguments
/// * `actual` - Observed values
/// * `fitted` - Fitted/forecast values paired with `actual`
///
/// # Example
/// ```
/// use decomp_forecast::utils::calculate_metrics;
///
/// let m = calculate_metrics(&[1.0, 2.0, 4.0], &[1.0, 3.0, 3.0]).unwrap();
/// assert_eq!(m.rmse, m.mse.sqrt());
/// ```
pub fn calculate_metrics(actual: &[f64], fitted: &[f64]) -> Result<AccuracyMetrics> {
    if actual.is_empty() || fitted.is_empty() {
        return Err(ForecastError::EmptyData);
    }

    if actual.len() != fitted.len() {
        return Err(ForecastError::DimensionMismatch {
            expected: actual.len(),
            got: fitted.len(),
        });
    }

    let mse = mse(actual, fitted);
    Ok(AccuracyMetrics {
        mse,
        mae: mae(actual, fitted),
        rmse: mse.sqrt(),
        mape: mape(actual, fitted),
    })
}

/// Calculate MSE between two slices (NaN on empty or mismatched input).
pub fn mse(actual: &[f64], fitted: &[f64]) -> f64 {
    if actual.len() != fitted.len() || actual.is_empty() {
        return f64::NAN;
    }
    actual
        .iter()
        .zip(fitted)
        .map(|(a, f)| (a - f).powi(2))
        .sum::<f64>()
        / actual.len() as f64
}

/// Calculate MAE between two slices (NaN on empty or mismatched input).
pub fn mae(actual: &[f64], fitted: &[f64]) -> f64 {
    if actual.len() != fitted.len() || actual.is_empty() {
        return f64::NAN;
    }
    actual
        .iter()
        .zip(fitted)
        .map(|(a, f)| (a - f).abs())
        .sum::<f64>()
        / actual.len() as f64
}

/// Calculate RMSE between two slices.
pub fn rmse(actual: &[f64], fitted: &[f64]) -> f64 {
    mse(actual, fitted).sqrt()
}

/// Calculate MAPE in percent, skipping pairs whose actual value is zero.
///
/// Returns `None` when no pair has a non-zero actual or the inputs are mismatched.
pub fn mape(actual: &[f64], fitted: &[f64]) -> Option<f64> {
    if actual.len() != fitted.len() {
        return None;
    }
    let (sum, count) = actual
        .iter()
        .zip(fitted)
        .filter(|(a, _)| **a != 0.0)
        .fold((0.0, 0usize), |(sum, count), (a, f)| {
            (sum + ((a - f) / a).abs(), count + 1)
        });
    (count > 0).then(|| 100.0 * sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn calculate_metrics_perfect_prediction() {
        let actual = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let metrics = calculate_metrics(&actual, &actual).unwrap();

        assert_relative_eq!(metrics.mae, 0.0, epsilon = 1e-10);
        assert_relative_eq!(metrics.mse, 0.0, epsilon = 1e-10);
        assert_relative_eq!(metrics.rmse, 0.0, epsilon = 1e-10);
        assert_relative_eq!(metrics.mape.unwrap(), 0.0, epsilon = 1e-10);
    }

    #[test]
    fn calculate_metrics_known_values() {
        let actual = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let fitted = vec![1.5, 2.5, 2.5, 4.5, 4.5];
        // Errors: 0.5 everywhere

        let metrics = calculate_metrics(&actual, &fitted).unwrap();

        assert_relative_eq!(metrics.mae, 0.5, epsilon = 1e-10);
        assert_relative_eq!(metrics.mse, 0.25, epsilon = 1e-10);
        assert_relative_eq!(metrics.rmse, 0.5, epsilon = 1e-10);
        let expected_mape = 100.0 * (0.5 + 0.25 + 0.5 / 3.0 + 0.125 + 0.1) / 5.0;
        assert_relative_eq!(metrics.mape.unwrap(), expected_mape, epsilon = 1e-10);
    }

    #[test]
    fn rmse_is_exactly_sqrt_mse() {
        let metrics = calculate_metrics(&[3.0, 7.0, 1.0], &[2.0, 9.5, 1.3]).unwrap();
        assert_eq!(metrics.rmse, metrics.mse.sqrt());
    }

    #[test]
    fn mape_skips_zero_actuals() {
        let metrics = calculate_metrics(&[0.0, 10.0, 20.0], &[5.0, 11.0, 18.0]).unwrap();
        // Only (10, 11) and (20, 18) count: 10% and 10%.
        assert_relative_eq!(metrics.mape.unwrap(), 10.0, epsilon = 1e-10);
    }

    #[test]
    fn mape_undefined_for_all_zero_actuals() {
        let metrics = calculate_metrics(&[0.0, 0.0], &[1.0, -1.0]).unwrap();
        assert!(metrics.mape.is_none());
        assert_relative_eq!(metrics.mae, 1.0);
    }

    #[test]
    fn calculate_metrics_dimension_mismatch() {
        let result = calculate_metrics(&[1.0, 2.0, 3.0], &[1.0, 2.0]);
        assert!(matches!(
            result,
            Err(ForecastError::DimensionMismatch { expected: 3, got: 2 })
        ));
    }

    #[test]
    fn calculate_metrics_empty_data() {
        let result = calculate_metrics(&[], &[]);
        assert!(matches!(result, Err(ForecastError::EmptyData)));
    }

    #[test]
    fn standalone_functions_reject_mismatch() {
        assert!(mse(&[1.0], &[]).is_nan());
        assert!(mae(&[], &[]).is_nan());
        assert!(mape(&[1.0, 2.0], &[1.0]).is_none());
        assert_relative_eq!(rmse(&[1.0, 2.0, 3.0], &[2.0, 3.0, 4.0]), 1.0, epsilon = 1e-10);
    }
}
