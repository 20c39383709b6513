//! Descriptive statistics over plain slices.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::{ForecastError, Result};

/// Summary statistics of a series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SeriesSummary {
    /// Number of observations.
    pub n: usize,
    pub mean: f64,
    /// Sample standard deviation.
    pub std_dev: f64,
    /// Sample variance (divisor `max(n-1, 1)`).
    pub variance: f64,
    /// Coefficient of variation in percent; NaN when the mean is zero.
    pub cv: f64,
    pub min: f64,
    pub max: f64,
}

fn non_empty(values: &[f64]) -> Result<()> {
    if values.is_empty() {
        Err(ForecastError::EmptyData)
    } else {
        Ok(())
    }
}

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Result<f64> {
    non_empty(values)?;
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance with divisor `max(n-1, 1)`, so a single observation has variance 0.
pub fn variance(values: &[f64]) -> Result<f64> {
    let m = mean(values)?;
    let sum_sq: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    Ok(sum_sq / values.len().saturating_sub(1).max(1) as f64)
}

/// Sample standard deviation.
pub fn std_dev(values: &[f64]) -> Result<f64> {
    variance(values).map(f64::sqrt)
}

/// Coefficient of variation, `std_dev / mean * 100`.
///
/// Returns NaN when the mean is exactly zero; zero-mean series (differenced
/// or centered data) are valid input, so this is not an error.
pub fn coefficient_of_variation(values: &[f64]) -> Result<f64> {
    let m = mean(values)?;
    let sd = std_dev(values)?;
    if m == 0.0 {
        return Ok(f64::NAN);
    }
    Ok(sd / m * 100.0)
}

/// Smallest value.
pub fn min(values: &[f64]) -> Result<f64> {
    non_empty(values)?;
    Ok(values.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Largest value.
pub fn max(values: &[f64]) -> Result<f64> {
    non_empty(values)?;
    Ok(values.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

/// Compute every summary statistic in one call.
pub fn summarize(values: &[f64]) -> Result<SeriesSummary> {
    Ok(SeriesSummary {
        n: values.len(),
        mean: mean(values)?,
        std_dev: std_dev(values)?,
        variance: variance(values)?,
        cv: coefficient_of_variation(values)?,
        min: min(values)?,
        max: max(values)?,
    })
}

/// Pearson correlation using population moments.
///
/// Returns 0 when either input has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(ForecastError::DimensionMismatch {
            expected: x.len(),
            got: y.len(),
        });
    }
    let mx = mean(x)?;
    let my = mean(y)?;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return Ok(0.0);
    }
    Ok(cov / denom)
}

/// Correlation of the series with its own lagged copy for lags `1..=min(max_lags, n-1)`.
pub fn lag_autocorrelations(values: &[f64], max_lags: usize) -> Result<Vec<f64>> {
    non_empty(values)?;
    if max_lags == 0 {
        return Err(ForecastError::InvalidConfiguration(
            "max_lags must be at least 1".to_string(),
        ));
    }
    let n = values.len();
    let lags = max_lags.min(n - 1);
    (1..=lags)
        .map(|lag| pearson(&values[lag..], &values[..n - lag]))
        .collect()
}

/// Mean of each full trailing window of length `window`.
///
/// The output has `n - window + 1` entries; it is empty when the window is
/// longer than the series.
pub fn trailing_moving_average(values: &[f64], window: usize) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(ForecastError::InvalidConfiguration(
            "moving average window must be at least 1".to_string(),
        ));
    }
    Ok(values
        .windows(window)
        .map(|w| w.iter().sum::<f64>() / window as f64)
        .collect())
}

/// Quantile of the standard normal distribution.
pub fn normal_quantile(p: f64) -> Result<f64> {
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| ForecastError::ComputationError(e.to_string()))?;
    Ok(normal.inverse_cdf(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mean_calculates_correctly() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), 3.0, epsilon = 1e-10);
        assert_relative_eq!(mean(&[10.0]).unwrap(), 10.0, epsilon = 1e-10);
        assert!(matches!(mean(&[]), Err(ForecastError::EmptyData)));
    }

    #[test]
    fn variance_uses_bessel_correction() {
        assert_relative_eq!(
            variance(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(),
            2.5,
            epsilon = 1e-10
        );
    }

    #[test]
    fn variance_of_single_value_is_zero() {
        assert_relative_eq!(variance(&[7.0]).unwrap(), 0.0);
        assert_relative_eq!(std_dev(&[7.0]).unwrap(), 0.0);
    }

    #[test]
    fn std_dev_calculates_correctly() {
        assert_relative_eq!(
            std_dev(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(),
            2.5_f64.sqrt(),
            epsilon = 1e-10
        );
    }

    #[test]
    fn coefficient_of_variation_in_percent() {
        // mean 3, sd sqrt(2.5)
        let cv = coefficient_of_variation(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_relative_eq!(cv, 2.5_f64.sqrt() / 3.0 * 100.0, epsilon = 1e-10);
    }

    #[test]
    fn coefficient_of_variation_zero_mean_is_nan() {
        assert!(coefficient_of_variation(&[-1.0, 1.0]).unwrap().is_nan());
    }

    #[test]
    fn summarize_collects_everything() {
        let s = summarize(&[4.0, 2.0, 6.0]).unwrap();
        assert_eq!(s.n, 3);
        assert_relative_eq!(s.mean, 4.0);
        assert_relative_eq!(s.variance, 4.0);
        assert_relative_eq!(s.std_dev, 2.0);
        assert_relative_eq!(s.cv, 50.0);
        assert_relative_eq!(s.min, 2.0);
        assert_relative_eq!(s.max, 6.0);
    }

    #[test]
    fn pearson_perfect_and_inverse() {
        let x = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(pearson(&x, &[2.0, 4.0, 6.0, 8.0]).unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(pearson(&x, &[8.0, 6.0, 4.0, 2.0]).unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn pearson_zero_variance_is_zero() {
        assert_eq!(pearson(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]).unwrap(), 0.0);
    }

    #[test]
    fn pearson_length_mismatch() {
        assert!(matches!(
            pearson(&[1.0, 2.0], &[1.0]),
            Err(ForecastError::DimensionMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn lag_autocorrelations_of_trend_are_high() {
        let values: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let acf = lag_autocorrelations(&values, 12).unwrap();
        assert_eq!(acf.len(), 12);
        // A pure line correlates perfectly with any shift of itself.
        for r in acf {
            assert_relative_eq!(r, 1.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn lag_autocorrelations_capped_by_length() {
        let acf = lag_autocorrelations(&[1.0, 3.0, 2.0, 4.0], 12).unwrap();
        assert_eq!(acf.len(), 3);
    }

    #[test]
    fn trailing_moving_average_windows() {
        let ma = trailing_moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 2).unwrap();
        assert_eq!(ma, vec![1.5, 2.5, 3.5, 4.5]);
        assert!(trailing_moving_average(&[1.0], 3).unwrap().is_empty());
        assert!(trailing_moving_average(&[1.0], 0).is_err());
    }

    #[test]
    fn normal_quantile_known_values() {
        assert_relative_eq!(normal_quantile(0.5).unwrap(), 0.0, epsilon = 1e-9);
        assert_relative_eq!(normal_quantile(0.975).unwrap(), 1.959964, epsilon = 1e-5);
    }
}
