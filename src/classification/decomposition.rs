//! Classical moving-average decomposition into trend, season and residual.

use serde::Serialize;
use tracing::debug;

use crate::core::DecompositionType;
use crate::error::{ForecastError, Result};

/// Trend, seasonal and residual components of a series.
///
/// The centered moving average leaves `period / 2` positions undefined at
/// each end; `trend` and `residual` are `None` there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decomposition {
    pub kind: DecompositionType,
    pub period: usize,
    pub trend: Vec<Option<f64>>,
    /// Normalized seasonal index repeated over the whole series.
    pub seasonal: Vec<f64>,
    pub residual: Vec<Option<f64>>,
}

impl Decomposition {
    /// One cycle of seasonal indices, by position `t % period`.
    pub fn seasonal_indices(&self) -> &[f64] {
        &self.seasonal[..self.period]
    }

    /// Residuals where the trend is defined.
    pub fn defined_residuals(&self) -> Vec<f64> {
        self.residual.iter().flatten().copied().collect()
    }

    /// Population variance of the defined residuals.
    pub fn residual_variance(&self) -> f64 {
        population_variance(&self.defined_residuals())
    }
}

/// Residual variance under both decompositions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResidualVarianceComparison {
    pub additive: f64,
    pub multiplicative: f64,
    /// Additive only when its residual variance is strictly smaller.
    pub recommendation: DecompositionType,
}

/// Decompose `values` with a centered moving-average trend.
///
/// For an even period the trend is a 2×m moving average. Seasonal indices are
/// the per-position mean of the detrended series, normalized to sum to zero
/// (additive) or average one (multiplicative).
///
/// # Example
/// ```
/// use decomp_forecast::classification::decompose;
/// use decomp_forecast::core::DecompositionType;
///
/// let values: Vec<f64> = (0..12).map(|i| i as f64 + [1.0, -1.0][i % 2]).collect();
/// let d = decompose(&values, 2, DecompositionType::Additive).unwrap();
/// assert_eq!(d.seasonal_indices(), &[1.0, -1.0]);
/// assert!(d.trend[0].is_none());
/// ```
pub fn decompose(values: &[f64], period: usize, kind: DecompositionType) -> Result<Decomposition> {
    if period < 2 {
        return Err(ForecastError::InvalidConfiguration(format!(
            "seasonal period must be at least 2, got {period}"
        )));
    }
    let n = values.len();
    if n < 2 * period {
        return Err(ForecastError::InsufficientData {
            needed: 2 * period,
            got: n,
        });
    }

    let trend = centered_moving_average(values, period);

    let mut detrended = vec![None; n];
    for (t, (y, tr)) in values.iter().zip(&trend).enumerate() {
        if let Some(tr) = tr {
            detrended[t] = Some(match kind {
                DecompositionType::Additive => y - tr,
                DecompositionType::Multiplicative => {
                    if tr.abs() < 1e-10 {
                        return Err(ForecastError::ComputationError(format!(
                            "trend is zero at index {t}; multiplicative decomposition undefined"
                        )));
                    }
                    y / tr
                }
            });
        }
    }

    let mut sums = vec![0.0; period];
    let mut counts = vec![0usize; period];
    for (t, d) in detrended.iter().enumerate() {
        if let Some(d) = d {
            sums[t % period] += d;
            counts[t % period] += 1;
        }
    }
    let raw: Vec<f64> = sums
        .iter()
        .zip(&counts)
        .map(|(s, c)| s / (*c).max(1) as f64)
        .collect();
    let center = raw.iter().sum::<f64>() / period as f64;
    let indices: Vec<f64> = match kind {
        DecompositionType::Additive => raw.iter().map(|r| r - center).collect(),
        DecompositionType::Multiplicative => {
            if center.abs() < 1e-10 {
                return Err(ForecastError::ComputationError(
                    "seasonal indices average to zero".to_string(),
                ));
            }
            raw.iter().map(|r| r / center).collect()
        }
    };

    let seasonal: Vec<f64> = (0..n).map(|t| indices[t % period]).collect();
    let residual = values
        .iter()
        .zip(&trend)
        .zip(&seasonal)
        .map(|((y, tr), s)| {
            tr.map(|tr| match kind {
                DecompositionType::Additive => y - tr - s,
                DecompositionType::Multiplicative => y / (tr * s),
            })
        })
        .collect();

    Ok(Decomposition {
        kind,
        period,
        trend,
        seasonal,
        residual,
    })
}

/// Decompose both ways and recommend the one leaving less residual variance.
///
/// Variances are compared as-is; multiplicative residuals are ratios around
/// one, additive residuals are in the units of the series.
#[tracing::instrument(skip_all, fields(n = values.len(), period = period))]
pub fn compare_residual_variance(values: &[f64], period: usize) -> Result<ResidualVarianceComparison> {
    let additive = decompose(values, period, DecompositionType::Additive)?.residual_variance();
    let multiplicative =
        decompose(values, period, DecompositionType::Multiplicative)?.residual_variance();
    let recommendation = if additive < multiplicative {
        DecompositionType::Additive
    } else {
        DecompositionType::Multiplicative
    };
    debug!(additive, multiplicative, %recommendation, "residual variances");
    Ok(ResidualVarianceComparison {
        additive,
        multiplicative,
        recommendation,
    })
}

fn centered_moving_average(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let n = values.len();
    let half = period / 2;
    let mut trend = vec![None; n];
    for t in half..n - half {
        let window = &values[t - half..=t + half];
        let sum = if period % 2 == 0 {
            // 2×m: the two end points get half weight.
            let inner: f64 = window[1..window.len() - 1].iter().sum();
            inner + 0.5 * (window[0] + window[window.len() - 1])
        } else {
            window.iter().sum()
        };
        trend[t] = Some(sum / period as f64);
    }
    trend
}

fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n
}
