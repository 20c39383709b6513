//! Fitted-model records shared by the smoothing family.

use std::fmt;

use serde::Serialize;

use crate::core::{DecompositionType, Forecast};
use crate::error::{ForecastError, Result};
use crate::utils::stats::normal_quantile;
use crate::utils::AccuracyMetrics;

/// The three exponential-smoothing variants, in tie-breaking precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Simple exponential smoothing (level only).
    Simple,
    /// Holt's linear method (level + trend).
    Holt,
    /// Holt-Winters (level + trend + seasonal).
    Winters,
}

impl Method {
    /// All methods in precedence order.
    pub const ALL: [Method; 3] = [Method::Simple, Method::Holt, Method::Winters];

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Method::Simple => "simple",
            Method::Holt => "holt",
            Method::Winters => "winters",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Smoothing weights chosen for a fit.
///
/// `beta` is present for Holt and Winters; `gamma`, `seasonal_period` and
/// `seasonal_type` only for Winters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SmoothingParameters {
    pub alpha: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gamma: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasonal_period: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasonal_type: Option<DecompositionType>,
}

impl SmoothingParameters {
    pub(crate) fn simple(alpha: f64) -> Self {
        Self {
            alpha,
            beta: None,
            gamma: None,
            seasonal_period: None,
            seasonal_type: None,
        }
    }

    pub(crate) fn holt(alpha: f64, beta: f64) -> Self {
        Self {
            beta: Some(beta),
            ..Self::simple(alpha)
        }
    }

    pub(crate) fn winters(
        alpha: f64,
        beta: f64,
        gamma: f64,
        seasonal_period: usize,
        seasonal_type: DecompositionType,
    ) -> Self {
        Self {
            alpha,
            beta: Some(beta),
            gamma: Some(gamma),
            seasonal_period: Some(seasonal_period),
            seasonal_type: Some(seasonal_type),
        }
    }
}

/// Seasonal indices for one full cycle, stored by position `t % period`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalComponent {
    pub(crate) seasonal_type: DecompositionType,
    pub(crate) indices: Vec<f64>,
}

impl SeasonalComponent {
    pub fn seasonal_type(&self) -> DecompositionType {
        self.seasonal_type
    }

    pub fn indices(&self) -> &[f64] {
        &self.indices
    }

    pub fn period(&self) -> usize {
        self.indices.len()
    }
}

/// Smoothing state after the last observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmoothingState {
    pub(crate) level: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) trend: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) seasonal: Option<SeasonalComponent>,
}

impl SmoothingState {
    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn trend(&self) -> Option<f64> {
        self.trend
    }

    pub fn seasonal(&self) -> Option<&SeasonalComponent> {
        self.seasonal.as_ref()
    }
}

/// One row of the smoothing trace: the state right after observation `index`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SmoothingStep {
    /// Zero-based position in the series.
    pub index: usize,
    pub actual: f64,
    /// One-step-ahead forecast made before seeing `actual`.
    pub forecast: f64,
    /// `actual - forecast`.
    pub error: f64,
    pub level: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<f64>,
    /// Updated seasonal index for this position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasonal: Option<f64>,
}

/// A fitted smoothing model.
///
/// `fitted_values()[i]` is the one-step-ahead forecast of observation
/// `offset() + i`; the first `offset()` observations seed the state and have
/// no fitted counterpart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitResult {
    method: Method,
    parameters: SmoothingParameters,
    fitted_values: Vec<f64>,
    residuals: Vec<f64>,
    metrics: AccuracyMetrics,
    offset: usize,
    n: usize,
    state: SmoothingState,
    steps: Vec<SmoothingStep>,
}

impl FitResult {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        method: Method,
        parameters: SmoothingParameters,
        fitted_values: Vec<f64>,
        residuals: Vec<f64>,
        metrics: AccuracyMetrics,
        n: usize,
        state: SmoothingState,
        steps: Vec<SmoothingStep>,
    ) -> Self {
        Self {
            method,
            parameters,
            offset: n - fitted_values.len(),
            fitted_values,
            residuals,
            metrics,
            n,
            state,
            steps,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn parameters(&self) -> &SmoothingParameters {
        &self.parameters
    }

    pub fn fitted_values(&self) -> &[f64] {
        &self.fitted_values
    }

    /// `actual - fitted` over the fitted range.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    pub fn metrics(&self) -> &AccuracyMetrics {
        &self.metrics
    }

    /// Index of the first observation with a fitted value.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the series the model was fitted on.
    pub fn n_observations(&self) -> usize {
        self.n
    }

    pub fn state(&self) -> &SmoothingState {
        &self.state
    }

    /// Step-by-step trace of the recursion over the fitted range.
    pub fn steps(&self) -> &[SmoothingStep] {
        &self.steps
    }

    /// Point forecasts for `horizon` steps past the end of the series.
    ///
    /// - Simple: the final level, repeated.
    /// - Holt: `level + h * trend`.
    /// - Winters: the trend line times (or plus) the matching index of the last seasonal cycle.
    pub fn forecast(&self, horizon: usize) -> Result<Forecast> {
        check_horizon(horizon)?;
        let values = (1..=horizon)
            .map(|h| self.state.project(self.n, h))
            .collect();
        Ok(Forecast::from_values(values))
    }

    /// Point forecasts with normal prediction intervals at coverage `level`.
    ///
    /// The forecast variance at step `h` is `mse * (1 + sum_{j<h} c_j^2)` with
    /// `c_j = alpha * (1 + j * beta) + gamma * [j mod s == 0]`, the
    /// additive-error approximation (exact for Simple and Holt).
    pub fn forecast_with_intervals(&self, horizon: usize, level: f64) -> Result<Forecast> {
        check_horizon(horizon)?;
        if level.is_nan() || level <= 0.0 || level >= 1.0 {
            return Err(ForecastError::InvalidConfiguration(format!(
                "interval level must lie in (0, 1), got {level}"
            )));
        }

        let z = normal_quantile((1.0 + level) / 2.0)?;
        let variance = self.metrics.mse;

        let mut values = Vec::with_capacity(horizon);
        let mut lower = Vec::with_capacity(horizon);
        let mut upper = Vec::with_capacity(horizon);
        let mut factor = 1.0;

        for h in 1..=horizon {
            if h > 1 {
                let c = self.error_weight(h - 1);
                factor += c * c;
            }
            let point = self.state.project(self.n, h);
            let half_width = z * (variance * factor).sqrt();
            values.push(point);
            lower.push(point - half_width);
            upper.push(point + half_width);
        }

        Ok(Forecast::from_values_with_intervals(values, lower, upper, level))
    }

    fn error_weight(&self, j: usize) -> f64 {
        let p = &self.parameters;
        let trend = p.beta.map_or(0.0, |beta| j as f64 * beta);
        let seasonal = match (p.gamma, p.seasonal_period) {
            (Some(gamma), Some(period)) if j % period == 0 => gamma,
            _ => 0.0,
        };
        p.alpha * (1.0 + trend) + seasonal
    }
}

fn check_horizon(horizon: usize) -> Result<()> {
    if horizon == 0 {
        return Err(ForecastError::InvalidConfiguration(
            "forecast horizon must be at least 1".to_string(),
        ));
    }
    Ok(())
}
