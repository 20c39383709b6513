//! Holt-Winters seasonal smoothing.
//!
//! Extends Holt's linear trend with a seasonal component of fixed period,
//! combined with the level either multiplicatively (the default) or additively.

use tracing::{debug, warn};

use crate::core::{DecompositionType, Series};
use crate::error::Result;
use crate::models::exponential::recursion::{
    clamp_weight, warn_on_bounds, Variant, Weights, PARAM_BOUNDS,
};
use crate::models::fit::{FitResult, Method, SmoothingParameters};
use crate::models::Smoother;
use crate::utils::optimization::{nelder_mead, OptimizerConfig};

/// Holt-Winters smoother.
///
/// Multiplicative model equations:
/// - Level: `l_t = α × (y_t / s_{t-m}) + (1-α) × (l_{t-1} + b_{t-1})`
/// - Trend: `b_t = β × (l_t - l_{t-1}) + (1-β) × b_{t-1}`
/// - Seasonal: `s_t = γ × (y_t / l_t) + (1-γ) × s_{t-m}`
/// - Forecast: `ŷ_{t+h} = (l_t + h × b_t) × s_{t+h-m(k+1)}`
///
/// The additive model replaces division by subtraction and multiplication by
/// addition. The first cycle seeds the state: level is its mean, trend is
/// zero, and the seasonal indices are each observation relative to that mean.
///
/// # Example
/// ```
/// use decomp_forecast::core::Series;
/// use decomp_forecast::models::{Smoother, WintersSmoother};
///
/// let values: Vec<f64> = (0..24)
///     .map(|i| 100.0 * (1.0 + 0.3 * (i % 4) as f64))
///     .collect();
/// let fit = WintersSmoother::auto(4).fit(&Series::new(values).unwrap()).unwrap();
/// assert_eq!(fit.offset(), 4);
/// assert_eq!(fit.forecast(8).unwrap().horizon(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct WintersSmoother {
    alpha: Option<f64>,
    beta: Option<f64>,
    gamma: Option<f64>,
    seasonal_period: usize,
    seasonal_type: DecompositionType,
    optimizer: OptimizerConfig,
}

impl WintersSmoother {
    /// Create a multiplicative smoother with fixed weights.
    pub fn new(alpha: f64, beta: f64, gamma: f64, seasonal_period: usize) -> Self {
        Self {
            alpha: Some(clamp_weight(alpha)),
            beta: Some(clamp_weight(beta)),
            gamma: Some(clamp_weight(gamma)),
            seasonal_period,
            seasonal_type: DecompositionType::Multiplicative,
            optimizer: OptimizerConfig::default(),
        }
    }

    /// Create a multiplicative smoother whose weights minimize the in-sample SSE.
    pub fn auto(seasonal_period: usize) -> Self {
        Self {
            alpha: None,
            beta: None,
            gamma: None,
            seasonal_period,
            seasonal_type: DecompositionType::Multiplicative,
            optimizer: OptimizerConfig::default(),
        }
    }

    /// Switch between multiplicative and additive seasonality.
    pub fn with_seasonal_type(mut self, seasonal_type: DecompositionType) -> Self {
        self.seasonal_type = seasonal_type;
        self
    }

    /// Override the optimizer settings.
    pub fn with_optimizer(mut self, optimizer: OptimizerConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn seasonal_period(&self) -> usize {
        self.seasonal_period
    }

    pub fn seasonal_type(&self) -> DecompositionType {
        self.seasonal_type
    }

    fn variant(&self) -> Variant {
        Variant::Seasonal {
            period: self.seasonal_period,
            seasonal_type: self.seasonal_type,
        }
    }

    fn optimize_params(&self, values: &[f64]) -> Result<(f64, f64, f64)> {
        let variant = self.variant();
        let optimum = nelder_mead(
            |p| variant.sse(values, Weights::seasonal(p[0], p[1], p[2])),
            &[0.3, 0.1, 0.1],
            &[PARAM_BOUNDS; 3],
            &self.optimizer,
        )?;
        let alpha = clamp_weight(optimum.point[0]);
        let beta = clamp_weight(optimum.point[1]);
        let gamma = clamp_weight(optimum.point[2]);
        warn_on_bounds(&[("alpha", alpha), ("beta", beta), ("gamma", gamma)]);
        debug!(
            alpha,
            beta,
            gamma,
            sse = optimum.value,
            iterations = optimum.iterations,
            "optimized Holt-Winters weights"
        );
        Ok((alpha, beta, gamma))
    }
}

impl Smoother for WintersSmoother {
    #[tracing::instrument(
        name = "fit_winters",
        skip_all,
        fields(n = series.len(), period = self.seasonal_period, seasonal_type = %self.seasonal_type)
    )]
    fn fit(&self, series: &Series) -> Result<FitResult> {
        let values = series.values();
        let variant = self.variant();
        // Fails fast on short series and zero-level multiplicative seeds.
        variant.seed(values)?;

        if self.seasonal_type == DecompositionType::Multiplicative && values.iter().any(|y| *y <= 0.0)
        {
            warn!("multiplicative seasonality on a series with non-positive values");
        }

        let (alpha, beta, gamma) = match (self.alpha, self.beta, self.gamma) {
            (Some(alpha), Some(beta), Some(gamma)) => (alpha, beta, gamma),
            _ => self.optimize_params(values)?,
        };

        variant.fit(
            values,
            Weights::seasonal(alpha, beta, gamma),
            SmoothingParameters::winters(
                alpha,
                beta,
                gamma,
                self.seasonal_period,
                self.seasonal_type,
            ),
        )
    }

    fn method(&self) -> Method {
        Method::Winters
    }

    fn min_observations(&self) -> usize {
        self.variant().min_observations()
    }
}

/// Period used when the caller does not supply one: `max(4, min(12, n / 3))`.
pub fn default_seasonal_period(n: usize) -> usize {
    (n / 3).clamp(4, 12)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    fn series(values: &[f64]) -> Series {
        Series::try_from(values).unwrap()
    }

    fn seasonal_series(n: usize, period: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 * (1.0 + 0.5 * (2.0 * PI * i as f64 / period as f64).sin()))
            .collect()
    }

    #[test]
    fn winters_exact_on_pure_multiplicative_pattern() {
        let values = seasonal_series(48, 12);
        let fit = WintersSmoother::new(0.3, 0.1, 0.2, 12)
            .fit(&series(&values))
            .unwrap();

        assert_eq!(fit.offset(), 12);
        assert_eq!(fit.fitted_values().len(), 36);
        assert_relative_eq!(fit.metrics().rmse, 0.0, epsilon = 1e-9);

        let forecast = fit.forecast(12).unwrap();
        for (h, v) in forecast.values().iter().enumerate() {
            assert_relative_eq!(*v, values[36 + h], epsilon = 1e-8);
        }
    }

    #[test]
    fn winters_auto_reports_all_parameters() {
        let values: Vec<f64> = seasonal_series(36, 6)
            .iter()
            .enumerate()
            .map(|(i, v)| v + 0.5 * i as f64 + if i % 5 == 0 { 3.0 } else { -1.0 })
            .collect();
        let fit = WintersSmoother::auto(6).fit(&series(&values)).unwrap();
        let p = fit.parameters();
        assert_eq!(p.seasonal_period, Some(6));
        assert_eq!(p.seasonal_type, Some(DecompositionType::Multiplicative));
        for w in [p.alpha, p.beta.unwrap(), p.gamma.unwrap()] {
            assert!(w > 0.0 && w < 1.0);
        }
        let state = fit.state();
        assert_eq!(state.seasonal().unwrap().period(), 6);
    }

    #[test]
    fn winters_additive_forecast_reuses_last_cycle() {
        let pattern = [-3.0, 1.0, 2.0];
        let values: Vec<f64> = (0..12).map(|i| 50.0 + pattern[i % 3]).collect();
        let fit = WintersSmoother::new(0.5, 0.5, 0.5, 3)
            .with_seasonal_type(DecompositionType::Additive)
            .fit(&series(&values))
            .unwrap();
        let forecast = fit.forecast(4).unwrap();
        assert_relative_eq!(forecast.values()[0], 47.0, epsilon = 1e-10);
        assert_relative_eq!(forecast.values()[1], 51.0, epsilon = 1e-10);
        assert_relative_eq!(forecast.values()[2], 52.0, epsilon = 1e-10);
        assert_relative_eq!(forecast.values()[3], 47.0, epsilon = 1e-10);
    }

    #[test]
    fn winters_requires_two_cycles() {
        let result = WintersSmoother::auto(12).fit(&series(&[10.0; 23]));
        assert!(matches!(
            result,
            Err(ForecastError::InsufficientData { needed: 24, got: 23 })
        ));
    }

    #[test]
    fn winters_rejects_period_below_two() {
        let result = WintersSmoother::auto(1).fit(&series(&[10.0; 10]));
        assert!(matches!(result, Err(ForecastError::InvalidConfiguration(_))));
    }

    #[test]
    fn winters_multiplicative_zero_level_fails() {
        let values = [-2.0, 2.0, -2.0, 2.0, -2.0, 2.0];
        let result = WintersSmoother::auto(2).fit(&series(&values));
        assert!(matches!(result, Err(ForecastError::ComputationError(_))));

        let additive = WintersSmoother::auto(2)
            .with_seasonal_type(DecompositionType::Additive)
            .fit(&series(&values));
        assert!(additive.is_ok());
    }

    #[test]
    fn winters_multiplicative_zero_seasonal_index_fails() {
        let values = [0.0, 10.0, 10.0, 10.0, 4.0, 10.0, 10.0, 10.0, 8.0, 10.0, 10.0, 10.0];
        let result = WintersSmoother::new(0.5, 0.1, 0.1, 4).fit(&series(&values));
        assert!(matches!(result, Err(ForecastError::ComputationError(_))));

        let additive = WintersSmoother::new(0.5, 0.1, 0.1, 4)
            .with_seasonal_type(DecompositionType::Additive)
            .fit(&series(&values));
        assert!(additive.is_ok());
    }

    #[test]
    fn default_period_is_clamped() {
        assert_eq!(default_seasonal_period(6), 4);
        assert_eq!(default_seasonal_period(24), 8);
        assert_eq!(default_seasonal_period(36), 12);
        assert_eq!(default_seasonal_period(500), 12);
    }
}
