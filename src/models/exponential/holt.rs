//! Holt's Linear Trend.
//!
//! Extends simple exponential smoothing with a trend component.

use tracing::debug;

use crate::core::Series;
use crate::error::Result;
use crate::models::exponential::recursion::{
    clamp_weight, warn_on_bounds, Variant, Weights, PARAM_BOUNDS,
};
use crate::models::fit::{FitResult, Method, SmoothingParameters};
use crate::models::Smoother;
use crate::utils::optimization::{nelder_mead, OptimizerConfig};

/// Holt's linear trend smoother.
///
/// Model equations:
/// - Level: `l_t = α × y_t + (1-α) × (l_{t-1} + b_{t-1})`
/// - Trend: `b_t = β × (l_t - l_{t-1}) + (1-β) × b_{t-1}`
/// - Forecast: `ŷ_{t+h} = l_t + h × b_t`
///
/// Seeded with `l_0 = y_0` and `b_0 = y_1 - y_0`.
///
/// # Example
/// ```
/// use decomp_forecast::core::Series;
/// use decomp_forecast::models::{HoltSmoother, Smoother};
///
/// let series = Series::new((0..10).map(|i| 2.0 * i as f64).collect()).unwrap();
/// let fit = HoltSmoother::new(0.5, 0.5).fit(&series).unwrap();
/// let forecast = fit.forecast(2).unwrap();
/// assert!((forecast.values()[0] - 20.0).abs() < 1e-9);
/// assert!((forecast.values()[1] - 22.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct HoltSmoother {
    alpha: Option<f64>,
    beta: Option<f64>,
    optimizer: OptimizerConfig,
}

impl HoltSmoother {
    /// Create a smoother with fixed level and trend weights.
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self {
            alpha: Some(clamp_weight(alpha)),
            beta: Some(clamp_weight(beta)),
            optimizer: OptimizerConfig::default(),
        }
    }

    /// Create a smoother whose weights minimize the in-sample SSE.
    pub fn auto() -> Self {
        Self {
            alpha: None,
            beta: None,
            optimizer: OptimizerConfig::default(),
        }
    }

    /// Override the optimizer settings.
    pub fn with_optimizer(mut self, optimizer: OptimizerConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn alpha(&self) -> Option<f64> {
        self.alpha
    }

    pub fn beta(&self) -> Option<f64> {
        self.beta
    }

    fn optimize_params(&self, values: &[f64]) -> Result<(f64, f64)> {
        let optimum = nelder_mead(
            |p| Variant::LevelTrend.sse(values, Weights::trend(p[0], p[1])),
            &[0.3, 0.1],
            &[PARAM_BOUNDS; 2],
            &self.optimizer,
        )?;
        let alpha = clamp_weight(optimum.point[0]);
        let beta = clamp_weight(optimum.point[1]);
        warn_on_bounds(&[("alpha", alpha), ("beta", beta)]);
        debug!(
            alpha,
            beta,
            sse = optimum.value,
            iterations = optimum.iterations,
            "optimized Holt weights"
        );
        Ok((alpha, beta))
    }
}

impl Default for HoltSmoother {
    fn default() -> Self {
        Self::auto()
    }
}

impl Smoother for HoltSmoother {
    #[tracing::instrument(name = "fit_holt", skip_all, fields(n = series.len()))]
    fn fit(&self, series: &Series) -> Result<FitResult> {
        let values = series.values();
        Variant::LevelTrend.check(values.len())?;

        let (alpha, beta) = match (self.alpha, self.beta) {
            (Some(alpha), Some(beta)) => (alpha, beta),
            _ => self.optimize_params(values)?,
        };

        Variant::LevelTrend.fit(
            values,
            Weights::trend(alpha, beta),
            SmoothingParameters::holt(alpha, beta),
        )
    }

    fn method(&self) -> Method {
        Method::Holt
    }

    fn min_observations(&self) -> usize {
        Variant::LevelTrend.min_observations()
    }
}
