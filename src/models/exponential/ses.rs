//! Simple Exponential Smoothing (SES).
//!
//! SES is suitable for series with no clear trend or seasonality.

use tracing::debug;

use crate::core::Series;
use crate::error::Result;
use crate::models::exponential::recursion::{
    clamp_weight, warn_on_bounds, Variant, Weights, PARAM_BOUNDS,
};
use crate::models::fit::{FitResult, Method, SmoothingParameters};
use crate::models::Smoother;
use crate::utils::optimization::{golden_section, OptimizerConfig};

/// Simple Exponential Smoothing.
///
/// The model equation is:
/// `level_t = α × y_t + (1-α) × level_{t-1}`
///
/// seeded with `level_0 = y_0`. The fitted value at `t` is `level_{t-1}`.
///
/// # Example
/// ```
/// use decomp_forecast::core::Series;
/// use decomp_forecast::models::{ExponentialSmoother, Smoother};
///
/// let series = Series::new(vec![10.0, 12.0, 11.0, 13.0, 12.0, 14.0]).unwrap();
/// let fit = ExponentialSmoother::new(0.3).fit(&series).unwrap();
///
/// assert_eq!(fit.fitted_values().len(), 5);
/// let forecast = fit.forecast(3).unwrap();
/// assert!(forecast.values().iter().all(|v| *v == forecast.values()[0]));
/// ```
#[derive(Debug, Clone)]
pub struct ExponentialSmoother {
    /// Fixed smoothing parameter; `None` means optimize.
    alpha: Option<f64>,
    optimizer: OptimizerConfig,
}

impl ExponentialSmoother {
    /// Create a smoother with a fixed alpha, clamped into (0, 1).
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha: Some(clamp_weight(alpha)),
            optimizer: OptimizerConfig::default(),
        }
    }

    /// Create a smoother whose alpha minimizes the in-sample SSE.
    pub fn auto() -> Self {
        Self {
            alpha: None,
            optimizer: OptimizerConfig::default(),
        }
    }

    /// Override the optimizer settings used by [`ExponentialSmoother::auto`].
    pub fn with_optimizer(mut self, optimizer: OptimizerConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    /// The fixed alpha, if any.
    pub fn alpha(&self) -> Option<f64> {
        self.alpha
    }

    fn optimize_alpha(&self, values: &[f64]) -> Result<f64> {
        let (lower, upper) = PARAM_BOUNDS;
        let optimum = golden_section(
            |alpha| Variant::Level.sse(values, Weights::level(alpha)),
            lower,
            upper,
            &self.optimizer,
        )?;
        let alpha = clamp_weight(optimum.point[0]);
        warn_on_bounds(&[("alpha", alpha)]);
        debug!(
            alpha,
            sse = optimum.value,
            iterations = optimum.iterations,
            "optimized SES alpha"
        );
        Ok(alpha)
    }
}

impl Default for ExponentialSmoother {
    fn default() -> Self {
        Self::auto()
    }
}

impl Smoother for ExponentialSmoother {
    #[tracing::instrument(name = "fit_simple", skip_all, fields(n = series.len()))]
    fn fit(&self, series: &Series) -> Result<FitResult> {
        let values = series.values();
        Variant::Level.check(values.len())?;

        let alpha = match self.alpha {
            Some(alpha) => alpha,
            None => self.optimize_alpha(values)?,
        };

        Variant::Level.fit(values, Weights::level(alpha), SmoothingParameters::simple(alpha))
    }

    fn method(&self) -> Method {
        Method::Simple
    }

    fn min_observations(&self) -> usize {
        Variant::Level.min_observations()
    }
}
