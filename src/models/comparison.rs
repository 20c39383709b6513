//! Fit the three smoothers on the same series and pick the most accurate.

use serde::Serialize;
use tracing::{debug, info};

use crate::core::{DecompositionType, Series};
use crate::error::Result;
use crate::models::exponential::{
    default_seasonal_period, ExponentialSmoother, HoltSmoother, WintersSmoother,
};
use crate::models::fit::{FitResult, Method};
use crate::models::Smoother;
use crate::utils::optimization::OptimizerConfig;

/// Outcome of fitting every smoother on one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub simple: FitResult,
    pub holt: FitResult,
    pub winters: FitResult,
    /// Method with the lowest RMSE; ties go to the earlier method.
    pub best_method: Method,
}

impl ComparisonResult {
    fn new(simple: FitResult, holt: FitResult, winters: FitResult) -> Self {
        let mut result = Self {
            simple,
            holt,
            winters,
            best_method: Method::Simple,
        };
        result.best_method = result
            .ranking()
            .first()
            .copied()
            .unwrap_or(Method::Simple);
        result
    }

    /// The fit produced by `method`.
    pub fn get(&self, method: Method) -> &FitResult {
        match method {
            Method::Simple => &self.simple,
            Method::Holt => &self.holt,
            Method::Winters => &self.winters,
        }
    }

    /// The fit of [`ComparisonResult::best_method`].
    pub fn best(&self) -> &FitResult {
        self.get(self.best_method)
    }

    /// Methods ordered by ascending RMSE; equal RMSE keeps precedence order.
    pub fn ranking(&self) -> Vec<Method> {
        let mut methods = Method::ALL.to_vec();
        // Stable sort keeps Simple before Holt before Winters on ties.
        methods.sort_by(|a, b| {
            self.get(*a)
                .metrics()
                .rmse
                .total_cmp(&self.get(*b).metrics().rmse)
        });
        methods
    }
}

/// Runs all three smoothers with shared settings.
///
/// # Example
/// ```
/// use decomp_forecast::models::{ComparativeRunner, Method};
///
/// let values: Vec<f64> = (0..16).map(|i| 10.0 + 2.0 * i as f64).collect();
/// let result = ComparativeRunner::new(4).run(&values).unwrap();
/// assert_eq!(result.best_method, Method::Holt);
/// ```
#[derive(Debug, Clone)]
pub struct ComparativeRunner {
    seasonal_period: usize,
    seasonal_type: DecompositionType,
    optimizer: OptimizerConfig,
}

impl ComparativeRunner {
    /// Multiplicative Winters with the given period, default optimizer.
    pub fn new(seasonal_period: usize) -> Self {
        Self {
            seasonal_period,
            seasonal_type: DecompositionType::Multiplicative,
            optimizer: OptimizerConfig::default(),
        }
    }

    /// Period chosen from the series length, see [`default_seasonal_period`].
    pub fn for_length(n: usize) -> Self {
        Self::new(default_seasonal_period(n))
    }

    pub fn with_seasonal_type(mut self, seasonal_type: DecompositionType) -> Self {
        self.seasonal_type = seasonal_type;
        self
    }

    pub fn with_optimizer(mut self, optimizer: OptimizerConfig) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn seasonal_period(&self) -> usize {
        self.seasonal_period
    }

    /// Validate `values` and compare.
    pub fn run(&self, values: &[f64]) -> Result<ComparisonResult> {
        self.run_series(&Series::try_from(values)?)
    }

    /// Fit simple, Holt and Winters in that order. The first failure aborts
    /// the whole comparison.
    #[tracing::instrument(name = "compare", skip_all, fields(n = series.len(), period = self.seasonal_period))]
    pub fn run_series(&self, series: &Series) -> Result<ComparisonResult> {
        let simple = ExponentialSmoother::auto()
            .with_optimizer(self.optimizer.clone())
            .fit(series)?;
        let holt = HoltSmoother::auto()
            .with_optimizer(self.optimizer.clone())
            .fit(series)?;
        let winters = WintersSmoother::auto(self.seasonal_period)
            .with_seasonal_type(self.seasonal_type)
            .with_optimizer(self.optimizer.clone())
            .fit(series)?;

        for fit in [&simple, &holt, &winters] {
            debug!(method = %fit.method(), rmse = fit.metrics().rmse, "fitted");
        }

        let result = ComparisonResult::new(simple, holt, winters);
        info!(best = %result.best_method, rmse = result.best().metrics().rmse, "comparison complete");
        Ok(result)
    }
}

impl Default for ComparativeRunner {
    fn default() -> Self {
        Self::new(12)
    }
}

/// Compare the three smoothers with an explicit seasonal period.
pub fn compare(values: &[f64], seasonal_period: usize) -> Result<ComparisonResult> {
    ComparativeRunner::new(seasonal_period).run(values)
}

/// Compare with the period derived from the series length.
pub fn compare_auto(values: &[f64]) -> Result<ComparisonResult> {
    ComparativeRunner::for_length(values.len()).run(values)
}
