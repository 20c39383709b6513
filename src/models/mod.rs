//! Exponential smoothing models and the comparative runner.

mod comparison;
mod fit;
mod traits;

pub mod exponential;

pub use comparison::{compare, compare_auto, ComparativeRunner, ComparisonResult};
pub use exponential::{default_seasonal_period, ExponentialSmoother, HoltSmoother, WintersSmoother};
pub use fit::{
    FitResult, Method, SeasonalComponent, SmoothingParameters, SmoothingState, SmoothingStep,
};
pub use traits::{BoxedSmoother, Smoother};

use crate::core::Series;
use crate::error::Result;

/// Fit simple exponential smoothing with an optimized alpha.
pub fn fit_simple(values: &[f64]) -> Result<FitResult> {
    ExponentialSmoother::auto().fit(&Series::try_from(values)?)
}

/// Fit Holt's linear trend with optimized weights.
pub fn fit_holt(values: &[f64]) -> Result<FitResult> {
    HoltSmoother::auto().fit(&Series::try_from(values)?)
}

/// Fit multiplicative Holt-Winters with optimized weights.
pub fn fit_winters(values: &[f64], seasonal_period: usize) -> Result<FitResult> {
    WintersSmoother::auto(seasonal_period).fit(&Series::try_from(values)?)
}
