//! Smoother trait defining the common interface for the smoothing family.

use crate::core::Series;
use crate::error::Result;
use crate::models::fit::{FitResult, Method};

/// Common interface for all smoothers.
///
/// Fitting is pure: the smoother is a configuration, and every call returns a
/// fresh [`FitResult`] that owns the fitted state. This trait is object-safe
/// and can be used with `Box<dyn Smoother>`.
pub trait Smoother {
    /// Fit the smoother to a series.
    fn fit(&self, series: &Series) -> Result<FitResult>;

    /// Which member of the family this is.
    fn method(&self) -> Method;

    /// Smallest series length this configuration accepts.
    fn min_observations(&self) -> usize;

    /// Get the model name.
    fn name(&self) -> &str {
        self.method().name()
    }

    /// Convenience: fit directly on a slice.
    fn fit_values(&self, values: &[f64]) -> Result<FitResult> {
        self.fit(&Series::try_from(values)?)
    }
}

/// Type alias for boxed smoother trait objects.
///
/// # Example
///
/// ```
/// use decomp_forecast::models::{BoxedSmoother, ExponentialSmoother, HoltSmoother};
///
/// let smoothers: Vec<BoxedSmoother> = vec![
///     Box::new(ExponentialSmoother::auto()),
///     Box::new(HoltSmoother::auto()),
/// ];
/// let names: Vec<&str> = smoothers.iter().map(|s| s.name()).collect();
/// assert_eq!(names, ["simple", "holt"]);
/// ```
pub type BoxedSmoother = Box<dyn Smoother + Send + Sync>;
