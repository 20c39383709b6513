//! # decomp-forecast
//!
//! Decide whether a numeric series is better described by an additive or a
//! multiplicative model, then fit and compare exponential smoothers.
//!
//! - [`classification`]: segment statistics, a three-criterion majority-vote
//!   classifier and classical moving-average decomposition.
//! - [`models`]: simple exponential smoothing, Holt's linear trend and
//!   Holt-Winters, sharing one recursion, plus a comparative runner that
//!   ranks them by RMSE.
//! - [`utils`]: descriptive statistics, accuracy metrics and the bounded
//!   optimizers used to fit smoothing weights.
//!
//! ```
//! use decomp_forecast::prelude::*;
//!
//! let values: Vec<f64> = (0..24)
//!     .map(|i| (50.0 + 2.0 * i as f64) * [0.9, 1.1, 1.2, 0.8][i % 4])
//!     .collect();
//!
//! let classification = classify(&values, 4).unwrap();
//! let comparison = compare(&values, 4).unwrap();
//! let forecast = comparison.best().forecast(4).unwrap();
//!
//! assert!(classification.confidence >= 2.0 / 3.0);
//! assert_eq!(forecast.horizon(), 4);
//! ```

pub mod classification;
pub mod core;
pub mod error;
pub mod models;
pub mod utils;

pub use classification::{classify, ClassificationResult, ModelClassifier};
pub use error::{ForecastError, Result};
pub use models::{compare, fit_holt, fit_simple, fit_winters, ComparisonResult, FitResult};

pub mod prelude {
    pub use crate::classification::{
        classify, ClassificationResult, ClassifierConfig, ModelClassifier,
    };
    pub use crate::core::{DecompositionType, Forecast, Series};
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::{
        compare, fit_holt, fit_simple, fit_winters, BoxedSmoother, ComparativeRunner,
        ComparisonResult, ExponentialSmoother, FitResult, HoltSmoother, Method, Smoother,
        WintersSmoother,
    };
    pub use crate::utils::{calculate_metrics, AccuracyMetrics};
}
