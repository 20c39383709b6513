//! Numeric helpers: descriptive statistics, accuracy metrics and optimizers.

pub mod metrics;
pub mod optimization;
pub mod stats;

pub use metrics::{calculate_metrics, AccuracyMetrics};
pub use optimization::{golden_section, nelder_mead, OptimizerConfig, Optimum};
pub use stats::{pearson, summarize, SeriesSummary};
