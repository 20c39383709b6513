//! Additive vs multiplicative classification by majority vote.
//!
//! Three independent criteria each vote for a decomposition type:
//!
//! 1. Correlation between segment means and segment variances. Variance that
//!    grows with the level points to a multiplicative structure.
//! 2. Coefficient of variation of the whole series.
//! 3. Mean relative change between consecutive observations.
//!
//! The majority verdict is the recommendation; its share of the three votes
//! is the confidence.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classification::segments::{partition, Segment};
use crate::core::{DecompositionType, Series};
use crate::error::{ForecastError, Result};
use crate::utils::stats::{
    lag_autocorrelations, pearson, trailing_moving_average, SeriesSummary,
};

/// Longest lag reported in [`ClassificationResult::autocorrelations`].
const MAX_REPORTED_LAGS: usize = 12;

/// Which of the three criteria produced a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKind {
    MeanVarianceCorrelation,
    CoefficientOfVariation,
    RelativeChange,
}

impl CriterionKind {
    pub fn name(&self) -> &'static str {
        match self {
            CriterionKind::MeanVarianceCorrelation => "mean-variance correlation",
            CriterionKind::CoefficientOfVariation => "coefficient of variation",
            CriterionKind::RelativeChange => "relative change",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            CriterionKind::MeanVarianceCorrelation => {
                "segment variance tracks segment mean when |r| reaches the threshold"
            }
            CriterionKind::CoefficientOfVariation => {
                "dispersion relative to the mean, in percent"
            }
            CriterionKind::RelativeChange => {
                "mean absolute step between consecutive values, in percent of the earlier value"
            }
        }
    }
}

/// A single criterion's measurement and vote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassificationCriterion {
    pub kind: CriterionKind,
    pub name: &'static str,
    /// Measured value (|r|, CV % or mean relative change %).
    pub value: f64,
    /// Threshold at or above which the criterion votes multiplicative.
    pub threshold: f64,
    pub verdict: DecompositionType,
    pub description: &'static str,
}

impl ClassificationCriterion {
    fn new(kind: CriterionKind, value: f64, threshold: f64, verdict: DecompositionType) -> Self {
        Self {
            kind,
            name: kind.name(),
            value,
            threshold,
            verdict,
            description: kind.description(),
        }
    }
}

/// Thresholds and segment count for [`ModelClassifier`].
///
/// # Example
///
/// ```
/// use decomp_forecast::classification::ClassifierConfig;
///
/// let config = ClassifierConfig::default()
///     .with_num_segments(6)
///     .with_cv_threshold(25.0);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Number of segments for the mean-variance criterion (default: 4).
    pub num_segments: usize,
    /// `|r|` at or above this votes multiplicative (default: 0.5).
    pub correlation_threshold: f64,
    /// CV (%) at or above this votes multiplicative (default: 20).
    pub cv_threshold: f64,
    /// Mean relative change (%) at or above this votes multiplicative (default: 15).
    pub relative_change_threshold: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            num_segments: 4,
            correlation_threshold: 0.5,
            cv_threshold: 20.0,
            relative_change_threshold: 15.0,
        }
    }
}

impl ClassifierConfig {
    pub fn with_num_segments(mut self, num_segments: usize) -> Self {
        self.num_segments = num_segments;
        self
    }

    pub fn with_correlation_threshold(mut self, threshold: f64) -> Self {
        self.correlation_threshold = threshold;
        self
    }

    pub fn with_cv_threshold(mut self, threshold: f64) -> Self {
        self.cv_threshold = threshold;
        self
    }

    pub fn with_relative_change_threshold(mut self, threshold: f64) -> Self {
        self.relative_change_threshold = threshold;
        self
    }

    /// Validates the thresholds.
    ///
    /// The segment count is checked against the series length when
    /// classifying.
    pub fn validate(&self) -> Result<()> {
        let thresholds = [
            ("correlation_threshold", self.correlation_threshold),
            ("cv_threshold", self.cv_threshold),
            ("relative_change_threshold", self.relative_change_threshold),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value <= 0.0 {
                return Err(ForecastError::InvalidConfiguration(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Outcome of a classification run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// Correlation, CV and relative change criteria, in that order.
    pub criteria: [ClassificationCriterion; 3],
    /// Pearson correlation between segment means and variances (signed).
    pub correlation: f64,
    pub recommendation: DecompositionType,
    /// Share of votes for the recommendation: 2/3 or 1.
    pub confidence: f64,
    pub summary: SeriesSummary,
    pub segments: Vec<Segment>,
    /// Mean of `|y[t] - y[t-1]|`.
    pub mean_absolute_change: f64,
    /// Mean of `|y[t] - y[t-1]| / |y[t-1]|` in percent, over non-zero `y[t-1]`.
    pub mean_relative_change: f64,
    /// Trailing moving average of the series.
    pub trend: Vec<f64>,
    /// Correlations with lags `1..=min(12, n - 1)`.
    pub autocorrelations: Vec<f64>,
}

impl ClassificationResult {
    /// Number of criteria that voted for `kind`.
    pub fn votes_for(&self, kind: DecompositionType) -> usize {
        self.criteria.iter().filter(|c| c.verdict == kind).count()
    }
}

/// Classifies a series as additive or multiplicative.
#[derive(Debug, Clone, Default)]
pub struct ModelClassifier {
    config: ClassifierConfig,
}

impl ModelClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Validate `values` and classify.
    pub fn classify(&self, values: &[f64]) -> Result<ClassificationResult> {
        self.classify_series(&Series::try_from(values)?)
    }

    /// Run the three criteria and take the majority vote.
    #[tracing::instrument(
        name = "classify",
        skip_all,
        fields(n = series.len(), segments = self.config.num_segments)
    )]
    pub fn classify_series(&self, series: &Series) -> Result<ClassificationResult> {
        self.config.validate()?;
        let values = series.values();
        let segments = partition(values, self.config.num_segments)?;
        let summary = series.summary();

        let means: Vec<f64> = segments.iter().map(|s| s.mean).collect();
        let variances: Vec<f64> = segments.iter().map(|s| s.variance).collect();
        let correlation = pearson(&means, &variances)?;

        let (mean_absolute_change, mean_relative_change) = mean_changes(values);

        let vote = |measured: f64, threshold: f64| {
            if measured < threshold {
                DecompositionType::Additive
            } else {
                DecompositionType::Multiplicative
            }
        };
        // An undefined CV (zero mean) votes additive.
        let cv_verdict = if summary.cv.is_nan() {
            DecompositionType::Additive
        } else {
            vote(summary.cv, self.config.cv_threshold)
        };

        let criteria = [
            ClassificationCriterion::new(
                CriterionKind::MeanVarianceCorrelation,
                correlation.abs(),
                self.config.correlation_threshold,
                vote(correlation.abs(), self.config.correlation_threshold),
            ),
            ClassificationCriterion::new(
                CriterionKind::CoefficientOfVariation,
                summary.cv,
                self.config.cv_threshold,
                cv_verdict,
            ),
            ClassificationCriterion::new(
                CriterionKind::RelativeChange,
                mean_relative_change,
                self.config.relative_change_threshold,
                vote(mean_relative_change, self.config.relative_change_threshold),
            ),
        ];

        let multiplicative = criteria
            .iter()
            .filter(|c| c.verdict == DecompositionType::Multiplicative)
            .count();
        let additive = criteria.len() - multiplicative;
        let recommendation = if multiplicative > additive {
            DecompositionType::Multiplicative
        } else {
            DecompositionType::Additive
        };
        let confidence = additive.max(multiplicative) as f64 / criteria.len() as f64;

        debug!(
            correlation,
            cv = summary.cv,
            relative_change = mean_relative_change,
            additive,
            multiplicative,
            %recommendation,
            "classification votes"
        );

        let window = (values.len() / 8).clamp(1, 4);
        let trend = trailing_moving_average(values, window)?;
        let autocorrelations = lag_autocorrelations(values, MAX_REPORTED_LAGS)?;

        Ok(ClassificationResult {
            criteria,
            correlation,
            recommendation,
            confidence,
            summary,
            segments,
            mean_absolute_change,
            mean_relative_change,
            trend,
            autocorrelations,
        })
    }
}

/// Classify with default thresholds and `num_segments` segments.
///
/// # Example
/// ```
/// use decomp_forecast::classification::classify;
/// use decomp_forecast::core::DecompositionType;
///
/// let result = classify(&[10.0, 10.5, 9.8, 10.2, 10.1, 9.9, 10.3, 10.0], 4).unwrap();
/// assert_eq!(result.recommendation, DecompositionType::Additive);
/// ```
pub fn classify(values: &[f64], num_segments: usize) -> Result<ClassificationResult> {
    ModelClassifier::new(ClassifierConfig::default().with_num_segments(num_segments))
        .classify(values)
}

/// Mean absolute change and mean relative change (%) between neighbours.
///
/// Pairs whose earlier value is zero are left out of the relative mean; with
/// no usable pair it is zero.
fn mean_changes(values: &[f64]) -> (f64, f64) {
    let mut abs_sum = 0.0;
    let mut rel_sum = 0.0;
    let mut rel_count = 0usize;
    for pair in values.windows(2) {
        let step = (pair[1] - pair[0]).abs();
        abs_sum += step;
        if pair[0] != 0.0 {
            rel_sum += step / pair[0].abs() * 100.0;
            rel_count += 1;
        }
    }
    let pairs = values.len().saturating_sub(1);
    let mean_abs = if pairs > 0 { abs_sum / pairs as f64 } else { 0.0 };
    let mean_rel = if rel_count > 0 {
        rel_sum / rel_count as f64
    } else {
        0.0
    };
    (mean_abs, mean_rel)
}
