//! Deciding between additive and multiplicative structure.

mod classifier;
mod decomposition;
mod segments;

pub use classifier::{
    classify, ClassificationCriterion, ClassificationResult, ClassifierConfig, CriterionKind,
    ModelClassifier,
};
pub use decomposition::{
    compare_residual_variance, decompose, Decomposition, ResidualVarianceComparison,
};
pub use segments::{partition, Segment};
