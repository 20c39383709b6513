//! Error types for the decomp-forecast library.

use thiserror::Error;

/// Result type alias for analysis and forecasting operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur during classification, fitting or forecasting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// The series is too short for the requested configuration.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// A configuration value is out of range (segments, seasonal period, horizon, ...).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A parameter search exhausted its iteration budget without meeting its tolerance.
    #[error("optimizer did not converge within {iterations} iterations")]
    Convergence { iterations: usize },

    /// Paired sequences have different lengths.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// NaN or infinite value in the input series.
    #[error("non-finite value at index {index}")]
    NonFiniteInput { index: usize },

    /// Numerical failure while running a model.
    #[error("computation error: {0}")]
    ComputationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = ForecastError::EmptyData;
        assert_eq!(err.to_string(), "empty input data");

        let err = ForecastError::InsufficientData { needed: 24, got: 10 };
        assert_eq!(
            err.to_string(),
            "insufficient data: need at least 24, got 10"
        );

        let err = ForecastError::InvalidConfiguration("horizon must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "invalid configuration: horizon must be at least 1"
        );

        let err = ForecastError::Convergence { iterations: 500 };
        assert_eq!(
            err.to_string(),
            "optimizer did not converge within 500 iterations"
        );

        let err = ForecastError::NonFiniteInput { index: 3 };
        assert_eq!(err.to_string(), "non-finite value at index 3");
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = ForecastError::DimensionMismatch {
            expected: 3,
            got: 2,
        };
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<ForecastError>();
    }
}
