//! Property-based tests for classification and smoothing.
//!
//! These tests verify invariants that should hold for all valid inputs,
//! using randomly generated series.

use decomp_forecast::classification::{classify, partition};
use decomp_forecast::core::{DecompositionType, Series};
use decomp_forecast::error::ForecastError;
use decomp_forecast::models::{
    compare, ExponentialSmoother, HoltSmoother, Method, Smoother, WintersSmoother,
};
use decomp_forecast::utils::calculate_metrics;
use proptest::prelude::*;

fn make_series(values: &[f64]) -> Series {
    Series::try_from(values).unwrap()
}

/// Strategy for generating valid positive series values.
/// Adds a small ramp so no series is exactly constant.
fn valid_values_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (min_len..max_len).prop_flat_map(|len| {
        prop::collection::vec(1.0..1000.0_f64, len).prop_map(|mut v| {
            for (i, val) in v.iter_mut().enumerate() {
                *val += (i as f64) * 0.001;
            }
            v
        })
    })
}

/// Strategy for generating exact straight lines.
fn trending_values_strategy(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    (min_len..max_len).prop_flat_map(|len| {
        (0.0..100.0_f64, -2.0..2.0_f64)
            .prop_map(move |(base, slope)| (0..len).map(|i| base + slope * i as f64).collect())
    })
}

/// Strategy for generating positive seasonal series.
fn seasonal_values_strategy(
    min_len: usize,
    max_len: usize,
    period: usize,
) -> impl Strategy<Value = Vec<f64>> {
    (min_len..max_len).prop_flat_map(move |len| {
        (50.0..100.0_f64, 5.0..20.0_f64).prop_map(move |(base, amplitude)| {
            (0..len)
                .map(|i| {
                    base + amplitude * (2.0 * std::f64::consts::PI * i as f64 / period as f64).sin()
                })
                .collect()
        })
    })
}

// ==================== Segments and classification ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn partition_covers_series_exactly_once(
        k in 2usize..8,
        extra in 0usize..50,
    ) {
        let n = 2 * k + extra;
        let values: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let segments = partition(&values, k).unwrap();

        prop_assert_eq!(segments.len(), k);
        prop_assert_eq!(segments[0].start, 0);
        prop_assert_eq!(segments[k - 1].end, n);
        for pair in segments.windows(2) {
            prop_assert_eq!(pair[0].end, pair[1].start);
        }
        for s in &segments[..k - 1] {
            prop_assert_eq!(s.size, n / k);
        }
        prop_assert_eq!(segments.iter().map(|s| s.size).sum::<usize>(), n);
    }

    #[test]
    fn recommendation_is_majority_vote(values in valid_values_strategy(8, 80)) {
        let result = classify(&values, 4).unwrap();
        let votes = result.votes_for(result.recommendation);

        prop_assert!(votes >= 2);
        prop_assert_eq!(result.confidence, votes as f64 / 3.0);
        prop_assert!(result.confidence >= 0.5 && result.confidence <= 1.0);

        let other = match result.recommendation {
            DecompositionType::Additive => DecompositionType::Multiplicative,
            DecompositionType::Multiplicative => DecompositionType::Additive,
        };
        prop_assert_eq!(result.votes_for(other), 3 - votes);
    }
}

// ==================== Metrics ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn rmse_is_sqrt_of_mse(
        pairs in prop::collection::vec((-1000.0..1000.0_f64, -1000.0..1000.0_f64), 1..60)
    ) {
        let (actual, fitted): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let metrics = calculate_metrics(&actual, &fitted).unwrap();
        prop_assert_eq!(metrics.rmse, metrics.mse.sqrt());
        prop_assert!(metrics.mae <= metrics.rmse + 1e-9);
    }
}

// ==================== Forecast length ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn ses_forecast_length_matches_horizon(
        values in valid_values_strategy(2, 60),
        horizon in 1usize..30,
    ) {
        let fit = ExponentialSmoother::auto().fit(&make_series(&values)).unwrap();
        let forecast = fit.forecast(horizon).unwrap();
        prop_assert_eq!(forecast.horizon(), horizon);
        prop_assert_eq!(fit.fitted_values().len(), values.len() - 1);
    }

    #[test]
    fn holt_forecast_length_matches_horizon(
        values in valid_values_strategy(2, 60),
        alpha in 0.01..0.99_f64,
        beta in 0.01..0.99_f64,
        horizon in 1usize..30,
    ) {
        let fit = HoltSmoother::new(alpha, beta).fit(&make_series(&values)).unwrap();
        let forecast = fit.forecast(horizon).unwrap();
        prop_assert_eq!(forecast.horizon(), horizon);
        for v in forecast.values() {
            prop_assert!(v.is_finite());
        }
    }

    #[test]
    fn winters_forecast_length_matches_horizon(
        values in seasonal_values_strategy(24, 60, 12),
        horizon in 1usize..30,
    ) {
        let fit = WintersSmoother::new(0.3, 0.1, 0.1, 12)
            .fit(&make_series(&values))
            .unwrap();
        prop_assert_eq!(fit.offset(), 12);
        prop_assert_eq!(fit.fitted_values().len(), values.len() - 12);
        prop_assert_eq!(fit.forecast(horizon).unwrap().horizon(), horizon);
    }
}

// ==================== Model behavior ====================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn holt_is_exact_on_lines(
        values in trending_values_strategy(2, 50),
        alpha in 0.01..0.99_f64,
        beta in 0.01..0.99_f64,
    ) {
        let fit = HoltSmoother::new(alpha, beta).fit(&make_series(&values)).unwrap();
        prop_assert!(fit.metrics().rmse < 1e-8, "rmse = {}", fit.metrics().rmse);
    }

    #[test]
    fn ses_intervals_ordered_and_widening(
        values in valid_values_strategy(5, 50),
        alpha in 0.01..0.99_f64,
    ) {
        let fit = ExponentialSmoother::new(alpha).fit(&make_series(&values)).unwrap();
        let forecast = fit.forecast_with_intervals(8, 0.9).unwrap();
        let lower = forecast.lower().unwrap();
        let upper = forecast.upper().unwrap();

        for ((l, v), u) in lower.iter().zip(forecast.values()).zip(upper) {
            prop_assert!(l <= v && v <= u);
        }
        for h in 1..8 {
            prop_assert!(upper[h] - lower[h] >= upper[h - 1] - lower[h - 1]);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn best_method_has_minimum_rmse(values in valid_values_strategy(16, 40)) {
        match compare(&values, 4) {
            Ok(result) => {
                let best = result.best().metrics().rmse;
                for method in Method::ALL {
                    let rmse = result.get(method).metrics().rmse;
                    prop_assert!(best <= rmse);
                    if rmse == best {
                        // Ties resolve to the earliest method.
                        prop_assert!(result.best_method <= method);
                    }
                }
            }
            // A stalled simplex is reported, never silently ranked.
            Err(ForecastError::Convergence { .. }) => {}
            Err(e) => prop_assert!(false, "unexpected error: {e}"),
        }
    }

    #[test]
    fn non_finite_values_are_rejected(
        values in valid_values_strategy(2, 30),
        position in 0usize..30,
    ) {
        let mut values = values;
        let index = position % values.len();
        values[index] = f64::NAN;
        prop_assert_eq!(
            Series::new(values).unwrap_err(),
            ForecastError::NonFiniteInput { index }
        );
    }
}
