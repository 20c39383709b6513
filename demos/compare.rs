//! Classify a monthly series, fit all three smoothers and forecast a year ahead.
//!
//! Run with `cargo run --example compare`; set `RUST_LOG=decomp_forecast=debug`
//! to see the optimizer and voting events.

use decomp_forecast::classification::compare_residual_variance;
use decomp_forecast::prelude::*;
use tracing_subscriber::EnvFilter;

/// Monthly airline passengers, 1949-1951.
const PASSENGERS: [f64; 36] = [
    112.0, 118.0, 132.0, 129.0, 121.0, 135.0, 148.0, 148.0, 136.0, 119.0, 104.0, 118.0, 115.0,
    126.0, 141.0, 135.0, 125.0, 149.0, 170.0, 170.0, 158.0, 133.0, 114.0, 140.0, 145.0, 150.0,
    178.0, 163.0, 172.0, 178.0, 199.0, 199.0, 184.0, 162.0, 146.0, 166.0,
];

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("decomp_forecast=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    init_logging();

    let classification = classify(&PASSENGERS, 4)?;
    println!(
        "Recommendation: {} (confidence {:.2})",
        classification.recommendation, classification.confidence
    );
    for criterion in &classification.criteria {
        println!(
            "  {:<26} {:>8.3}  threshold {:>5.1}  -> {}",
            criterion.name, criterion.value, criterion.threshold, criterion.verdict
        );
    }

    let residuals = compare_residual_variance(&PASSENGERS, 12)?;
    println!(
        "Residual variance: additive {:.4}, multiplicative {:.6} -> {}",
        residuals.additive, residuals.multiplicative, residuals.recommendation
    );

    let series = Series::try_from(&PASSENGERS[..])?;
    let smoothers: Vec<BoxedSmoother> = vec![
        Box::new(ExponentialSmoother::auto()),
        Box::new(HoltSmoother::auto()),
        Box::new(
            WintersSmoother::auto(12).with_seasonal_type(classification.recommendation),
        ),
    ];
    println!("\n{:<8} {:>10} {:>10} {:>8}", "method", "rmse", "mae", "mape");
    for smoother in &smoothers {
        let fit = smoother.fit(&series)?;
        let m = fit.metrics();
        println!(
            "{:<8} {:>10.3} {:>10.3} {:>7.2}%",
            smoother.name(),
            m.rmse,
            m.mae,
            m.mape.unwrap_or(f64::NAN)
        );
    }

    let comparison = compare(&PASSENGERS, 12)?;
    let best = comparison.best();
    let forecast = best.forecast_with_intervals(12, 0.95)?;
    println!("\nBest: {} ({:?})", comparison.best_method, best.parameters());
    if let (Some(lower), Some(upper)) = (forecast.lower(), forecast.upper()) {
        for (h, ((v, l), u)) in forecast.values().iter().zip(lower).zip(upper).enumerate() {
            println!("  h={:>2}  {:>8.2}  [{:>8.2}, {:>8.2}]", h + 1, v, l, u);
        }
    }

    Ok(())
}
