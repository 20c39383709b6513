//! One recursive update routine shared by all three smoothers.
//!
//! Each smoother is a [`Variant`] of the same state machine: the level-only
//! variant ignores trend and season, the level+trend variant ignores season.
//! Fitted values are always one-step-ahead: the forecast of observation `t`
//! uses state through `t - 1`.

use crate::core::DecompositionType;
use crate::error::{ForecastError, Result};
use crate::models::fit::{
    FitResult, Method, SeasonalComponent, SmoothingParameters, SmoothingState, SmoothingStep,
};
use crate::utils::calculate_metrics;

/// Admissible range for every smoothing weight.
pub(crate) const PARAM_BOUNDS: (f64, f64) = (0.0001, 0.9999);

/// Clamp a user-supplied weight into [`PARAM_BOUNDS`].
pub(crate) fn clamp_weight(value: f64) -> f64 {
    value.clamp(PARAM_BOUNDS.0, PARAM_BOUNDS.1)
}

/// Log a warning for every optimized weight that ended on a bound.
pub(crate) fn warn_on_bounds(weights: &[(&str, f64)]) {
    for (name, value) in weights {
        if (value - PARAM_BOUNDS.0).abs() < 1e-6 || (value - PARAM_BOUNDS.1).abs() < 1e-6 {
            tracing::warn!(parameter = *name, value = *value, "optimizer stopped on the boundary");
        }
    }
}

/// Smoothing weights; unused ones are ignored by the variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Weights {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl Weights {
    pub fn level(alpha: f64) -> Self {
        Self {
            alpha,
            beta: 0.0,
            gamma: 0.0,
        }
    }

    pub fn trend(alpha: f64, beta: f64) -> Self {
        Self {
            alpha,
            beta,
            gamma: 0.0,
        }
    }

    pub fn seasonal(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { alpha, beta, gamma }
    }
}

/// Structural shape of the smoother.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Variant {
    Level,
    LevelTrend,
    Seasonal {
        period: usize,
        seasonal_type: DecompositionType,
    },
}

impl Variant {
    pub fn method(&self) -> Method {
        match self {
            Variant::Level => Method::Simple,
            Variant::LevelTrend => Method::Holt,
            Variant::Seasonal { .. } => Method::Winters,
        }
    }

    /// Number of leading observations consumed by seeding.
    pub fn offset(&self) -> usize {
        match self {
            Variant::Level | Variant::LevelTrend => 1,
            Variant::Seasonal { period, .. } => *period,
        }
    }

    /// Smallest series the variant can be fitted on.
    pub fn min_observations(&self) -> usize {
        match self {
            Variant::Level | Variant::LevelTrend => 2,
            Variant::Seasonal { period, .. } => 2 * period,
        }
    }

    /// Check the series length (and period) before any work is done.
    pub fn check(&self, n: usize) -> Result<()> {
        if let Variant::Seasonal { period, .. } = self {
            if *period < 2 {
                return Err(ForecastError::InvalidConfiguration(format!(
                    "seasonal period must be at least 2, got {period}"
                )));
            }
        }
        let needed = self.min_observations();
        if n < needed {
            return Err(ForecastError::InsufficientData { needed, got: n });
        }
        Ok(())
    }

    /// Initial state built from the leading observations.
    ///
    /// - Level: `level = y[0]`.
    /// - LevelTrend: `level = y[0]`, `trend = y[1] - y[0]`.
    /// - Seasonal: `level = mean(y[..s])`, `trend = 0`, indices `y[i] / level`
    ///   (multiplicative) or `y[i] - level` (additive).
    pub fn seed(&self, values: &[f64]) -> Result<SmoothingState> {
        self.check(values.len())?;
        let state = match *self {
            Variant::Level => SmoothingState {
                level: values[0],
                trend: None,
                seasonal: None,
            },
            Variant::LevelTrend => SmoothingState {
                level: values[0],
                trend: Some(values[1] - values[0]),
                seasonal: None,
            },
            Variant::Seasonal {
                period,
                seasonal_type,
            } => {
                let first_cycle = &values[..period];
                let level = first_cycle.iter().sum::<f64>() / period as f64;
                let indices = match seasonal_type {
                    DecompositionType::Multiplicative => {
                        if level.abs() < 1e-10 {
                            return Err(ForecastError::ComputationError(
                                "multiplicative seasonality needs a non-zero initial level"
                                    .to_string(),
                            ));
                        }
                        let indices: Vec<f64> = first_cycle.iter().map(|y| y / level).collect();
                        if let Some(slot) = indices.iter().position(|i| i.abs() < 1e-10) {
                            return Err(ForecastError::ComputationError(format!(
                                "multiplicative seasonal index at position {slot} is zero"
                            )));
                        }
                        indices
                    }
                    DecompositionType::Additive => {
                        first_cycle.iter().map(|y| y - level).collect()
                    }
                };
                SmoothingState {
                    level,
                    trend: Some(0.0),
                    seasonal: Some(SeasonalComponent {
                        seasonal_type,
                        indices,
                    }),
                }
            }
        };
        Ok(state)
    }

    /// Run the recursion over `values`, calling `observe` with every
    /// post-update step. Returns the final state.
    pub fn run<F>(&self, values: &[f64], weights: Weights, mut observe: F) -> Result<SmoothingState>
    where
        F: FnMut(SmoothingStep),
    {
        let mut state = self.seed(values)?;
        for (t, &y) in values.iter().enumerate().skip(self.offset()) {
            let forecast = state.project(t, 1);
            state.update(t, y, weights);
            observe(SmoothingStep {
                index: t,
                actual: y,
                forecast,
                error: y - forecast,
                level: state.level,
                trend: state.trend,
                seasonal: state.seasonal_at(t),
            });
        }
        Ok(state)
    }

    /// Sum of squared one-step errors; `f64::MAX` when the recursion fails or
    /// diverges so optimizers steer away from such weights.
    pub fn sse(&self, values: &[f64], weights: Weights) -> f64 {
        let mut sse = 0.0;
        match self.run(values, weights, |step| sse += step.error * step.error) {
            Ok(state) if sse.is_finite() && state.is_finite() => sse,
            _ => f64::MAX,
        }
    }

    /// Full fit at the given weights.
    pub fn fit(
        &self,
        values: &[f64],
        weights: Weights,
        parameters: SmoothingParameters,
    ) -> Result<FitResult> {
        let capacity = values.len().saturating_sub(self.offset());
        let mut steps = Vec::with_capacity(capacity);
        let state = self.run(values, weights, |step| steps.push(step))?;

        if let Some(bad) = steps.iter().find(|s| !s.forecast.is_finite()) {
            return Err(ForecastError::ComputationError(format!(
                "fitted value at index {} is not finite",
                bad.index
            )));
        }
        if !state.is_finite() {
            return Err(ForecastError::ComputationError(
                "final smoothing state is not finite".to_string(),
            ));
        }

        let actual: Vec<f64> = steps.iter().map(|s| s.actual).collect();
        let fitted: Vec<f64> = steps.iter().map(|s| s.forecast).collect();
        let residuals: Vec<f64> = steps.iter().map(|s| s.error).collect();
        let metrics = calculate_metrics(&actual, &fitted)?;

        Ok(FitResult::new(
            self.method(),
            parameters,
            fitted,
            residuals,
            metrics,
            values.len(),
            state,
            steps,
        ))
    }
}

impl SmoothingState {
    /// Forecast `h` steps past the last of `seen` observations.
    pub(crate) fn project(&self, seen: usize, h: usize) -> f64 {
        let base = self.level + self.trend.map_or(0.0, |b| h as f64 * b);
        match &self.seasonal {
            Some(season) => {
                let index = season.indices[(seen + h - 1) % season.indices.len()];
                match season.seasonal_type {
                    DecompositionType::Multiplicative => base * index,
                    DecompositionType::Additive => base + index,
                }
            }
            None => base,
        }
    }

    /// Absorb observation `y` at position `t`.
    pub(crate) fn update(&mut self, t: usize, y: f64, w: Weights) {
        let prev_level = self.level;
        let prev_trend = self.trend.unwrap_or(0.0);

        let (deseasonalized, slot) = match &self.seasonal {
            Some(season) => {
                let slot = t % season.indices.len();
                let index = season.indices[slot];
                let adjusted = match season.seasonal_type {
                    DecompositionType::Multiplicative => y / index,
                    DecompositionType::Additive => y - index,
                };
                (adjusted, Some(slot))
            }
            None => (y, None),
        };

        self.level = w.alpha * deseasonalized + (1.0 - w.alpha) * (prev_level + prev_trend);

        if let Some(trend) = self.trend.as_mut() {
            *trend = w.beta * (self.level - prev_level) + (1.0 - w.beta) * prev_trend;
        }

        if let (Some(season), Some(slot)) = (self.seasonal.as_mut(), slot) {
            let old = season.indices[slot];
            let observed = match season.seasonal_type {
                DecompositionType::Multiplicative => y / self.level,
                DecompositionType::Additive => y - self.level,
            };
            season.indices[slot] = w.gamma * observed + (1.0 - w.gamma) * old;
        }
    }

    fn is_finite(&self) -> bool {
        self.level.is_finite()
            && self.trend.map_or(true, f64::is_finite)
            && self
                .seasonal
                .as_ref()
                .map_or(true, |season| season.indices.iter().all(|i| i.is_finite()))
    }

    fn seasonal_at(&self, t: usize) -> Option<f64> {
        self.seasonal
            .as_ref()
            .map(|season| season.indices[t % season.indices.len()])
    }
}
