//! Deterministic bounded optimizers used to fit smoothing parameters.
//!
//! Both optimizers fail with [`ForecastError::Convergence`] when the iteration
//! budget runs out before the tolerance is met; they never hand back a point
//! that did not satisfy the stopping rule.

use serde::Deserialize;
use tracing::debug;

use crate::error::{ForecastError, Result};

/// Result of a successful minimization.
#[derive(Debug, Clone, PartialEq)]
pub struct Optimum {
    /// The minimizing point.
    pub point: Vec<f64>,
    /// Objective value at `point`.
    pub value: f64,
    /// Number of iterations performed.
    pub iterations: usize,
}

/// Configuration shared by the optimizers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimizerConfig {
    /// Iteration budget.
    pub max_iter: usize,
    /// Convergence tolerance: bracket width for golden-section search, relative
    /// objective spread and simplex diameter for Nelder-Mead.
    pub tolerance: f64,
    /// Reflection coefficient (default: 1.0).
    pub reflection: f64,
    /// Expansion coefficient (default: 2.0).
    pub expansion: f64,
    /// Contraction coefficient (default: 0.5).
    pub contraction: f64,
    /// Shrink coefficient (default: 0.5).
    pub shrink: f64,
    /// Initial simplex step, relative to the starting coordinate (default: 0.05).
    pub initial_step: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_iter: 2000,
            tolerance: 1e-8,
            reflection: 1.0,
            expansion: 2.0,
            contraction: 0.5,
            shrink: 0.5,
            initial_step: 0.05,
        }
    }
}

impl OptimizerConfig {
    /// Sets the iteration budget.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_iter == 0 {
            return Err(ForecastError::InvalidConfiguration(
                "optimizer max_iter must be at least 1".to_string(),
            ));
        }
        let positive = [
            ("tolerance", self.tolerance),
            ("reflection", self.reflection),
            ("expansion", self.expansion),
            ("initial_step", self.initial_step),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ForecastError::InvalidConfiguration(format!(
                    "optimizer {name} must be finite and positive, got {value}"
                )));
            }
        }
        for (name, value) in [("contraction", self.contraction), ("shrink", self.shrink)] {
            if value.is_nan() || value <= 0.0 || value >= 1.0 {
                return Err(ForecastError::InvalidConfiguration(format!(
                    "optimizer {name} must lie in (0, 1), got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Minimize a unimodal function of one variable on `[lower, upper]` by golden-section search.
///
/// Both end points are also evaluated once the bracket has shrunk below the
/// tolerance, so minima sitting on a bound are found exactly.
///
/// # Example
/// ```
/// use decomp_forecast::utils::optimization::{golden_section, OptimizerConfig};
///
/// let opt = golden_section(|x| (x - 0.3).powi(2), 0.0, 1.0, &OptimizerConfig::default()).unwrap();
/// assert!((opt.point[0] - 0.3).abs() < 1e-6);
/// ```
pub fn golden_section<F>(objective: F, lower: f64, upper: f64, config: &OptimizerConfig) -> Result<Optimum>
where
    F: Fn(f64) -> f64,
{
    config.validate()?;
    if lower.is_nan() || upper.is_nan() || lower >= upper {
        return Err(ForecastError::InvalidConfiguration(format!(
            "search interval [{lower}, {upper}] is empty"
        )));
    }

    let inv_phi = (5.0_f64.sqrt() - 1.0) / 2.0;
    let (mut a, mut b) = (lower, upper);
    let mut c = b - inv_phi * (b - a);
    let mut d = a + inv_phi * (b - a);
    let mut fc = objective(c);
    let mut fd = objective(d);

    for iteration in 1..=config.max_iter {
        if b - a <= config.tolerance {
            let (point, value) = [(c, fc), (d, fd), (lower, objective(lower)), (upper, objective(upper))]
                .into_iter()
                .min_by(|x, y| x.1.total_cmp(&y.1))
                .unwrap_or((c, fc));
            debug!(iterations = iteration, point, value, "golden-section search converged");
            return Ok(Optimum {
                point: vec![point],
                value,
                iterations: iteration,
            });
        }

        if fc < fd {
            b = d;
            d = c;
            fd = fc;
            c = b - inv_phi * (b - a);
            fc = objective(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + inv_phi * (b - a);
            fd = objective(d);
        }
    }

    Err(ForecastError::Convergence {
        iterations: config.max_iter,
    })
}

/// Minimize a function of several variables inside a box with the Nelder-Mead simplex method.
///
/// Every trial point is clamped to `bounds`. The search stops when the spread
/// of objective values across the simplex falls below
/// `tolerance * (1 + |best|)` or the simplex diameter falls below `tolerance`.
///
/// # Example
/// ```
/// use decomp_forecast::utils::optimization::{nelder_mead, OptimizerConfig};
///
/// let opt = nelder_mead(
///     |x| (x[0] - 0.2).powi(2) + (x[1] - 0.7).powi(2),
///     &[0.5, 0.5],
///     &[(0.0, 1.0), (0.0, 1.0)],
///     &OptimizerConfig::default(),
/// )
/// .unwrap();
/// assert!((opt.point[0] - 0.2).abs() < 1e-3);
/// assert!((opt.point[1] - 0.7).abs() < 1e-3);
/// ```
pub fn nelder_mead<F>(
    objective: F,
    initial: &[f64],
    bounds: &[(f64, f64)],
    config: &OptimizerConfig,
) -> Result<Optimum>
where
    F: Fn(&[f64]) -> f64,
{
    config.validate()?;
    let dim = initial.len();
    if dim == 0 {
        return Err(ForecastError::InvalidConfiguration(
            "optimizer needs at least one dimension".to_string(),
        ));
    }
    if bounds.len() != dim {
        return Err(ForecastError::DimensionMismatch {
            expected: dim,
            got: bounds.len(),
        });
    }

    let clamp = |mut point: Vec<f64>| -> Vec<f64> {
        for (x, (lo, hi)) in point.iter_mut().zip(bounds) {
            *x = x.clamp(*lo, *hi);
        }
        point
    };
    let evaluate = |point: Vec<f64>| -> Vertex {
        let point = clamp(point);
        let value = objective(&point);
        Vertex { point, value }
    };

    let start = clamp(initial.to_vec());
    let mut simplex: Vec<Vertex> = Vec::with_capacity(dim + 1);
    simplex.push(evaluate(start.clone()));
    for i in 0..dim {
        let step = if start[i].abs() > 1e-10 {
            config.initial_step * start[i].abs()
        } else {
            config.initial_step
        };
        let mut vertex = start.clone();
        vertex[i] += step;
        // Step inward when the start sits on the upper bound.
        if vertex[i] > bounds[i].1 {
            vertex[i] = start[i] - step;
        }
        simplex.push(evaluate(vertex));
    }

    for iteration in 1..=config.max_iter {
        simplex.sort_by(|a, b| a.value.total_cmp(&b.value));

        let best = simplex[0].value;
        let spread = simplex[dim].value - best;
        let diameter = simplex[1..]
            .iter()
            .map(|v| distance(&v.point, &simplex[0].point))
            .fold(0.0, f64::max);
        if spread <= config.tolerance * (1.0 + best.abs()) || diameter <= config.tolerance {
            debug!(iterations = iteration, value = best, "nelder-mead converged");
            return Ok(Optimum {
                point: simplex[0].point.clone(),
                value: best,
                iterations: iteration,
            });
        }

        let centroid = centroid(&simplex[..dim]);
        let worst = &simplex[dim];
        let second_worst = simplex[dim - 1].value;

        let reflected = evaluate(affine(&centroid, &worst.point, -config.reflection));
        if reflected.value < best {
            let expanded = evaluate(affine(&centroid, &reflected.point, config.expansion));
            simplex[dim] = if expanded.value < reflected.value {
                expanded
            } else {
                reflected
            };
            continue;
        }
        if reflected.value < second_worst {
            simplex[dim] = reflected;
            continue;
        }

        let contracted = if reflected.value < worst.value {
            let outside = evaluate(affine(&centroid, &reflected.point, config.contraction));
            (outside.value <= reflected.value).then_some(outside)
        } else {
            let inside = evaluate(affine(&centroid, &worst.point, config.contraction));
            (inside.value < worst.value).then_some(inside)
        };
        if let Some(vertex) = contracted {
            simplex[dim] = vertex;
            continue;
        }

        let anchor = simplex[0].point.clone();
        for vertex in simplex.iter_mut().skip(1) {
            *vertex = evaluate(affine(&anchor, &vertex.point, config.shrink));
        }
    }

    debug!(iterations = config.max_iter, "nelder-mead exhausted its budget");
    Err(ForecastError::Convergence {
        iterations: config.max_iter,
    })
}

#[derive(Debug, Clone)]
struct Vertex {
    point: Vec<f64>,
    value: f64,
}

/// Mean of the given vertices.
fn centroid(vertices: &[Vertex]) -> Vec<f64> {
    let dim = vertices[0].point.len();
    let mut c = vec![0.0; dim];
    for v in vertices {
        for (ci, xi) in c.iter_mut().zip(&v.point) {
            *ci += xi;
        }
    }
    let count = vertices.len() as f64;
    c.iter_mut().for_each(|ci| *ci /= count);
    c
}

/// `origin + coef * (point - origin)`.
fn affine(origin: &[f64], point: &[f64], coef: f64) -> Vec<f64> {
    origin
        .iter()
        .zip(point)
        .map(|(o, p)| o + coef * (p - o))
        .collect()
}

fn distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
