//! Partitioning a series into contiguous segments.

use serde::Serialize;

use crate::error::{ForecastError, Result};
use crate::utils::stats::summarize;

/// A contiguous slice `[start, end)` of a series with its statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    /// Zero-based position of the segment in the partition.
    pub index: usize,
    pub start: usize,
    /// Exclusive.
    pub end: usize,
    pub size: usize,
    pub mean: f64,
    pub variance: f64,
    pub std_dev: f64,
    /// Coefficient of variation in percent (NaN for a zero-mean segment).
    pub cv: f64,
    pub min: f64,
    pub max: f64,
}

/// Split `values` into `k` segments of `n / k` observations; the last one
/// also takes the remainder.
///
/// Every segment needs at least two observations, so `n >= 2k` is required.
///
/// # Example
/// ```
/// use decomp_forecast::classification::partition;
///
/// let values: Vec<f64> = (0..10).map(f64::from).collect();
/// let sizes: Vec<usize> = partition(&values, 3).unwrap().iter().map(|s| s.size).collect();
/// assert_eq!(sizes, [3, 3, 4]);
/// ```
pub fn partition(values: &[f64], k: usize) -> Result<Vec<Segment>> {
    if k < 2 {
        return Err(ForecastError::InsufficientData { needed: 2, got: k });
    }
    let n = values.len();
    if n < 2 * k {
        return Err(ForecastError::InsufficientData {
            needed: 2 * k,
            got: n,
        });
    }

    let width = n / k;
    (0..k)
        .map(|index| {
            let start = index * width;
            let end = if index + 1 == k { n } else { start + width };
            let stats = summarize(&values[start..end])?;
            Ok(Segment {
                index,
                start,
                end,
                size: end - start,
                mean: stats.mean,
                variance: stats.variance,
                std_dev: stats.std_dev,
                cv: stats.cv,
                min: stats.min,
                max: stats.max,
            })
        })
        .collect()
}
