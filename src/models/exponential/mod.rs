//! Exponential smoothing models.
//!
//! This module provides the smoothing family of increasing structure:
//! - Simple Exponential Smoothing (level)
//! - Holt's Linear Trend (level + trend)
//! - Holt-Winters (level + trend + additive or multiplicative season)
//!
//! All three run through one shared recursion.

mod holt;
mod holt_winters;
pub(crate) mod recursion;
mod ses;

pub use holt::HoltSmoother;
pub use holt_winters::{default_seasonal_period, WintersSmoother};
pub use ses::ExponentialSmoother;
