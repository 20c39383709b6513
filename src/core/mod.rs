//! Core data structures: validated input series and forecast output.

mod decomposition_type;
mod forecast;
mod series;

pub use decomposition_type::DecompositionType;
pub use forecast::Forecast;
pub use series::{validate_values, Series};
