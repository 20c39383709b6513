use std::fmt;

use serde::{Deserialize, Serialize};

/// How the seasonal component combines with the level.
///
/// Additive: `y = trend + seasonal + noise`, constant seasonal amplitude.
/// Multiplicative: `y = trend * seasonal * noise`, amplitude grows with the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecompositionType {
    Additive,
    Multiplicative,
}

impl DecompositionType {
    pub fn name(&self) -> &'static str {
        match self {
            DecompositionType::Additive => "additive",
            DecompositionType::Multiplicative => "multiplicative",
        }
    }
}

impl fmt::Display for DecompositionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&DecompositionType::Multiplicative).unwrap();
        assert_eq!(json, r#""multiplicative""#);
        let back: DecompositionType = serde_json::from_str(r#""additive""#).unwrap();
        assert_eq!(back, DecompositionType::Additive);
    }
}
