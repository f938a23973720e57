//! Risk bands

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete risk band for a predicted MMR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Medium Risk")]
    Medium,
    #[serde(rename = "Low Risk")]
    Low,
}

impl RiskLevel {
    /// Human-readable label used on the wire.
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::High => "High Risk",
            RiskLevel::Medium => "Medium Risk",
            RiskLevel::Low => "Low Risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Textual description of the band boundaries, as reported by model info.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskThresholdLabels {
    pub high: String,
    pub medium: String,
    pub low: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&RiskLevel::High).unwrap(),
            "\"High Risk\""
        );
        assert_eq!(
            serde_json::to_string(&RiskLevel::Low).unwrap(),
            "\"Low Risk\""
        );
    }

    #[test]
    fn test_display_matches_label() {
        for level in [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low] {
            assert_eq!(level.to_string(), level.label());
        }
    }
}
