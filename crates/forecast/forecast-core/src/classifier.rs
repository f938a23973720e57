//! Risk classification of predicted MMR values

use forecast_spi::{RiskLevel, RiskThresholdLabels};
use serde::{Deserialize, Serialize};

/// Lower bounds (exclusive) of the high and medium bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub high: f64,
    pub medium: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high: 1000.0,
            medium: 500.0,
        }
    }
}

/// Maps a continuous prediction to a [`RiskLevel`].
///
/// Each band is closed on its upper side: with the default thresholds 500 is
/// low and 1000 is medium.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskClassifier {
    thresholds: RiskThresholds,
}

impl RiskClassifier {
    pub fn new(thresholds: RiskThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> RiskThresholds {
        self.thresholds
    }

    pub fn classify(&self, prediction: f64) -> RiskLevel {
        if prediction > self.thresholds.high {
            RiskLevel::High
        } else if prediction > self.thresholds.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Band boundaries rendered for clients, e.g. `"> 1000"`.
    pub fn labels(&self) -> RiskThresholdLabels {
        let RiskThresholds { high, medium } = self.thresholds;
        RiskThresholdLabels {
            high: format!("> {}", high),
            medium: format!("{}-{}", medium, high),
            low: format!("<= {}", medium),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_are_exact() {
        let classifier = RiskClassifier::default();
        assert_eq!(classifier.classify(1000.0), RiskLevel::Medium);
        assert_eq!(classifier.classify(1000.01), RiskLevel::High);
        assert_eq!(classifier.classify(500.0), RiskLevel::Low);
        assert_eq!(classifier.classify(500.01), RiskLevel::Medium);
    }

    #[test]
    fn test_extremes() {
        let classifier = RiskClassifier::default();
        assert_eq!(classifier.classify(0.0), RiskLevel::Low);
        assert_eq!(classifier.classify(-10.0), RiskLevel::Low);
        assert_eq!(classifier.classify(5000.0), RiskLevel::High);
    }

    #[test]
    fn test_monotonic() {
        let classifier = RiskClassifier::default();
        let rank = |level: RiskLevel| match level {
            RiskLevel::Low => 0,
            RiskLevel::Medium => 1,
            RiskLevel::High => 2,
        };
        let mut previous = 0;
        for step in 0..300 {
            let value = step as f64 * 7.5;
            let current = rank(classifier.classify(value));
            assert!(current >= previous, "band dropped at {}", value);
            previous = current;
        }
    }

    #[test]
    fn test_default_labels() {
        let labels = RiskClassifier::default().labels();
        assert_eq!(labels.high, "> 1000");
        assert_eq!(labels.medium, "500-1000");
        assert_eq!(labels.low, "<= 500");
    }

    #[test]
    fn test_custom_thresholds() {
        let classifier = RiskClassifier::new(RiskThresholds {
            high: 300.0,
            medium: 100.0,
        });
        assert_eq!(classifier.classify(301.0), RiskLevel::High);
        assert_eq!(classifier.classify(300.0), RiskLevel::Medium);
        assert_eq!(classifier.labels().medium, "100-300");
    }
}
