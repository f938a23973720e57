//! Request and response shapes of the prediction service

use crate::model::feature::{ANTENATAL_CARE_COVERAGE, HEALTH_SPENDING, SKILLED_BIRTH_ATTENDANCE};
use crate::model::{RiskLevel, RiskThresholdLabels};
use serde::{Deserialize, Serialize};

/// Caller input for a single-year forecast.
///
/// `year` is kept as a raw number so that an absent or non-integral year can
/// be reported as a client error instead of a deserialization failure.
/// Covariates that are absent or `null` are missing, never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(default)]
    pub year: Option<f64>,
    #[serde(default)]
    pub skilled_birth_attendance: Option<f64>,
    #[serde(default)]
    pub antenatal_care_coverage: Option<f64>,
    #[serde(default)]
    pub health_spending: Option<f64>,
}

impl PredictionRequest {
    pub fn for_year(year: i32) -> Self {
        Self {
            year: Some(f64::from(year)),
            ..Self::default()
        }
    }

    pub fn with_skilled_birth_attendance(mut self, value: f64) -> Self {
        self.skilled_birth_attendance = Some(value);
        self
    }

    pub fn with_antenatal_care_coverage(mut self, value: f64) -> Self {
        self.antenatal_care_coverage = Some(value);
        self
    }

    pub fn with_health_spending(mut self, value: f64) -> Self {
        self.health_spending = Some(value);
        self
    }

    /// Covariates keyed by their column names.
    pub fn covariates(&self) -> [(&'static str, Option<f64>); 3] {
        [
            (SKILLED_BIRTH_ATTENDANCE, self.skilled_birth_attendance),
            (ANTENATAL_CARE_COVERAGE, self.antenatal_care_coverage),
            (HEALTH_SPENDING, self.health_spending),
        ]
    }
}

/// Successful forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_mmr: f64,
    pub risk_level: RiskLevel,
}

/// One historical `(year, MMR)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub year: i32,
    #[serde(rename = "MMR")]
    pub mmr: f64,
}

/// Description of the loaded model and data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_type: String,
    pub features: Vec<String>,
    pub training_years: String,
    pub risk_thresholds: RiskThresholdLabels,
}
