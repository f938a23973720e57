//! Linear regression oracle

use forecast_spi::{FeatureSpec, FeatureVector, ForecastError, LoadError, ModelOracle, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// On-disk form of a linear model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearArtifact {
    #[serde(default)]
    pub model_type: Option<String>,
    pub intercept: f64,
    pub coefficients: BTreeMap<String, f64>,
    /// Values substituted for missing features, typically training means
    #[serde(default)]
    pub fill_values: BTreeMap<String, f64>,
}

/// y = intercept + Σ coefficient · feature, with coefficients aligned to the
/// feature spec.
#[derive(Debug, Clone)]
pub struct LinearModel {
    model_type: String,
    intercept: f64,
    coefficients: Vec<f64>,
    fill_values: Vec<Option<f64>>,
}

impl LinearModel {
    pub const DEFAULT_MODEL_TYPE: &'static str = "Linear Regressor";

    /// Align the artifact's coefficients with the feature spec.
    ///
    /// Every spec feature needs a coefficient and the artifact may not name
    /// features the feature spec does not carry.
    pub fn compile(
        artifact: LinearArtifact,
        spec: &FeatureSpec,
    ) -> std::result::Result<Self, LoadError> {
        if let Some(extra) = artifact.coefficients.keys().find(|name| !spec.contains(name)) {
            return Err(LoadError::InvalidModel(format!(
                "coefficient for unknown feature '{}'",
                extra
            )));
        }

        let coefficients = spec
            .iter()
            .map(|name| {
                artifact.coefficients.get(name).copied().ok_or_else(|| {
                    LoadError::InvalidModel(format!("no coefficient for feature '{}'", name))
                })
            })
            .collect::<std::result::Result<Vec<f64>, LoadError>>()?;

        let fill_values = spec
            .iter()
            .map(|name| artifact.fill_values.get(name).copied())
            .collect();

        Ok(Self {
            model_type: artifact
                .model_type
                .unwrap_or_else(|| Self::DEFAULT_MODEL_TYPE.to_string()),
            intercept: artifact.intercept,
            coefficients,
            fill_values,
        })
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }
}

impl ModelOracle for LinearModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64> {
        if features.len() != self.coefficients.len() {
            return Err(ForecastError::Oracle(format!(
                "expected {} features, got {}",
                self.coefficients.len(),
                features.len()
            )));
        }

        features
            .iter()
            .zip(self.coefficients.iter().zip(&self.fill_values))
            .try_fold(self.intercept, |acc, ((name, value), (coef, fill))| {
                let x = value.or(*fill).ok_or_else(|| {
                    ForecastError::Oracle(format!("feature '{}' is missing", name))
                })?;
                Ok(acc + coef * x)
            })
    }

    fn model_type(&self) -> &str {
        &self.model_type
    }
}
