//! Service configuration types.

use forecast_core::RiskThresholds;
use forecast_spi::DuplicateYearPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub const ENV_DATA_PATH: &str = "MMR_DATA_PATH";
pub const ENV_FEATURES_PATH: &str = "MMR_FEATURES_PATH";
pub const ENV_MODEL_PATH: &str = "MMR_MODEL_PATH";
pub const ENV_DUPLICATE_YEAR: &str = "MMR_DUPLICATE_YEAR";

pub const DEFAULT_DATA_PATH: &str = "data/engineered_maternal_mortality.csv";
pub const DEFAULT_FEATURES_PATH: &str = "data/feature_names.json";
pub const DEFAULT_MODEL_PATH: &str = "data/model.json";

/// Invalid configuration value.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid value '{value}' for {var}: {reason}")]
pub struct ConfigError {
    pub var: String,
    pub value: String,
    pub reason: String,
}

/// Where the service finds its artifacts and how it treats requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Historical series CSV
    pub data_path: PathBuf,
    /// JSON array of feature names
    pub features_path: PathBuf,
    /// Model artifact JSON
    pub model_path: PathBuf,
    pub duplicate_year: DuplicateYearPolicy,
    pub thresholds: RiskThresholds,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            features_path: PathBuf::from(DEFAULT_FEATURES_PATH),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            duplicate_year: DuplicateYearPolicy::default(),
            thresholds: RiskThresholds::default(),
        }
    }
}

impl ServiceConfig {
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::new()
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Unset or blank variables fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let mut builder = ServiceConfigBuilder::new();
        if let Some(path) = get(ENV_DATA_PATH) {
            builder = builder.data_path(path);
        }
        if let Some(path) = get(ENV_FEATURES_PATH) {
            builder = builder.features_path(path);
        }
        if let Some(path) = get(ENV_MODEL_PATH) {
            builder = builder.model_path(path);
        }
        if let Some(raw) = get(ENV_DUPLICATE_YEAR) {
            let policy = raw.parse::<DuplicateYearPolicy>().map_err(|reason| ConfigError {
                var: ENV_DUPLICATE_YEAR.to_string(),
                value: raw.clone(),
                reason,
            })?;
            builder = builder.duplicate_year(policy);
        }
        Ok(builder.build())
    }
}

/// Builder for ServiceConfig.
#[derive(Debug, Default)]
pub struct ServiceConfigBuilder {
    data_path: Option<PathBuf>,
    features_path: Option<PathBuf>,
    model_path: Option<PathBuf>,
    duplicate_year: Option<DuplicateYearPolicy>,
    thresholds: Option<RiskThresholds>,
}

impl ServiceConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = Some(path.into());
        self
    }

    pub fn features_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.features_path = Some(path.into());
        self
    }

    pub fn model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(path.into());
        self
    }

    pub fn duplicate_year(mut self, policy: DuplicateYearPolicy) -> Self {
        self.duplicate_year = Some(policy);
        self
    }

    pub fn thresholds(mut self, thresholds: RiskThresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    /// Build the configuration; unset fields take their defaults.
    pub fn build(self) -> ServiceConfig {
        let defaults = ServiceConfig::default();
        ServiceConfig {
            data_path: self.data_path.unwrap_or(defaults.data_path),
            features_path: self.features_path.unwrap_or(defaults.features_path),
            model_path: self.model_path.unwrap_or(defaults.model_path),
            duplicate_year: self.duplicate_year.unwrap_or(defaults.duplicate_year),
            thresholds: self.thresholds.unwrap_or(defaults.thresholds),
        }
    }
}
