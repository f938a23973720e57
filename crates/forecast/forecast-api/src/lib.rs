//! Forecast Consumer API
//!
//! Configuration and startup for the MMR prediction service.
//!
//! This crate provides:
//! - `ServiceConfig` with a builder and environment loading
//! - `bootstrap`, which loads the series, feature spec and model
//! - Re-exports from SPI and core for convenience

mod startup;
pub mod config;

pub use startup::bootstrap;
pub use config::{ConfigError, ServiceConfig, ServiceConfigBuilder};

// Re-export from core
pub use forecast_core::{PredictionService, RiskClassifier, RiskThresholds};

// Re-export types from SPI
pub use forecast_spi::{
    DuplicateYearPolicy, FeatureVector, ForecastError, HistoryPoint, LoadError, ModelInfo,
    PredictionRequest, PredictionResult, Result, RiskLevel,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{bootstrap, ServiceConfig, ServiceConfigBuilder};
    pub use forecast_core::{PredictionService, RiskThresholds};
    pub use forecast_spi::{
        DuplicateYearPolicy, ForecastError, HistoryPoint, LoadError, ModelInfo, PredictionRequest,
        PredictionResult, Result, RiskLevel,
    };
}
