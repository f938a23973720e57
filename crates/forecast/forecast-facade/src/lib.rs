//! Forecast Facade
//!
//! High-level API for MMR point forecasts. Re-exports all public types
//! from the forecast stack for convenient usage.

// Re-export everything from API (which includes SPI and core)
pub use forecast_api::*;

// Explicit re-exports for documentation
pub use forecast_api::prelude;

// Re-export core modules for direct access
pub use forecast_core::{classifier, oracle, reconstruct, service, spec, store, window};

// Re-export building blocks at root
pub use forecast_core::{
    load_feature_spec, load_model, parse_feature_spec, parse_model, read_series,
    validate_feature_spec, CsvSeriesSource, FeatureReconstructor, LinearModel, ModelArtifact,
    SeriesStore, TreeEnsemble,
};

// Re-export SPI contracts and data model
pub use forecast_spi::{
    feature, DerivedFeatures, DerivedRow, FeatureSpec, HistoricalSeries, ModelOracle,
    Observation, RiskThresholdLabels, SeriesSource,
};
