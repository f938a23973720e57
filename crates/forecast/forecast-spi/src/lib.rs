//! Forecast Service Provider Interface
//!
//! Defines the contracts (model oracle, historical data source), the data model
//! shared by every layer of the MMR forecast stack, and its error taxonomy.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{ModelOracle, SeriesSource};
pub use error::{ForecastError, LoadError, Result};
pub use model::{
    feature, DerivedFeatures, DerivedRow, DuplicateYearPolicy, FeatureSpec, FeatureVector,
    HistoricalSeries, HistoryPoint, ModelInfo, Observation, PredictionRequest, PredictionResult,
    RiskLevel, RiskThresholdLabels,
};
