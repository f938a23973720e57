//! Forecast Core
//!
//! Implementations behind the forecast SPI: CSV-backed historical series,
//! windowed feature reconstruction, risk classification, model oracles and
//! the prediction service that ties them together.

pub mod classifier;
pub mod oracle;
pub mod reconstruct;
pub mod service;
pub mod spec;
pub mod store;
pub mod window;

// Re-export SPI types for implementations
pub use forecast_spi::{
    DuplicateYearPolicy, FeatureSpec, FeatureVector, ForecastError, HistoricalSeries, LoadError,
    ModelOracle, Observation, PredictionRequest, PredictionResult, Result, RiskLevel, SeriesSource,
};

// Re-export main types
pub use classifier::{RiskClassifier, RiskThresholds};
pub use oracle::{load_model, parse_model, LinearModel, ModelArtifact, TreeEnsemble};
pub use reconstruct::FeatureReconstructor;
pub use service::PredictionService;
pub use spec::{load_feature_spec, parse_feature_spec, validate_feature_spec};
pub use store::{read_series, CsvSeriesSource, SeriesStore};
