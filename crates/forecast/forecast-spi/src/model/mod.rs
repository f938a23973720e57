//! Model types shared across the forecast stack

pub mod feature;
mod observation;
mod policy;
mod prediction;
mod risk;
mod series;

pub use feature::{DerivedFeatures, DerivedRow, FeatureSpec, FeatureVector};
pub use observation::Observation;
pub use policy::DuplicateYearPolicy;
pub use prediction::{HistoryPoint, ModelInfo, PredictionRequest, PredictionResult};
pub use risk::{RiskLevel, RiskThresholdLabels};
pub use series::HistoricalSeries;
