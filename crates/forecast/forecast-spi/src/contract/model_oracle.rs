//! Opaque pre-trained regressor

use crate::error::Result;
use crate::model::FeatureVector;

/// Pre-trained regressor that maps an ordered feature vector to a prediction.
///
/// Implementations are shared read-only across concurrent requests.
pub trait ModelOracle: Send + Sync {
    /// Predict a single value. Missing features may be rejected or handled
    /// natively, depending on the model.
    fn predict(&self, features: &FeatureVector) -> Result<f64>;

    /// Model family reported to clients
    fn model_type(&self) -> &str;
}
