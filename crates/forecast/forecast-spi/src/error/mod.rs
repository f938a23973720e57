//! Error types for forecast operations

mod forecast_error;
mod load_error;

pub use forecast_error::ForecastError;
pub use load_error::LoadError;

/// Result type for request-scoped forecast operations
pub type Result<T> = std::result::Result<T, ForecastError>;
