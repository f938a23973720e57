//! Request-scoped forecast error types

use thiserror::Error;

/// Errors that can occur while serving a single prediction request.
///
/// Client errors reject the request without touching the model; server errors
/// are reported generically and never affect other requests.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// A required request field is absent
    #[error("{0} is required")]
    MissingField(String),

    /// A request field is present but unusable
    #[error("{field} {reason}")]
    InvalidField { field: String, reason: String },

    /// The merged series cannot supply both lag features for the query year
    #[error("Insufficient historical data for prediction")]
    InsufficientData { year: i32 },

    /// The query year already exists in the history and the policy forbids replacing it
    #[error("Year {0} already exists in historical data")]
    DuplicateYear(i32),

    /// The model oracle failed or produced an unusable value
    #[error("Model prediction failed: {0}")]
    Oracle(String),

    /// Malformed internal state
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ForecastError {
    /// Whether the failure is attributable to the request rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ForecastError::MissingField(_)
                | ForecastError::InvalidField { .. }
                | ForecastError::InsufficientData { .. }
                | ForecastError::DuplicateYear(_)
        )
    }
}
