//! Startup error types.

use thiserror::Error;

/// Errors raised while loading the historical series, the feature spec or the
/// model artifact. Any of these aborts startup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("Failed to read file: {0}")]
    Io(String),

    #[error("Failed to parse CSV: {0}")]
    Csv(String),

    #[error("Failed to parse JSON: {0}")]
    Json(String),

    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    #[error("Invalid value '{value}' in column '{column}' at line {line}")]
    InvalidValue {
        line: u64,
        column: String,
        value: String,
    },

    #[error("Duplicate year {0} in historical data")]
    DuplicateYear(i32),

    #[error("Historical data contains no rows")]
    EmptySeries,

    #[error("Invalid feature spec: {0}")]
    InvalidFeatureSpec(String),

    #[error("Invalid model artifact: {0}")]
    InvalidModel(String),
}
