//! Feature spec loading and validation

use forecast_spi::feature::{is_computed, MMR, REQUEST_COVARIATES, YEAR};
use forecast_spi::{FeatureSpec, HistoricalSeries, LoadError};
use std::fs;
use std::path::Path;

/// Read a feature spec from a JSON array of feature names.
pub fn load_feature_spec(path: &Path) -> Result<FeatureSpec, LoadError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| LoadError::Io(format!("{}: {}", path.display(), e)))?;
    parse_feature_spec(&contents)
}

pub fn parse_feature_spec(json: &str) -> Result<FeatureSpec, LoadError> {
    let names: Vec<String> =
        serde_json::from_str(json).map_err(|e| LoadError::Json(e.to_string()))?;
    FeatureSpec::new(names)
}

/// Check that every feature can be produced for a query row.
///
/// A name resolves when it is fixed (`year`, `MMR`), computed, a request
/// covariate, or a covariate column of the historical series.
pub fn validate_feature_spec(
    spec: &FeatureSpec,
    series: &HistoricalSeries,
) -> Result<(), LoadError> {
    let known_covariates = series.covariate_names();
    let unresolved: Vec<&str> = spec
        .iter()
        .map(String::as_str)
        .filter(|name| {
            *name != YEAR
                && *name != MMR
                && !is_computed(name)
                && !REQUEST_COVARIATES.contains(name)
                && !known_covariates.contains(*name)
        })
        .collect();

    if unresolved.is_empty() {
        Ok(())
    } else {
        Err(LoadError::InvalidFeatureSpec(format!(
            "unknown features: {}",
            unresolved.join(", ")
        )))
    }
}
