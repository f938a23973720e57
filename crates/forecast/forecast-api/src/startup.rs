//! Startup wiring of store, feature spec and model.

use crate::config::ServiceConfig;
use forecast_core::{
    load_feature_spec, load_model, validate_feature_spec, CsvSeriesSource, PredictionService,
    SeriesStore,
};
use forecast_spi::LoadError;
use tracing::info;

/// Load every artifact named by the config and assemble the service.
///
/// The feature spec is checked against the series and the model against the
/// spec, so a mismatched deployment fails here and not on the first request.
pub fn bootstrap(config: &ServiceConfig) -> Result<PredictionService, LoadError> {
    let store = SeriesStore::load(&CsvSeriesSource::new(&config.data_path))?;

    let spec = load_feature_spec(&config.features_path)?;
    validate_feature_spec(&spec, store.series())?;

    let oracle = load_model(&config.model_path, &spec)?;

    info!(
        features = spec.len(),
        model_type = oracle.model_type(),
        duplicate_year = %config.duplicate_year,
        "prediction service ready"
    );

    Ok(PredictionService::new(store, spec, oracle)
        .with_duplicate_policy(config.duplicate_year)
        .with_thresholds(config.thresholds))
}
