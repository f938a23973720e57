//! Prediction service
//!
//! Request-level entry point shared by the HTTP server and the CLI. Holds the
//! loaded series, the feature spec and the model; every call works on its own
//! merged copy of the series, so the service is safe to share across threads.

use crate::classifier::{RiskClassifier, RiskThresholds};
use crate::reconstruct::FeatureReconstructor;
use crate::store::SeriesStore;
use forecast_spi::{
    DerivedRow, DuplicateYearPolicy, FeatureSpec, FeatureVector, ForecastError, HistoryPoint,
    ModelInfo, ModelOracle, Observation, PredictionRequest, PredictionResult, Result,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

pub struct PredictionService {
    store: SeriesStore,
    spec: FeatureSpec,
    oracle: Arc<dyn ModelOracle>,
    reconstructor: FeatureReconstructor,
    classifier: RiskClassifier,
}

impl PredictionService {
    pub fn new(store: SeriesStore, spec: FeatureSpec, oracle: Arc<dyn ModelOracle>) -> Self {
        Self {
            store,
            spec,
            oracle,
            reconstructor: FeatureReconstructor::default(),
            classifier: RiskClassifier::default(),
        }
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicateYearPolicy) -> Self {
        self.reconstructor = FeatureReconstructor::new(policy);
        self
    }

    pub fn with_thresholds(mut self, thresholds: RiskThresholds) -> Self {
        self.classifier = RiskClassifier::new(thresholds);
        self
    }

    /// Forecast MMR for the requested year and classify the result.
    pub fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult> {
        let features = self.features_for(request)?;

        let predicted_mmr = self.oracle.predict(&features)?;
        if !predicted_mmr.is_finite() {
            return Err(ForecastError::Oracle(format!(
                "model returned non-finite value {}",
                predicted_mmr
            )));
        }

        let risk_level = self.classifier.classify(predicted_mmr);
        info!(
            year = request.year,
            predicted_mmr,
            risk_level = %risk_level,
            "prediction served"
        );
        Ok(PredictionResult {
            predicted_mmr,
            risk_level,
        })
    }

    /// Feature vector the model would receive for the request.
    pub fn features_for(&self, request: &PredictionRequest) -> Result<FeatureVector> {
        let row = self.derived_row(request)?;
        Ok(FeatureVector::from_row(&self.spec, &row))
    }

    /// Full derived row for the request's year, before spec projection.
    pub fn derived_row(&self, request: &PredictionRequest) -> Result<DerivedRow> {
        let observation = observation_from(request)?;
        debug!(year = observation.year, "reconstructing features");
        self.reconstructor
            .reconstruct(self.store.series(), observation)
    }

    /// Historical `(year, MMR)` pairs with a known MMR, ascending by year.
    pub fn history(&self) -> Vec<HistoryPoint> {
        self.store.series().history()
    }

    pub fn model_info(&self) -> ModelInfo {
        let training_years = self
            .store
            .series()
            .year_range()
            .map(|(first, last)| format!("{}-{}", first, last))
            .unwrap_or_default();

        ModelInfo {
            model_type: self.oracle.model_type().to_string(),
            features: self.spec.names().to_vec(),
            training_years,
            risk_thresholds: self.classifier.labels(),
        }
    }

    pub fn spec(&self) -> &FeatureSpec {
        &self.spec
    }

    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    pub fn duplicate_policy(&self) -> DuplicateYearPolicy {
        self.reconstructor.policy()
    }
}

impl fmt::Debug for PredictionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredictionService")
            .field("rows", &self.store.series().len())
            .field("features", &self.spec.names())
            .field("model_type", &self.oracle.model_type())
            .field("reconstructor", &self.reconstructor)
            .field("classifier", &self.classifier)
            .finish()
    }
}

fn observation_from(request: &PredictionRequest) -> Result<Observation> {
    let year = request_year(request)?;
    Ok(request
        .covariates()
        .into_iter()
        .fold(Observation::new(year), |observation, (name, value)| {
            observation.with_optional_covariate(name, value)
        }))
}

fn request_year(request: &PredictionRequest) -> Result<i32> {
    let year = request
        .year
        .ok_or_else(|| ForecastError::MissingField("Year".to_string()))?;

    if !year.is_finite()
        || year.fract() != 0.0
        || year < f64::from(i32::MIN)
        || year > f64::from(i32::MAX)
    {
        return Err(ForecastError::InvalidField {
            field: "Year".to_string(),
            reason: "must be an integer".to_string(),
        });
    }
    Ok(year as i32)
}
