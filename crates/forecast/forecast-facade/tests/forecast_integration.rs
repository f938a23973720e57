//! Integration tests for the forecast facade
//!
//! Assembles a prediction service from in-memory artifacts and checks the
//! reconstructed features and predictions end to end.

use forecast_facade::{
    parse_feature_spec, parse_model, read_series, validate_feature_spec, DuplicateYearPolicy,
    FeatureReconstructor, ForecastError, Observation, PredictionRequest, PredictionService,
    RiskLevel, SeriesStore,
};

const SERIES: &str = "\
year,MMR,skilled_birth_attendance,antenatal_care_coverage,health_spending
2018,450,71.0,80.0,4.1
2019,430,72.5,81.0,4.3
2020,425,73.0,,4.4
2021,410,74.2,83.5,4.6
2022,400,75.0,84.0,4.8
";

const FEATURES: &str = r#"[
    "year", "skilled_birth_attendance", "antenatal_care_coverage", "health_spending",
    "mmr_lag_1", "mmr_lag_2", "mmr_3yr_avg", "mmr_5yr_avg", "trend_slope", "risk_flag"
]"#;

/// Two trees: one on the lag and slope, one on the always-missing 3-year average
const MODEL: &str = r#"{
    "kind": "tree_ensemble",
    "base_score": 0.5,
    "trees": [
        {"nodeid": 0, "split": "mmr_lag_1", "split_condition": 500.0, "yes": 1, "no": 2, "missing": 2,
         "children": [
            {"nodeid": 1, "split": "trend_slope", "split_condition": 0.0, "yes": 3, "no": 4, "missing": 3,
             "children": [{"nodeid": 3, "leaf": 380.0}, {"nodeid": 4, "leaf": 420.0}]},
            {"nodeid": 2, "leaf": 800.0}
         ]},
        {"nodeid": 0, "split": "mmr_3yr_avg", "split_condition": 300.0, "yes": 1, "no": 2, "missing": 2,
         "children": [{"nodeid": 1, "leaf": -100.0}, {"nodeid": 2, "leaf": 10.0}]}
    ]
}"#;

fn service() -> PredictionService {
    let store = SeriesStore::new(read_series(SERIES.as_bytes()).unwrap());
    let spec = parse_feature_spec(FEATURES).unwrap();
    validate_feature_spec(&spec, store.series()).unwrap();
    let oracle = parse_model(MODEL, &spec).unwrap();
    PredictionService::new(store, spec, oracle)
}

#[test]
fn test_scenario_feature_vector() {
    let request = PredictionRequest::for_year(2023)
        .with_skilled_birth_attendance(80.0)
        .with_health_spending(5.2);
    let features = service().features_for(&request).unwrap();

    assert_eq!(
        features.values(),
        &[
            Some(2023.0),
            Some(80.0),
            None,
            Some(5.2),
            Some(400.0),
            Some(410.0),
            None,
            None,
            Some(-10.5),
            Some(0.0),
        ]
    );
}

#[test]
fn test_scenario_prediction() {
    let result = service()
        .predict(&PredictionRequest::for_year(2023).with_skilled_birth_attendance(80.0))
        .unwrap();
    assert_eq!(result.predicted_mmr, 390.5);
    assert_eq!(result.risk_level, RiskLevel::Low);
}

#[test]
fn test_prediction_is_deterministic() {
    let service = service();
    let request = PredictionRequest::for_year(2023).with_antenatal_care_coverage(85.0);
    let first = service.predict(&request).unwrap();
    for _ in 0..10 {
        assert_eq!(service.predict(&request).unwrap(), first);
    }
}

#[test]
fn test_query_with_fewer_than_two_prior_rows() {
    let err = service()
        .predict(&PredictionRequest::for_year(2019))
        .unwrap_err();
    assert!(err.is_client_error());
    assert_eq!(err.to_string(), "Insufficient historical data for prediction");
}

#[test]
fn test_missing_year_is_client_error() {
    let err = service().predict(&PredictionRequest::default()).unwrap_err();
    assert_eq!(err, ForecastError::MissingField("Year".to_string()));
}

#[test]
fn test_model_info_reflects_loaded_artifacts() {
    let info = service().model_info();
    assert_eq!(info.model_type, "XGBoost Regressor");
    assert_eq!(info.training_years, "2018-2022");
    assert_eq!(info.features.len(), 10);
    assert_eq!(info.features[4], "mmr_lag_1");
}

#[test]
fn test_reject_policy_on_existing_year() {
    let service = service().with_duplicate_policy(DuplicateYearPolicy::Reject);
    let err = service
        .predict(&PredictionRequest::for_year(2022))
        .unwrap_err();
    assert_eq!(err.to_string(), "Year 2022 already exists in historical data");
    assert!(err.is_client_error());
}

#[test]
fn test_reconstruction_matches_across_calls() {
    let series = read_series(SERIES.as_bytes()).unwrap();
    let reconstructor = FeatureReconstructor::default();
    let a = reconstructor
        .reconstruct(&series, Observation::new(2023))
        .unwrap();
    let b = reconstructor
        .reconstruct(&series, Observation::new(2023))
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(a.derived.mmr_lag_1, Some(400.0));
    assert_eq!(a.derived.mmr_lag_2, Some(410.0));
}

#[test]
fn test_gap_year_uses_position_not_calendar() {
    let series = read_series(SERIES.as_bytes()).unwrap();
    let row = FeatureReconstructor::default()
        .reconstruct(&series, Observation::new(2030))
        .unwrap();
    assert_eq!(row.derived.mmr_lag_1, Some(400.0));
    assert_eq!(row.derived.mmr_lag_2, Some(410.0));
}
