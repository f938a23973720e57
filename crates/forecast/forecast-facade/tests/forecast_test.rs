//! Unit tests for the forecast facade
//!
//! Window primitives and risk classification through the public API.

use forecast_facade::window::{lag, ols_slope, rolling_mean, trailing_slope};
use forecast_facade::{RiskClassifier, RiskLevel, RiskThresholds};

// ============================================================================
// Window Tests
// ============================================================================

#[test]
fn test_lag_by_position() {
    let values = [Some(5.0), None, Some(7.0)];
    assert_eq!(lag(&values, 1), vec![None, Some(5.0), None]);
    assert_eq!(lag(&values, 2), vec![None, None, Some(5.0)]);
}

#[test]
fn test_rolling_mean_needs_full_window() {
    let values = [Some(3.0), Some(6.0), Some(9.0), Some(12.0)];
    assert_eq!(rolling_mean(&values, 3), vec![None, None, Some(6.0), Some(9.0)]);
}

#[test]
fn test_rolling_mean_missing_inside_window() {
    let values = [Some(3.0), Some(6.0), Some(9.0), None];
    assert_eq!(rolling_mean(&values, 3), vec![None, None, Some(6.0), None]);
}

#[test]
fn test_trend_slope_needs_three_values() {
    let values = [Some(10.0), None, Some(8.0), None, None, Some(4.0)];
    let slopes = trailing_slope(&values, 5, 3);
    assert_eq!(slopes[2], None);
    assert_eq!(slopes[4], None);
    // Window [None, 8, None, None, 4] has two values only
    assert_eq!(slopes[5], None);
}

#[test]
fn test_trend_slope_reindexes_present_values() {
    let values = [Some(10.0), None, Some(8.0), None, Some(6.0)];
    let slopes = trailing_slope(&values, 5, 3);
    // 10, 8, 6 regressed against 0, 1, 2
    assert_eq!(slopes[4], Some(-2.0));
}

#[test]
fn test_ols_slope_flat_series() {
    assert_eq!(ols_slope(&[4.0, 4.0, 4.0]), Some(0.0));
    assert_eq!(ols_slope(&[4.0]), None);
}

// ============================================================================
// Risk Classification Tests
// ============================================================================

#[test]
fn test_classification_boundaries() {
    let classifier = RiskClassifier::default();
    assert_eq!(classifier.classify(1000.0), RiskLevel::Medium);
    assert_eq!(classifier.classify(1000.01), RiskLevel::High);
    assert_eq!(classifier.classify(500.0), RiskLevel::Low);
    assert_eq!(classifier.classify(500.01), RiskLevel::Medium);
}

#[test]
fn test_classification_is_monotonic() {
    let classifier = RiskClassifier::default();
    let rank = |level: RiskLevel| match level {
        RiskLevel::Low => 0,
        RiskLevel::Medium => 1,
        RiskLevel::High => 2,
    };
    let mut previous = 0;
    for step in 0..300 {
        let current = rank(classifier.classify(step as f64 * 5.0));
        assert!(current >= previous);
        previous = current;
    }
}

#[test]
fn test_threshold_labels() {
    let labels = RiskClassifier::new(RiskThresholds {
        high: 750.0,
        medium: 250.0,
    })
    .labels();
    assert_eq!(labels.high, "> 750");
    assert_eq!(labels.medium, "250-750");
    assert_eq!(labels.low, "<= 250");
}

#[test]
fn test_risk_level_labels() {
    assert_eq!(RiskLevel::High.to_string(), "High Risk");
    assert_eq!(RiskLevel::Medium.to_string(), "Medium Risk");
    assert_eq!(RiskLevel::Low.to_string(), "Low Risk");
}
