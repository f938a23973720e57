//! Feature reconstruction
//!
//! Splices one query observation into a disposable copy of the historical
//! series and recomputes every temporal feature the model was trained on.
//! The stored series is never touched.

use crate::window;
use forecast_spi::{
    DerivedFeatures, DerivedRow, DuplicateYearPolicy, FeatureSpec, FeatureVector, ForecastError,
    HistoricalSeries, Observation, Result,
};
use tracing::debug;

/// Trailing window of the short rolling average
pub const SHORT_WINDOW: usize = 3;
/// Trailing window of the long rolling average and of the trend slope
pub const LONG_WINDOW: usize = 5;
/// Present values required before a trend slope is emitted
pub const SLOPE_MIN_PERIODS: usize = 3;

/// Rebuilds the model's feature vector for a single query year.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureReconstructor {
    policy: DuplicateYearPolicy,
}

impl FeatureReconstructor {
    pub fn new(policy: DuplicateYearPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DuplicateYearPolicy {
        self.policy
    }

    /// Merge the observation into a copy of the series, sorted by year.
    ///
    /// A historical row with the same year is replaced or the request is
    /// rejected, depending on the duplicate-year policy.
    pub fn merge(
        &self,
        series: &HistoricalSeries,
        observation: Observation,
    ) -> Result<Vec<Observation>> {
        let year = observation.year;
        let mut merged: Vec<Observation> = series
            .iter()
            .filter(|o| o.year != year)
            .cloned()
            .collect();

        if merged.len() != series.len() {
            match self.policy {
                DuplicateYearPolicy::Reject => return Err(ForecastError::DuplicateYear(year)),
                DuplicateYearPolicy::Replace => {
                    debug!(year, "query year replaces historical row");
                }
            }
        }

        merged.push(observation);
        merged.sort_by_key(|o| o.year);
        Ok(merged)
    }

    /// Compute derived features for every row of a merged series.
    ///
    /// Rows must already be sorted by year; features only look at the current
    /// and preceding positions.
    pub fn derive_rows(merged: Vec<Observation>) -> Vec<DerivedRow> {
        let mmr: Vec<Option<f64>> = merged.iter().map(|o| o.mmr).collect();

        let lag_1 = window::lag(&mmr, 1);
        let lag_2 = window::lag(&mmr, 2);
        let avg_3 = window::rolling_mean(&mmr, SHORT_WINDOW);
        let avg_5 = window::rolling_mean(&mmr, LONG_WINDOW);
        let slope = window::trailing_slope(&mmr, LONG_WINDOW, SLOPE_MIN_PERIODS);

        merged
            .into_iter()
            .enumerate()
            .map(|(i, observation)| {
                let derived = DerivedFeatures {
                    mmr_lag_1: lag_1[i],
                    mmr_lag_2: lag_2[i],
                    mmr_3yr_avg: avg_3[i],
                    mmr_5yr_avg: avg_5[i],
                    trend_slope: slope[i],
                };
                DerivedRow::new(observation, derived)
            })
            .collect()
    }

    /// Derived row for the query year.
    ///
    /// Fails with [`ForecastError::InsufficientData`] unless both lag features
    /// are present, since the model cannot run without them.
    pub fn reconstruct(
        &self,
        series: &HistoricalSeries,
        observation: Observation,
    ) -> Result<DerivedRow> {
        let year = observation.year;
        let merged = self.merge(series, observation)?;

        let row = Self::derive_rows(merged)
            .into_iter()
            .find(|row| row.year() == year)
            .ok_or_else(|| {
                ForecastError::Internal(format!("query year {} missing after merge", year))
            })?;

        if row.derived.mmr_lag_1.is_none() || row.derived.mmr_lag_2.is_none() {
            debug!(year, "lag features unavailable for query year");
            return Err(ForecastError::InsufficientData { year });
        }

        Ok(row)
    }

    /// Reconstruct and extract the feature spec's fields, in its order.
    pub fn reconstruct_features(
        &self,
        series: &HistoricalSeries,
        observation: Observation,
        spec: &FeatureSpec,
    ) -> Result<FeatureVector> {
        let row = self.reconstruct(series, observation)?;
        Ok(FeatureVector::from_row(spec, &row))
    }
}
