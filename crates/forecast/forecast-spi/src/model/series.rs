//! Immutable historical series

use crate::error::LoadError;
use crate::model::{HistoryPoint, Observation};
use std::collections::BTreeSet;

/// Time-ordered table of past observations.
///
/// Always sorted ascending by `year` with at most one observation per year.
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoricalSeries {
    observations: Vec<Observation>,
}

impl HistoricalSeries {
    /// Build a series from observations in load order.
    ///
    /// The sort is stable, so rows sharing a year keep their load order, but a
    /// repeated year is rejected.
    pub fn from_observations(mut observations: Vec<Observation>) -> Result<Self, LoadError> {
        observations.sort_by_key(|o| o.year);
        if let Some(pair) = observations.windows(2).find(|w| w[0].year == w[1].year) {
            return Err(LoadError::DuplicateYear(pair[0].year));
        }
        Ok(Self { observations })
    }

    /// Observations in ascending year order.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Read-only copy of the series in ascending year order.
    pub fn snapshot(&self) -> HistoricalSeries {
        self.clone()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    /// Observation for a given year, if present.
    pub fn get(&self, year: i32) -> Option<&Observation> {
        self.observations
            .binary_search_by_key(&year, |o| o.year)
            .ok()
            .map(|idx| &self.observations[idx])
    }

    /// First and last year of the series.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        match (self.observations.first(), self.observations.last()) {
            (Some(first), Some(last)) => Some((first.year, last.year)),
            _ => None,
        }
    }

    /// `(year, MMR)` pairs for every row with an observed MMR.
    pub fn history(&self) -> Vec<HistoryPoint> {
        self.observations
            .iter()
            .filter_map(|o| o.mmr.map(|mmr| HistoryPoint { year: o.year, mmr }))
            .collect()
    }

    /// Names of every covariate observed in at least one row.
    pub fn covariate_names(&self) -> BTreeSet<String> {
        self.observations
            .iter()
            .flat_map(|o| o.covariates.keys().cloned())
            .collect()
    }
}

impl<'a> IntoIterator for &'a HistoricalSeries {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}
