//! One row of the MMR time series.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single yearly observation.
///
/// Missing values are represented by absence: `mmr` is `None` for the query
/// year, and a covariate that was not observed has no entry in `covariates`.
/// Non-finite covariate values are treated as missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub year: i32,
    #[serde(rename = "MMR")]
    pub mmr: Option<f64>,
    #[serde(default)]
    pub covariates: BTreeMap<String, f64>,
}

impl Observation {
    /// Create an observation with no MMR and no covariates.
    pub fn new(year: i32) -> Self {
        Self {
            year,
            mmr: None,
            covariates: BTreeMap::new(),
        }
    }

    /// Set the observed MMR.
    pub fn with_mmr(mut self, mmr: f64) -> Self {
        self.mmr = mmr.is_finite().then_some(mmr);
        self
    }

    /// Set a covariate value.
    pub fn with_covariate(self, name: impl Into<String>, value: f64) -> Self {
        self.with_optional_covariate(name, Some(value))
    }

    /// Set a covariate value that may be missing.
    pub fn with_optional_covariate(mut self, name: impl Into<String>, value: Option<f64>) -> Self {
        let name = name.into();
        match value.filter(|v| v.is_finite()) {
            Some(v) => {
                self.covariates.insert(name, v);
            }
            None => {
                self.covariates.remove(&name);
            }
        }
        self
    }

    /// Value of a covariate, `None` when missing.
    pub fn covariate(&self, name: &str) -> Option<f64> {
        self.covariates.get(name).copied()
    }
}
