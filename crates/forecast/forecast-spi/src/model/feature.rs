//! Feature names, the feature spec and derived feature rows.

use crate::error::LoadError;
use crate::model::Observation;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const YEAR: &str = "year";
pub const MMR: &str = "MMR";
pub const MMR_LAG_1: &str = "mmr_lag_1";
pub const MMR_LAG_2: &str = "mmr_lag_2";
pub const MMR_3YR_AVG: &str = "mmr_3yr_avg";
pub const MMR_5YR_AVG: &str = "mmr_5yr_avg";
pub const TREND_SLOPE: &str = "trend_slope";
pub const RISK_FLAG: &str = "risk_flag";

/// Placeholder value emitted for `risk_flag`.
pub const RISK_FLAG_VALUE: f64 = 0.0;

/// Features recomputed from the MMR column on every request.
pub const DERIVED_FEATURES: [&str; 5] =
    [MMR_LAG_1, MMR_LAG_2, MMR_3YR_AVG, MMR_5YR_AVG, TREND_SLOPE];

pub const SKILLED_BIRTH_ATTENDANCE: &str = "skilled_birth_attendance";
pub const ANTENATAL_CARE_COVERAGE: &str = "antenatal_care_coverage";
pub const HEALTH_SPENDING: &str = "health_spending";

/// Covariates a prediction request may carry.
pub const REQUEST_COVARIATES: [&str; 3] = [
    SKILLED_BIRTH_ATTENDANCE,
    ANTENATAL_CARE_COVERAGE,
    HEALTH_SPENDING,
];

/// Whether `name` is produced by the reconstructor rather than read from a row.
pub fn is_computed(name: &str) -> bool {
    name == RISK_FLAG || DERIVED_FEATURES.contains(&name)
}

/// Ordered list of features the model consumes.
///
/// Defines both the column order handed to the oracle and the set of fields
/// the reconstructor must produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureSpec {
    names: Vec<String>,
}

impl FeatureSpec {
    /// Create a feature spec. Names must be non-empty and unique.
    pub fn new<I, S>(names: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(LoadError::InvalidFeatureSpec(
                "feature list is empty".to_string(),
            ));
        }
        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if name.trim().is_empty() {
                return Err(LoadError::InvalidFeatureSpec(
                    "feature name is blank".to_string(),
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(LoadError::InvalidFeatureSpec(format!(
                    "feature '{}' is listed twice",
                    name
                )));
            }
        }
        Ok(Self { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Column index of a feature.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.names.iter()
    }
}

impl TryFrom<Vec<String>> for FeatureSpec {
    type Error = LoadError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<FeatureSpec> for Vec<String> {
    fn from(spec: FeatureSpec) -> Self {
        spec.names
    }
}

/// Temporal features computed for one row of the merged series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedFeatures {
    pub mmr_lag_1: Option<f64>,
    pub mmr_lag_2: Option<f64>,
    pub mmr_3yr_avg: Option<f64>,
    pub mmr_5yr_avg: Option<f64>,
    pub trend_slope: Option<f64>,
}

impl DerivedFeatures {
    /// Look up a derived feature by name; `None` for names that are not derived.
    pub fn get(&self, name: &str) -> Option<Option<f64>> {
        match name {
            MMR_LAG_1 => Some(self.mmr_lag_1),
            MMR_LAG_2 => Some(self.mmr_lag_2),
            MMR_3YR_AVG => Some(self.mmr_3yr_avg),
            MMR_5YR_AVG => Some(self.mmr_5yr_avg),
            TREND_SLOPE => Some(self.trend_slope),
            _ => None,
        }
    }
}

/// An observation augmented with its derived temporal features.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedRow {
    pub observation: Observation,
    pub derived: DerivedFeatures,
    pub risk_flag: f64,
}

impl DerivedRow {
    pub fn new(observation: Observation, derived: DerivedFeatures) -> Self {
        Self {
            observation,
            derived,
            risk_flag: RISK_FLAG_VALUE,
        }
    }

    pub fn year(&self) -> i32 {
        self.observation.year
    }

    /// Value of any named field of the row.
    ///
    /// Names that are neither fixed nor derived resolve to the covariate of the
    /// same name, which is missing when the row does not carry it.
    pub fn feature(&self, name: &str) -> Option<f64> {
        match name {
            YEAR => Some(f64::from(self.observation.year)),
            MMR => self.observation.mmr,
            RISK_FLAG => Some(self.risk_flag),
            _ => match self.derived.get(name) {
                Some(value) => value,
                None => self.observation.covariate(name),
            },
        }
    }
}

/// Feature values in [`FeatureSpec`] order, ready for the oracle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    names: Vec<String>,
    values: Vec<Option<f64>>,
}

impl FeatureVector {
    /// Extract exactly the feature spec's fields from a derived row, in its order.
    pub fn from_row(spec: &FeatureSpec, row: &DerivedRow) -> Self {
        Self {
            names: spec.names().to_vec(),
            values: spec.iter().map(|name| row.feature(name)).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value by feature name. Missing and unknown both yield `None`.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .and_then(|idx| self.values[idx])
    }

    /// `(name, value)` pairs in spec order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<f64>)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}
