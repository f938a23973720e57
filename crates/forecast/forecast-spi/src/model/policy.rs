//! Duplicate-year handling policy

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What to do when the query year already exists in the historical series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateYearPolicy {
    /// The query observation replaces the historical row in the merged copy
    #[default]
    Replace,
    /// The request is rejected
    Reject,
}

impl FromStr for DuplicateYearPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" => Ok(Self::Replace),
            "reject" => Ok(Self::Reject),
            other => Err(format!(
                "unknown duplicate year policy '{}', expected 'replace' or 'reject'",
                other
            )),
        }
    }
}

impl fmt::Display for DuplicateYearPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace => write!(f, "replace"),
            Self::Reject => write!(f, "reject"),
        }
    }
}
