//! Historical data source trait definition.

use crate::error::LoadError;
use crate::model::HistoricalSeries;

/// Source of the historical series, read once at startup.
pub trait SeriesSource {
    /// Load and validate the full series. Failure aborts startup.
    fn load(&self) -> Result<HistoricalSeries, LoadError>;

    /// Human-readable description of where the data comes from.
    fn describe(&self) -> String {
        "historical series".to_string()
    }
}
