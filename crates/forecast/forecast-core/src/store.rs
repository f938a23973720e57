//! Historical series store backed by a CSV file.

use forecast_spi::feature::{is_computed, MMR, YEAR};
use forecast_spi::{HistoricalSeries, LoadError, Observation, SeriesSource};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Reads the historical series from a CSV file with a header row.
///
/// `year` and `MMR` columns are required; every other numeric column is a
/// covariate. Columns named after derived features are ignored because those
/// are always recomputed.
#[derive(Debug, Clone)]
pub struct CsvSeriesSource {
    path: PathBuf,
}

impl CsvSeriesSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SeriesSource for CsvSeriesSource {
    fn load(&self) -> Result<HistoricalSeries, LoadError> {
        let file = File::open(&self.path)
            .map_err(|e| LoadError::Io(format!("{}: {}", self.path.display(), e)))?;
        read_series(BufReader::new(file))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parse a historical series from any CSV reader.
pub fn read_series<R: Read>(input: R) -> Result<HistoricalSeries, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| LoadError::Csv(e.to_string()))?
        .clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
    };
    let year_idx = column(YEAR)?;
    let mmr_idx = column(MMR)?;

    let covariate_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|&(idx, name)| {
            idx != year_idx && idx != mmr_idx && !name.is_empty() && !is_computed(name)
        })
        .map(|(idx, name)| (idx, name.to_string()))
        .collect();

    let mut observations = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| LoadError::Csv(e.to_string()))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let mut observation = Observation::new(parse_year(field(year_idx), line)?);
        observation.mmr = parse_optional(field(mmr_idx), line, MMR)?;
        for (idx, name) in &covariate_columns {
            let value = parse_optional(field(*idx), line, name)?;
            observation = observation.with_optional_covariate(name.as_str(), value);
        }
        observations.push(observation);
    }

    if observations.is_empty() {
        return Err(LoadError::EmptySeries);
    }
    HistoricalSeries::from_observations(observations)
}

fn parse_optional(raw: &str, line: u64, column: &str) -> Result<Option<f64>, LoadError> {
    if raw.is_empty()
        || matches!(
            raw.to_ascii_lowercase().as_str(),
            "nan" | "na" | "n/a" | "null" | "none"
        )
    {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(|v| v.is_finite().then_some(v))
        .map_err(|_| LoadError::InvalidValue {
            line,
            column: column.to_string(),
            value: raw.to_string(),
        })
}

fn parse_year(raw: &str, line: u64) -> Result<i32, LoadError> {
    let invalid = || LoadError::InvalidValue {
        line,
        column: YEAR.to_string(),
        value: raw.to_string(),
    };
    let value = parse_optional(raw, line, YEAR)?.ok_or_else(invalid)?;
    if value.fract() != 0.0 || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return Err(invalid());
    }
    Ok(value as i32)
}

/// Process-wide holder of the immutable historical series.
///
/// Snapshots are cheap shared handles; nothing can mutate the series after
/// load, so concurrent requests read it without locking.
#[derive(Debug, Clone)]
pub struct SeriesStore {
    series: Arc<HistoricalSeries>,
}

impl SeriesStore {
    pub fn new(series: HistoricalSeries) -> Self {
        Self {
            series: Arc::new(series),
        }
    }

    /// Load the series once from a source.
    pub fn load<S: SeriesSource + ?Sized>(source: &S) -> Result<Self, LoadError> {
        let series = source.load()?;
        info!(
            source = %source.describe(),
            rows = series.len(),
            "historical series loaded"
        );
        Ok(Self::new(series))
    }

    /// Shared read-only view of the series, sorted ascending by year.
    pub fn snapshot(&self) -> Arc<HistoricalSeries> {
        Arc::clone(&self.series)
    }

    pub fn series(&self) -> &HistoricalSeries {
        &self.series
    }
}
