//! Contract module containing trait definitions for the forecast collaborators

mod model_oracle;
mod series_source;

pub use model_oracle::ModelOracle;
pub use series_source::SeriesSource;
