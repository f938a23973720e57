//! # mmr-cli
//!
//! Command-line interface for maternal mortality ratio point forecasts.

use clap::{Args, Parser, Subcommand};
use forecast_facade::{
    bootstrap, DuplicateYearPolicy, FeatureVector, PredictionRequest, PredictionService,
    ServiceConfig,
};
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "mmr")]
#[command(about = "Maternal mortality ratio forecasting CLI", long_about = None)]
struct Cli {
    /// Historical series CSV (default: $MMR_DATA_PATH)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Feature name list (default: $MMR_FEATURES_PATH)
    #[arg(long, global = true)]
    features: Option<PathBuf>,

    /// Model artifact (default: $MMR_MODEL_PATH)
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    /// Query year already in history: replace or reject
    #[arg(long, global = true)]
    duplicate_year: Option<DuplicateYearPolicy>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict MMR for a year
    Predict {
        #[command(flatten)]
        query: Query,

        /// Output file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the historical (year, MMR) series
    History {
        /// Output file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Describe the loaded model and data
    ModelInfo,

    /// Show the feature vector the model receives for a year
    Features {
        #[command(flatten)]
        query: Query,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
struct Query {
    /// Year to forecast
    #[arg(short, long)]
    year: i32,

    /// Skilled birth attendance (%)
    #[arg(long)]
    sba: Option<f64>,

    /// Antenatal care coverage (%)
    #[arg(long)]
    anc: Option<f64>,

    /// Health spending (% of GDP)
    #[arg(long)]
    health_spending: Option<f64>,
}

impl Query {
    fn to_request(&self) -> PredictionRequest {
        PredictionRequest {
            year: Some(f64::from(self.year)),
            skilled_birth_attendance: self.sba,
            antenatal_care_coverage: self.anc,
            health_spending: self.health_spending,
        }
    }
}

/// Environment config overridden by command-line flags
fn build_config(cli: &Cli) -> CliResult<ServiceConfig> {
    let mut config = ServiceConfig::from_env().map_err(|e| e.to_string())?;
    if let Some(path) = &cli.data {
        config.data_path = path.clone();
    }
    if let Some(path) = &cli.features {
        config.features_path = path.clone();
    }
    if let Some(path) = &cli.model {
        config.model_path = path.clone();
    }
    if let Some(policy) = cli.duplicate_year {
        config.duplicate_year = policy;
    }
    Ok(config)
}

/// Write JSON to file or stdout
fn write_json<T: Serialize>(value: &T, output: Option<&PathBuf>) -> CliResult<()> {
    if let Some(path) = output {
        let mut file = File::create(path).map_err(|e| format!("Failed to create output: {}", e))?;
        serde_json::to_writer_pretty(&mut file, value)
            .map_err(|e| format!("Failed to write JSON: {}", e))?;
        println!("Results written to {:?}", path);
    } else {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| format!("Failed to encode JSON: {}", e))?;
        println!("{}", json);
    }
    Ok(())
}

/// Render a feature vector as an aligned name/value table
fn format_features(features: &FeatureVector) -> String {
    let width = features.names().iter().map(String::len).max().unwrap_or(0);
    features
        .iter()
        .map(|(name, value)| match value {
            Some(v) => format!("  {:<width$}  {}", name, v, width = width),
            None => format!("  {:<width$}  missing", name, width = width),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn run(service: &PredictionService, command: &Commands) -> CliResult<()> {
    match command {
        Commands::Predict { query, output } => {
            let result = service
                .predict(&query.to_request())
                .map_err(|e| e.to_string())?;
            write_json(&result, output.as_ref())
        }
        Commands::History { output } => write_json(&service.history(), output.as_ref()),
        Commands::ModelInfo => write_json(&service.model_info(), None),
        Commands::Features { query } => {
            let features = service
                .features_for(&query.to_request())
                .map_err(|e| e.to_string())?;
            println!("Features for {}:", query.year);
            println!("{}", format_features(&features));
            Ok(())
        }
    }
}

fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    // Logs go to stderr so JSON output stays clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = build_config(&cli)
        .and_then(|config| bootstrap(&config).map_err(|e| e.to_string()))
        .and_then(|service| run(&service, &cli.command));

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
