//! # mmr-server
//!
//! REST API server for maternal mortality ratio point forecasts.
//! Loads the historical series, feature spec and model once at startup and
//! serves predictions from them.

use forecast_facade::{bootstrap, PredictionService, ServiceConfig};
use std::env;
use std::net::SocketAddr;
use std::process;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod routes;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    service: Arc<PredictionService>,
}

impl AppState {
    pub fn new(service: PredictionService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mmr_server=info,forecast_core=info,tower_http=info".into()),
        )
        .init();

    let config = match ServiceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            process::exit(1);
        }
    };

    // Artifacts are loaded once; any failure is fatal
    let service = match bootstrap(&config) {
        Ok(service) => service,
        Err(e) => {
            tracing::error!(
                data = %config.data_path.display(),
                features = %config.features_path.display(),
                model = %config.model_path.display(),
                "failed to load artifacts: {}",
                e
            );
            process::exit(1);
        }
    };

    let app = routes::router(AppState::new(service));

    // Server configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .expect("PORT must be a valid number");
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("Invalid HOST:PORT configuration");

    tracing::info!("mmr-server v{} listening on {}", env!("CARGO_PKG_VERSION"), addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("failed to bind {}: {}", addr, e);
            process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("server error: {}", e);
        process::exit(1);
    }
}
