//! Proctor Server: online exam proctoring platform.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use proctor_core::config::AppConfig;
use proctor_core::error::AppError;
use proctor_database::DatabasePool;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from `PROCTOR_CONFIG_DIR` (default `config`) and the
/// `PROCTOR_ENV` overlay (default `development`).
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_dir = std::env::var("PROCTOR_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("PROCTOR_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load_from(&config_dir, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Proctor");

    tracing::info!("Connecting to database...");
    let db = DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    proctor_database::migration::run_migrations(db.pool()).await?;
    tracing::info!("Database migrations complete");

    proctor_api::run_server(config, db).await
}
