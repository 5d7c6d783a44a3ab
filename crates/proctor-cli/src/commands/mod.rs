//! CLI command definitions and dispatch.

pub mod migrate;
pub mod serve;
pub mod user;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

use proctor_core::config::{AppConfig, LoggingConfig};
use proctor_core::error::AppError;
use proctor_database::DatabasePool;

/// Proctor: online exam proctoring platform
#[derive(Debug, Parser)]
#[command(name = "proctor", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and per-environment overrides
    #[arg(short, long, default_value = "config")]
    pub config: String,

    /// Environment overlay to load (`{config}/{env}.toml`)
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the Proctor server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load_from(&self.config, &self.env)?;

        match &self.command {
            Commands::Serve(args) => {
                init_logging(&config.logging);
                serve::execute(args, config).await
            }
            Commands::Migrate(args) => {
                init_logging(&LoggingConfig {
                    level: "warn".to_string(),
                    format: "pretty".to_string(),
                });
                migrate::execute(args, &config).await
            }
            Commands::User(args) => {
                init_logging(&LoggingConfig {
                    level: "warn".to_string(),
                    format: "pretty".to_string(),
                });
                user::execute(args, &config).await
            }
        }
    }
}

/// Initialize tracing; `RUST_LOG` overrides the configured level.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = match config.format.as_str() {
        "json" => fmt().json().with_env_filter(filter).with_target(true).try_init(),
        _ => fmt().compact().with_env_filter(filter).try_init(),
    };
    if let Err(e) = result {
        eprintln!("Logging already initialized: {}", e);
    }
}

/// Helper: connect to the database from config
pub async fn create_db_pool(config: &AppConfig) -> Result<DatabasePool, AppError> {
    DatabasePool::connect(&config.database).await
}
