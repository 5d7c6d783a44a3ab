//! Start the Proctor server.

use clap::Args;

use proctor_core::config::AppConfig;
use proctor_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Do not apply pending migrations on startup
    #[arg(long)]
    pub skip_migrations: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }

    tracing::info!(host = %config.server.host, port = config.server.port, "Starting Proctor server");

    let db = super::create_db_pool(&config).await?;

    if !args.skip_migrations {
        tracing::info!("Running database migrations...");
        proctor_database::migration::run_migrations(db.pool()).await?;
    }

    proctor_api::run_server(config, db).await
}
