//! Database migration management commands.

use clap::{Args, Subcommand};

use crate::output;
use proctor_core::config::AppConfig;
use proctor_core::error::AppError;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    let db = super::create_db_pool(config).await?;

    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            proctor_database::migration::run_migrations(db.pool()).await?;
            output::print_success("All migrations applied successfully.");
        }
    }

    db.close().await;
    Ok(())
}
