//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use proctor_auth::{PasswordHasher, PasswordValidator};
use proctor_core::config::AppConfig;
use proctor_core::error::AppError;
use proctor_database::UserRepository;
use proctor_entity::user::{CreateUser, User, UserRole};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Create a user
    Create {
        /// Login email
        #[arg(long)]
        email: String,
        /// Full name
        #[arg(long)]
        name: String,
        /// STUDENT or INVIGILATOR
        #[arg(long, default_value = "STUDENT")]
        role: UserRole,
        /// Password (will prompt if not provided)
        #[arg(long)]
        password: Option<String>,
    },
    /// List all users, newest first
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Email
    email: String,
    /// Full name
    full_name: String,
    /// Role
    role: String,
    /// Created at
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            email: u.email.clone(),
            full_name: u.full_name.clone(),
            role: u.role.to_string(),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(args: &UserArgs, config: &AppConfig) -> Result<(), AppError> {
    let db = super::create_db_pool(config).await?;
    let user_repo = UserRepository::new(db.pool().clone());

    match &args.command {
        UserCommand::Create {
            email,
            name,
            role,
            password,
        } => {
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
            };

            PasswordValidator::new(&config.auth)
                .validate(&password, &[email.as_str(), name.as_str()])?;
            let hashed_password = PasswordHasher::new().hash_password(&password)?;

            let user = user_repo
                .create(&CreateUser {
                    email: email.trim().to_lowercase(),
                    full_name: name.clone(),
                    hashed_password,
                    role: *role,
                })
                .await?;

            output::print_success(&format!("User '{}' created ({}, {})", user.email, user.role, user.id));
        }
        UserCommand::List { format } => {
            let users = user_repo.find_all().await?;
            let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
            output::print_list(&rows, *format);
        }
    }

    db.close().await;
    Ok(())
}
