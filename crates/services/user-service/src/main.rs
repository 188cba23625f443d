//! User Service - account storage maintenance CLI.

use std::collections::HashMap;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::{AppError, AppResult};
use domain::{Filter, Pagination};
use user_service_lib::config::UserServiceConfig;
use user_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "User and admin account storage")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Check database connectivity
    Ping,
    /// Inspect or remove end-user accounts
    User {
        #[command(subcommand)]
        action: AccountCommands,
    },
    /// Inspect or remove administrator accounts
    Admin {
        #[command(subcommand)]
        action: AccountCommands,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[derive(Subcommand)]
enum AccountCommands {
    /// Print one live account
    Get { id: String },
    /// Print live accounts
    List(ListArgs),
    /// Soft delete an account
    Delete { id: String },
    /// Check whether a live account holds a value
    CheckField { field: String, value: String },
}

#[derive(Args)]
struct ListArgs {
    /// Maximum rows, 0 for no limit
    #[arg(long, default_value_t = 0)]
    limit: u64,
    #[arg(long, default_value_t = 0)]
    offset: u64,
    /// Filter as key=value (id, created_at)
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    filters: Vec<String>,
}

impl ListArgs {
    fn window_and_filters(&self) -> AppResult<(Pagination, Vec<Filter>)> {
        let mut pairs = HashMap::with_capacity(self.filters.len());
        for raw in &self.filters {
            let (key, value) = raw.split_once('=').ok_or_else(|| {
                AppError::validation(format!("filter '{}' is not KEY=VALUE", raw))
            })?;
            pairs.insert(key.to_string(), value.to_string());
        }

        Ok((Pagination::new(self.limit, self.offset), Filter::from_map(&pairs)?))
    }
}

fn json_failure(err: serde_json::Error) -> AppError {
    AppError::internal(format!("failed to render output: {}", err))
}

/// Line shown on stderr. The cause itself only goes to the log.
fn failure_line(err: &AppError) -> String {
    format!("error: {}", err.user_message())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = UserServiceConfig::from_env();

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(code = err.code(), error = ?err, "command failed");
            eprintln!("{}", failure_line(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: &UserServiceConfig) -> AppResult<()> {
    match command {
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            user_service_lib::run_migrations(config, migrate_action).await?;
        }
        Commands::Ping => {
            user_service_lib::ping(config).await?;
        }
        Commands::User { action } => {
            let users = user_service_lib::connect(config).await?.users;
            match action {
                AccountCommands::Get { id } => {
                    let user = users.get_user(&id).await?;
                    println!("{}", serde_json::to_string_pretty(&user).map_err(json_failure)?);
                }
                AccountCommands::List(args) => {
                    let (page, filters) = args.window_and_filters()?;
                    let rows = users.list_users(page, filters).await?;
                    println!("{}", serde_json::to_string_pretty(&rows).map_err(json_failure)?);
                }
                AccountCommands::Delete { id } => {
                    users.delete_user(&id).await?;
                    tracing::info!(id = %id, "User deleted");
                }
                AccountCommands::CheckField { field, value } => {
                    println!("{}", users.check_field(&field, &value).await?);
                }
            }
        }
        Commands::Admin { action } => {
            let admins = user_service_lib::connect(config).await?.admins;
            match action {
                AccountCommands::Get { id } => {
                    let admin = admins.get_admin(&id).await?;
                    println!("{}", serde_json::to_string_pretty(&admin).map_err(json_failure)?);
                }
                AccountCommands::List(args) => {
                    let (page, filters) = args.window_and_filters()?;
                    let rows = admins.list_admins(page, filters).await?;
                    println!("{}", serde_json::to_string_pretty(&rows).map_err(json_failure)?);
                }
                AccountCommands::Delete { id } => {
                    admins.delete_admin(&id).await?;
                    tracing::info!(id = %id, "Admin deleted");
                }
                AccountCommands::CheckField { field, value } => {
                    println!("{}", admins.check_field(&field, &value).await?);
                }
            }
        }
    }

    Ok(())
}
