//! User Service Library
//!
//! Storage layer for end-user and administrator accounts on PostgreSQL:
//! repositories with soft delete, existence checks, credential rotation and a
//! thin service layer that bounds every call with a deadline.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection};
use tracing::info;

use common::AppResult;

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::repository::{AdminStore, UserStore};
use crate::service::{AdminManager, AdminService, UserManager, UserService};

/// Service handles sharing one connection pool.
#[derive(Clone)]
pub struct Services {
    pub users: Arc<dyn UserService>,
    pub admins: Arc<dyn AdminService>,
}

/// Wire repositories and services onto an open connection.
pub fn build_services(db: Arc<DatabaseConnection>, config: &UserServiceConfig) -> Services {
    let deadline = config.deadline.timeout();

    let user_repo = Arc::new(UserStore::new(Arc::clone(&db)));
    let admin_repo = Arc::new(AdminStore::new(db));

    Services {
        users: Arc::new(UserManager::new(user_repo, deadline)),
        admins: Arc::new(AdminManager::new(admin_repo, deadline)),
    }
}

/// Connect, apply pending migrations and build the services.
pub async fn connect(config: &UserServiceConfig) -> AppResult<Services> {
    let db = Database::connect(&config.database).await?;
    Ok(build_services(db.pool(), config))
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(config: &UserServiceConfig, action: MigrateAction) -> AppResult<()> {
    let db = Database::open(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Check that the database answers.
pub async fn ping(config: &UserServiceConfig) -> AppResult<()> {
    let db = Database::open(&config.database).await?;
    db.ping().await?;
    info!(backend = ?db.pool().get_database_backend(), "Database reachable");
    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
