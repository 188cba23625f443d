//! Connection pool and schema lifecycle for the account tables.

use std::sync::Arc;

use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection, DbErr};
use sea_orm_migration::{MigrationStatus, MigratorTrait};

use common::DatabaseConfig;

use super::migrations::Migrator;

/// Owns the shared pool handed to every store.
pub struct Database {
    pool: Arc<DatabaseConnection>,
}

impl Database {
    /// Open the pool and bring the `users` and `admins` tables up to date.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let db = Self::open(config).await?;

        Migrator::up(db.pool.as_ref(), None).await?;
        tracing::info!(
            max_connections = config.max_connections,
            "Account tables ready"
        );

        Ok(db)
    }

    /// Open the pool and leave the schema untouched.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .sqlx_logging(false);

        let connection = SeaDatabase::connect(options).await?;
        Ok(Self {
            pool: Arc::new(connection),
        })
    }

    /// Shared handle for stores.
    pub fn pool(&self) -> Arc<DatabaseConnection> {
        Arc::clone(&self.pool)
    }

    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(self.pool.as_ref(), None).await
    }

    /// Undo the most recent migration only.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(self.pool.as_ref(), Some(1)).await
    }

    /// Every known migration paired with whether it has been applied.
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        let migrations = Migrator::get_migration_with_status(self.pool.as_ref()).await?;

        Ok(migrations
            .iter()
            .map(|m| (m.name().to_string(), m.status() == MigrationStatus::Applied))
            .collect())
    }

    /// Drop every table and replay all migrations. Destroys stored accounts.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        tracing::warn!("Dropping account tables");
        Migrator::fresh(self.pool.as_ref()).await
    }

    pub async fn ping(&self) -> Result<(), DbErr> {
        self.pool.ping().await
    }
}
