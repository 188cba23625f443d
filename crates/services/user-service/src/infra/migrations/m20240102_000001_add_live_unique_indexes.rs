//! Migration: Enforce uniqueness of contact details among live rows.
//!
//! The indexes are partial (`WHERE deleted_at IS NULL`) so a soft-deleted
//! account does not block re-registration with the same phone or email.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

const UP: &[&str] = &[
    "CREATE UNIQUE INDEX IF NOT EXISTS uq_users_live_phone_number \
     ON users (phone_number) WHERE deleted_at IS NULL",
    "CREATE UNIQUE INDEX IF NOT EXISTS uq_admins_live_phone_number \
     ON admins (phone_number) WHERE deleted_at IS NULL",
    "CREATE UNIQUE INDEX IF NOT EXISTS uq_admins_live_email \
     ON admins (email) WHERE deleted_at IS NULL",
];

const DOWN: &[&str] = &[
    "DROP INDEX IF EXISTS uq_admins_live_email",
    "DROP INDEX IF EXISTS uq_admins_live_phone_number",
    "DROP INDEX IF EXISTS uq_users_live_phone_number",
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for sql in UP {
            db.execute_unprepared(sql).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for sql in DOWN {
            db.execute_unprepared(sql).await?;
        }
        Ok(())
    }
}
