//! Migration: Create users table with soft delete column.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string_len(64).not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::UserOrder)
                            .big_integer()
                            .not_null()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Users::FirstName).string().not_null().default(""))
                    .col(ColumnDef::new(Users::LastName).string().not_null().default(""))
                    .col(ColumnDef::new(Users::BirthDate).string_len(32).null())
                    .col(ColumnDef::new(Users::PhoneNumber).string_len(20).not_null())
                    .col(ColumnDef::new(Users::Password).text().not_null().default(""))
                    .col(ColumnDef::new(Users::Gender).string_len(16).not_null().default(""))
                    .col(ColumnDef::new(Users::RefreshToken).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Users::UpdatedAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Users::DeletedAt).timestamp_with_time_zone().null())
                    .to_owned(),
            )
            .await?;

        // Index for efficient filtering of live users
        manager
            .create_index(
                Index::create()
                    .name("idx_users_deleted_at")
                    .table(Users::Table)
                    .col(Users::DeletedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    UserOrder,
    FirstName,
    LastName,
    BirthDate,
    PhoneNumber,
    Password,
    Gender,
    RefreshToken,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
