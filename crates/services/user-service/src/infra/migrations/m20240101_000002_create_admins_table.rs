//! Migration: Create admins table with soft delete column.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Admins::Id).string_len(64).not_null().primary_key())
                    .col(
                        ColumnDef::new(Admins::AdminOrder)
                            .big_integer()
                            .not_null()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Admins::Role).string_len(32).not_null())
                    .col(ColumnDef::new(Admins::FirstName).string().not_null().default(""))
                    .col(ColumnDef::new(Admins::LastName).string().not_null().default(""))
                    .col(ColumnDef::new(Admins::BirthDate).string_len(32).null())
                    .col(ColumnDef::new(Admins::PhoneNumber).string_len(20).not_null())
                    .col(ColumnDef::new(Admins::Email).string().not_null())
                    .col(ColumnDef::new(Admins::Password).text().not_null().default(""))
                    .col(ColumnDef::new(Admins::Gender).string_len(16).not_null().default(""))
                    .col(ColumnDef::new(Admins::Salary).float().not_null().default(0))
                    .col(ColumnDef::new(Admins::Biography).text().not_null().default(""))
                    .col(ColumnDef::new(Admins::StartWorkYear).string_len(32).null())
                    .col(ColumnDef::new(Admins::EndWorkYear).string_len(32).null())
                    .col(ColumnDef::new(Admins::WorkYears).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Admins::RefreshToken).text().not_null().default(""))
                    .col(
                        ColumnDef::new(Admins::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Admins::UpdatedAt).timestamp_with_time_zone().null())
                    .col(ColumnDef::new(Admins::DeletedAt).timestamp_with_time_zone().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_admins_deleted_at")
                    .table(Admins::Table)
                    .col(Admins::DeletedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Admins {
    Table,
    Id,
    AdminOrder,
    Role,
    FirstName,
    LastName,
    BirthDate,
    PhoneNumber,
    Email,
    Password,
    Gender,
    Salary,
    Biography,
    StartWorkYear,
    EndWorkYear,
    WorkYears,
    RefreshToken,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
