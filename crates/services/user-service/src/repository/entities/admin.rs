//! Admin database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{FromQueryResult, Value};

use domain::Admin;

use super::AccountTable;
use crate::repository::nullable::{decode, encode_text, encode_timestamp};

pub const TABLE_NAME: &str = "admins";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub admin_order: i64,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<String>,
    pub phone_number: String,
    pub email: String,
    pub password: String,
    pub gender: String,
    pub salary: f32,
    #[sea_orm(column_type = "Text")]
    pub biography: String,
    pub start_work_year: Option<String>,
    pub end_work_year: Option<String>,
    pub work_years: i64,
    pub refresh_token: String,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
    /// Soft delete timestamp (NULL = live, set = deleted)
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl AccountTable for Entity {
    const ID: Column = Column::Id;
    const ORDINAL: Column = Column::AdminOrder;
    const CREATED_AT: Column = Column::CreatedAt;
    const DELETED_AT: Column = Column::DeletedAt;
    const PROJECTION: &'static [Column] = &[
        Column::Id,
        Column::AdminOrder,
        Column::Role,
        Column::FirstName,
        Column::LastName,
        Column::BirthDate,
        Column::PhoneNumber,
        Column::Email,
        Column::Password,
        Column::Gender,
        Column::Salary,
        Column::Biography,
        Column::StartWorkYear,
        Column::EndWorkYear,
        Column::WorkYears,
        Column::RefreshToken,
        Column::CreatedAt,
        Column::UpdatedAt,
    ];
}

/// An admins row as read through the fixed projection.
#[derive(Debug, Clone, FromQueryResult)]
pub struct AdminRow {
    pub id: String,
    pub admin_order: i64,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<String>,
    pub phone_number: String,
    pub email: String,
    pub password: String,
    pub gender: String,
    pub salary: f32,
    pub biography: String,
    pub start_work_year: Option<String>,
    pub end_work_year: Option<String>,
    pub work_years: i64,
    pub refresh_token: String,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

/// Convert a projected row to the domain entity
impl From<AdminRow> for Admin {
    fn from(row: AdminRow) -> Self {
        Admin {
            id: row.id,
            admin_order: row.admin_order,
            role: row.role,
            first_name: row.first_name,
            last_name: row.last_name,
            birth_date: decode(row.birth_date),
            phone_number: row.phone_number,
            email: row.email,
            password: row.password,
            gender: row.gender,
            salary: row.salary,
            biography: row.biography,
            start_work_year: decode(row.start_work_year),
            end_work_year: decode(row.end_work_year),
            work_years: row.work_years,
            refresh_token: row.refresh_token,
            created_at: row.created_at,
            updated_at: decode(row.updated_at),
        }
    }
}

/// Columns written on insert. The ordinal and the soft delete marker are
/// never part of this set.
pub fn insert_values(admin: &Admin) -> Vec<(Column, Value)> {
    vec![
        (Column::Id, admin.id.clone().into()),
        (Column::Role, admin.role.clone().into()),
        (Column::FirstName, admin.first_name.clone().into()),
        (Column::LastName, admin.last_name.clone().into()),
        (Column::BirthDate, encode_text(&admin.birth_date)),
        (Column::PhoneNumber, admin.phone_number.clone().into()),
        (Column::Email, admin.email.clone().into()),
        (Column::Password, admin.password.clone().into()),
        (Column::Gender, admin.gender.clone().into()),
        (Column::Salary, admin.salary.into()),
        (Column::Biography, admin.biography.clone().into()),
        (Column::StartWorkYear, encode_text(&admin.start_work_year)),
        (Column::EndWorkYear, encode_text(&admin.end_work_year)),
        (Column::WorkYears, admin.work_years.into()),
        (Column::RefreshToken, admin.refresh_token.clone().into()),
        (Column::CreatedAt, admin.created_at.into()),
    ]
}

/// Columns replaced on update.
pub fn update_values(admin: &Admin) -> Vec<(Column, Value)> {
    vec![
        (Column::Role, admin.role.clone().into()),
        (Column::FirstName, admin.first_name.clone().into()),
        (Column::LastName, admin.last_name.clone().into()),
        (Column::BirthDate, encode_text(&admin.birth_date)),
        (Column::PhoneNumber, admin.phone_number.clone().into()),
        (Column::Email, admin.email.clone().into()),
        (Column::Password, admin.password.clone().into()),
        (Column::Gender, admin.gender.clone().into()),
        (Column::Salary, admin.salary.into()),
        (Column::Biography, admin.biography.clone().into()),
        (Column::StartWorkYear, encode_text(&admin.start_work_year)),
        (Column::EndWorkYear, encode_text(&admin.end_work_year)),
        (Column::WorkYears, admin.work_years.into()),
        (Column::UpdatedAt, encode_timestamp(admin.updated_at)),
    ]
}
