//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{FromQueryResult, Value};

use domain::User;

use super::AccountTable;
use crate::repository::nullable::{decode, encode_text, encode_timestamp};

pub const TABLE_NAME: &str = "users";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_order: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<String>,
    pub phone_number: String,
    pub password: String,
    pub gender: String,
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
    const ORDINAL: Column = Column::UserOrder;
    const CREATED_AT: Column = Column::CreatedAt;
    const DELETED_AT: Column = Column::DeletedAt;
    const PROJECTION: &'static [Column] = &[
        Column::Id,
        Column::UserOrder,
        Column::FirstName,
        Column::LastName,
        Column::BirthDate,
        Column::PhoneNumber,
        Column::Password,
        Column::Gender,
        Column::RefreshToken,
        Column::CreatedAt,
        Column::UpdatedAt,
    ];
}

/// A users row as read through the fixed projection.
#[derive(Debug, Clone, FromQueryResult)]
pub struct UserRow {
    pub id: String,
    pub user_order: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<String>,
    pub phone_number: String,
    pub password: String,
    pub gender: String,
    pub refresh_token: String,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

/// Convert a projected row to the domain entity
impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            user_order: row.user_order,
            first_name: row.first_name,
            last_name: row.last_name,
            birth_date: decode(row.birth_date),
            phone_number: row.phone_number,
            password: row.password,
            gender: row.gender,
            refresh_token: row.refresh_token,
            created_at: row.created_at,
            updated_at: decode(row.updated_at),
        }
    }
}

/// Columns written on insert. The ordinal and the soft delete marker are
/// never part of this set.
pub fn insert_values(user: &User) -> Vec<(Column, Value)> {
    vec![
        (Column::Id, user.id.clone().into()),
        (Column::FirstName, user.first_name.clone().into()),
        (Column::LastName, user.last_name.clone().into()),
        (Column::BirthDate, encode_text(&user.birth_date)),
        (Column::PhoneNumber, user.phone_number.clone().into()),
        (Column::Password, user.password.clone().into()),
        (Column::Gender, user.gender.clone().into()),
        (Column::RefreshToken, user.refresh_token.clone().into()),
        (Column::CreatedAt, user.created_at.into()),
    ]
}

/// Columns replaced on update. Credentials other than the password are
/// rotated through dedicated statements.
pub fn update_values(user: &User) -> Vec<(Column, Value)> {
    vec![
        (Column::FirstName, user.first_name.clone().into()),
        (Column::LastName, user.last_name.clone().into()),
        (Column::BirthDate, encode_text(&user.birth_date)),
        (Column::PhoneNumber, user.phone_number.clone().into()),
        (Column::Password, user.password.clone().into()),
        (Column::Gender, user.gender.clone().into()),
        (Column::UpdatedAt, encode_timestamp(user.updated_at)),
    ]
}
