//! User domain entity and related types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::DomainError;

/// End-user account.
///
/// Nullable storage columns are carried as zero values: an empty `birth_date`
/// and a default (epoch) `updated_at` both mean "no value".
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct User {
    #[validate(length(min = 1, max = 64))]
    pub id: String,
    /// Storage-assigned sequence number, ignored on write
    pub user_order: i64,
    #[validate(length(max = 100))]
    pub first_name: String,
    #[validate(length(max = 100))]
    pub last_name: String,
    pub birth_date: String,
    #[validate(length(min = 1, max = 20))]
    pub phone_number: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub gender: String,
    #[serde(skip_serializing)]
    pub refresh_token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Fill in the identifier and creation time when the caller left them empty.
    pub fn assign_identity(&mut self) {
        if self.id.is_empty() {
            self.id = Uuid::new_v4().to_string();
        }
        if self.created_at == DateTime::<Utc>::default() {
            self.created_at = Utc::now();
        }
    }

    /// Stamp the modification time.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Check whether the record has ever been updated
    pub fn is_updated(&self) -> bool {
        self.updated_at != DateTime::<Utc>::default()
    }
}

/// Columns of the users table that may be checked for existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserField {
    Id,
    FirstName,
    LastName,
    BirthDate,
    PhoneNumber,
    Gender,
    RefreshToken,
}

impl UserField {
    /// Storage column backing this field.
    pub fn column(&self) -> &'static str {
        match self {
            UserField::Id => "id",
            UserField::FirstName => "first_name",
            UserField::LastName => "last_name",
            UserField::BirthDate => "birth_date",
            UserField::PhoneNumber => "phone_number",
            UserField::Gender => "gender",
            UserField::RefreshToken => "refresh_token",
        }
    }
}

impl FromStr for UserField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(UserField::Id),
            "first_name" => Ok(UserField::FirstName),
            "last_name" => Ok(UserField::LastName),
            "birth_date" => Ok(UserField::BirthDate),
            "phone_number" => Ok(UserField::PhoneNumber),
            "gender" => Ok(UserField::Gender),
            "refresh_token" => Ok(UserField::RefreshToken),
            other => Err(DomainError::validation(format!(
                "field '{}' cannot be checked on users",
                other
            ))),
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
