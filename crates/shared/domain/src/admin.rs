//! Administrator domain entity and related types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::constants::ROLE_ADMIN;
use crate::error::DomainError;

/// Administrator account: every user attribute plus employment details.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct Admin {
    #[validate(length(min = 1, max = 64))]
    pub id: String,
    /// Storage-assigned sequence number, ignored on write
    pub admin_order: i64,
    pub role: String,
    #[validate(length(max = 100))]
    pub first_name: String,
    #[validate(length(max = 100))]
    pub last_name: String,
    pub birth_date: String,
    #[validate(length(min = 1, max = 20))]
    pub phone_number: String,
    #[validate(email)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub gender: String,
    #[validate(range(min = 0.0))]
    pub salary: f32,
    #[validate(length(max = 2000))]
    pub biography: String,
    pub start_work_year: String,
    pub end_work_year: String,
    #[validate(range(min = 0))]
    pub work_years: i64,
    #[serde(skip_serializing)]
    pub refresh_token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Admin {
    /// Fill in the identifier, creation time and role when the caller left them empty.
    pub fn assign_identity(&mut self) {
        if self.id.is_empty() {
            self.id = Uuid::new_v4().to_string();
        }
        if self.created_at == DateTime::<Utc>::default() {
            self.created_at = Utc::now();
        }
        if self.role.is_empty() {
            self.role = ROLE_ADMIN.to_string();
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

/// Contact pair identifying an administrator.
///
/// How the pair is matched depends on the operation: the creation guard
/// requires both values on the same row, password reset accepts either.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdminContact {
    pub phone_number: String,
    pub email: String,
}

impl AdminContact {
    pub fn new(phone_number: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            phone_number: phone_number.into(),
            email: email.into(),
        }
    }
}

impl From<&Admin> for AdminContact {
    fn from(admin: &Admin) -> Self {
        Self {
            phone_number: admin.phone_number.clone(),
            email: admin.email.clone(),
        }
    }
}

/// Columns of the admins table that may be checked for existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminField {
    Id,
    Role,
    FirstName,
    LastName,
    BirthDate,
    PhoneNumber,
    Email,
    Gender,
    RefreshToken,
}

impl AdminField {
    /// Storage column backing this field.
    pub fn column(&self) -> &'static str {
        match self {
            AdminField::Id => "id",
            AdminField::Role => "role",
            AdminField::FirstName => "first_name",
            AdminField::LastName => "last_name",
            AdminField::BirthDate => "birth_date",
            AdminField::PhoneNumber => "phone_number",
            AdminField::Email => "email",
            AdminField::Gender => "gender",
            AdminField::RefreshToken => "refresh_token",
        }
    }
}

impl FromStr for AdminField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(AdminField::Id),
            "role" => Ok(AdminField::Role),
            "first_name" => Ok(AdminField::FirstName),
            "last_name" => Ok(AdminField::LastName),
            "birth_date" => Ok(AdminField::BirthDate),
            "phone_number" => Ok(AdminField::PhoneNumber),
            "email" => Ok(AdminField::Email),
            "gender" => Ok(AdminField::Gender),
            "refresh_token" => Ok(AdminField::RefreshToken),
            other => Err(DomainError::validation(format!(
                "field '{}' cannot be checked on admins",
                other
            ))),
        }
    }
}

impl fmt::Display for AdminField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
