//! Domain layer - Core account entities and query value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Both the storage engine and its callers share these types.

pub mod admin;
pub mod constants;
pub mod error;
pub mod query;
pub mod user;

pub use admin::{Admin, AdminContact, AdminField};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use query::{Filter, Pagination};
pub use user::{User, UserField};
