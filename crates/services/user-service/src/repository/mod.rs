//! Repository layer for data access.

mod admin_repository;
mod credentials;
pub mod entities;
mod existence;
pub mod nullable;
mod predicate;
pub mod query_builder;
pub mod soft_delete;
mod user_repository;

pub use admin_repository::{AdminRepository, AdminStore};
pub use credentials::CredentialRotator;
pub use existence::ExistenceChecker;
pub use predicate::ContactPredicate;
pub use query_builder::QueryBuilder;
pub use user_repository::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use admin_repository::MockAdminRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
