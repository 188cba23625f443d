//! Service layer: deadline-bounded storage operations.

mod admin_service;
pub mod deadline;
mod user_service;

pub use admin_service::{AdminManager, AdminService};
pub use deadline::with_deadline;
pub use user_service::{UserManager, UserService};
