//! Admin service - runs admin storage operations under a deadline.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use common::{AppError, AppResult};
use domain::{Admin, AdminContact, AdminField, DomainError, Filter, Pagination};
use validator::Validate;

use super::deadline::with_deadline;
use crate::repository::AdminRepository;

/// Admin service trait for dependency injection.
#[async_trait]
pub trait AdminService: Send + Sync {
    /// Create an admin, defaulting id, creation time and role
    async fn create_admin(&self, admin: Admin) -> AppResult<Admin>;

    async fn get_admin(&self, id: &str) -> AppResult<Admin>;

    async fn list_admins(&self, page: Pagination, filters: Vec<Filter>) -> AppResult<Vec<Admin>>;

    async fn update_admin(&self, admin: Admin) -> AppResult<()>;

    async fn delete_admin(&self, id: &str) -> AppResult<()>;

    async fn check_field(&self, field: &str, value: &str) -> AppResult<bool>;

    /// Phone number and email on the same live row
    async fn if_exists(&self, contact: &AdminContact) -> AppResult<bool>;

    /// Phone number or email on any live row
    async fn if_exists_either(&self, contact: &AdminContact) -> AppResult<bool>;

    /// Reset the password of live admins matching the phone number or email
    async fn change_password(&self, contact: &AdminContact, new_password: &str)
        -> AppResult<bool>;

    async fn update_refresh_token(&self, id: &str, token: &str) -> AppResult<bool>;
}

/// Concrete implementation of AdminService using repository.
pub struct AdminManager {
    repo: Arc<dyn AdminRepository>,
    deadline: Duration,
}

impl AdminManager {
    pub fn new(repo: Arc<dyn AdminRepository>, deadline: Duration) -> Self {
        Self { repo, deadline }
    }
}

#[async_trait]
impl AdminService for AdminManager {
    async fn create_admin(&self, mut admin: Admin) -> AppResult<Admin> {
        with_deadline("adminRepo.Create", self.deadline, async {
            admin.assign_identity();
            admin.validate().map_err(DomainError::from)?;

            if self.repo.if_exists(&AdminContact::from(&admin)).await? {
                return Err(AppError::conflict("Admin"));
            }

            self.repo.create_and_fetch(&admin).await
        })
        .await
    }

    async fn get_admin(&self, id: &str) -> AppResult<Admin> {
        with_deadline("adminRepo.Get", self.deadline, self.repo.get(id)).await
    }

    async fn list_admins(&self, page: Pagination, filters: Vec<Filter>) -> AppResult<Vec<Admin>> {
        with_deadline("adminRepo.List", self.deadline, self.repo.list(page, &filters)).await
    }

    async fn update_admin(&self, mut admin: Admin) -> AppResult<()> {
        with_deadline("adminRepo.Update", self.deadline, async {
            admin.touch();
            admin.validate().map_err(DomainError::from)?;

            self.repo.update(&admin).await
        })
        .await
    }

    async fn delete_admin(&self, id: &str) -> AppResult<()> {
        with_deadline("adminRepo.Delete", self.deadline, self.repo.delete(id)).await
    }

    async fn check_field(&self, field: &str, value: &str) -> AppResult<bool> {
        with_deadline("adminRepo.CheckField", self.deadline, async {
            let field: AdminField = field.parse()?;
            self.repo.check_field(field, value).await
        })
        .await
    }

    async fn if_exists(&self, contact: &AdminContact) -> AppResult<bool> {
        with_deadline("adminRepo.IfExists", self.deadline, self.repo.if_exists(contact)).await
    }

    async fn if_exists_either(&self, contact: &AdminContact) -> AppResult<bool> {
        with_deadline(
            "adminRepo.IfExistsEither",
            self.deadline,
            self.repo.if_exists_either(contact),
        )
        .await
    }

    async fn change_password(
        &self,
        contact: &AdminContact,
        new_password: &str,
    ) -> AppResult<bool> {
        with_deadline(
            "adminRepo.ChangePassword",
            self.deadline,
            self.repo.change_password(contact, new_password),
        )
        .await
    }

    async fn update_refresh_token(&self, id: &str, token: &str) -> AppResult<bool> {
        with_deadline(
            "adminRepo.UpdateRefreshToken",
            self.deadline,
            self.repo.update_refresh_token(id, token),
        )
        .await
    }
}
