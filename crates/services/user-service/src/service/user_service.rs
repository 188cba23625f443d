//! User service - runs user storage operations under a deadline.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use common::{AppError, AppResult};
use domain::{DomainError, Filter, Pagination, User, UserField};
use validator::Validate;

use super::deadline::with_deadline;
use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a user, defaulting id and creation time, and return the stored row
    async fn create_user(&self, user: User) -> AppResult<User>;

    /// Get a live user by id
    async fn get_user(&self, id: &str) -> AppResult<User>;

    /// List live users
    async fn list_users(&self, page: Pagination, filters: Vec<Filter>) -> AppResult<Vec<User>>;

    /// Replace the updatable fields of a live user
    async fn update_user(&self, user: User) -> AppResult<()>;

    /// Soft delete a live user
    async fn delete_user(&self, id: &str) -> AppResult<()>;

    /// Whether a live user holds `value` in the named field
    async fn check_field(&self, field: &str, value: &str) -> AppResult<bool>;

    /// Whether a live user owns the phone number
    async fn if_exists(&self, phone_number: &str) -> AppResult<bool>;

    /// Reset the password of the live user with this phone number
    async fn change_password(&self, phone_number: &str, new_password: &str) -> AppResult<bool>;

    /// Store a new refresh token for a live user
    async fn update_refresh_token(&self, id: &str, token: &str) -> AppResult<bool>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    deadline: Duration,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>, deadline: Duration) -> Self {
        Self { repo, deadline }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, mut user: User) -> AppResult<User> {
        with_deadline("userRepo.Create", self.deadline, async {
            user.assign_identity();
            user.validate().map_err(DomainError::from)?;

            if self.repo.if_exists(&user.phone_number).await? {
                return Err(AppError::conflict("Phone number"));
            }

            self.repo.create_and_fetch(&user).await
        })
        .await
    }

    async fn get_user(&self, id: &str) -> AppResult<User> {
        with_deadline("userRepo.Get", self.deadline, self.repo.get(id)).await
    }

    async fn list_users(&self, page: Pagination, filters: Vec<Filter>) -> AppResult<Vec<User>> {
        with_deadline("userRepo.List", self.deadline, self.repo.list(page, &filters)).await
    }

    async fn update_user(&self, mut user: User) -> AppResult<()> {
        with_deadline("userRepo.Update", self.deadline, async {
            user.touch();
            user.validate().map_err(DomainError::from)?;

            self.repo.update(&user).await
        })
        .await
    }

    async fn delete_user(&self, id: &str) -> AppResult<()> {
        with_deadline("userRepo.Delete", self.deadline, self.repo.delete(id)).await
    }

    async fn check_field(&self, field: &str, value: &str) -> AppResult<bool> {
        with_deadline("userRepo.CheckField", self.deadline, async {
            let field: UserField = field.parse()?;
            self.repo.check_field(field, value).await
        })
        .await
    }

    async fn if_exists(&self, phone_number: &str) -> AppResult<bool> {
        with_deadline(
            "userRepo.IfExists",
            self.deadline,
            self.repo.if_exists(phone_number),
        )
        .await
    }

    async fn change_password(&self, phone_number: &str, new_password: &str) -> AppResult<bool> {
        with_deadline(
            "userRepo.ChangePassword",
            self.deadline,
            self.repo.change_password(phone_number, new_password),
        )
        .await
    }

    async fn update_refresh_token(&self, id: &str, token: &str) -> AppResult<bool> {
        with_deadline(
            "userRepo.UpdateRefreshToken",
            self.deadline,
            self.repo.update_refresh_token(id, token),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use mockall::predicate::eq;

    fn manager(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo), Duration::from_secs(1))
    }

    fn new_user(phone_number: &str) -> User {
        User {
            first_name: "Ann".to_string(),
            phone_number: phone_number.to_string(),
            password: "secret".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_user_assigns_identity() {
        let mut repo = MockUserRepository::new();
        repo.expect_if_exists()
            .with(eq("+1000"))
            .times(1)
            .returning(|_| Ok(false));
        repo.expect_create_and_fetch()
            .withf(|user| !user.id.is_empty() && user.phone_number == "+1000")
            .times(1)
            .returning(|user| {
                Ok(User {
                    user_order: 1,
                    ..user.clone()
                })
            });

        let created = manager(repo).create_user(new_user("+1000")).await.unwrap();

        assert_eq!(created.user_order, 1);
        assert_eq!(created.first_name, "Ann");
        assert!(created.created_at.timestamp() > 0);
        assert!(!created.is_updated());
    }

    #[tokio::test]
    async fn test_create_user_keeps_caller_id() {
        let mut repo = MockUserRepository::new();
        repo.expect_if_exists().returning(|_| Ok(false));
        repo.expect_create_and_fetch()
            .withf(|user| user.id == "fixed-id")
            .returning(|user| Ok(user.clone()));

        let user = User {
            id: "fixed-id".to_string(),
            ..new_user("+1000")
        };
        let created = manager(repo).create_user(user).await.unwrap();

        assert_eq!(created.id, "fixed-id");
    }

    #[tokio::test]
    async fn test_create_user_rejects_taken_phone() {
        let mut repo = MockUserRepository::new();
        repo.expect_if_exists().returning(|_| Ok(true));
        repo.expect_create_and_fetch().never();

        let err = manager(repo)
            .create_user(new_user("+1000"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(ref what) if what == "Phone number"));
    }

    #[tokio::test]
    async fn test_create_user_validates_before_storage() {
        let mut repo = MockUserRepository::new();
        repo.expect_if_exists().never();
        repo.expect_create_and_fetch().never();

        let err = manager(repo).create_user(new_user("")).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_update_user_stamps_modification_time() {
        let mut repo = MockUserRepository::new();
        repo.expect_update()
            .withf(|user| user.is_updated())
            .times(1)
            .returning(|_| Ok(()));

        let user = User {
            id: "u-1".to_string(),
            ..new_user("+1000")
        };

        manager(repo).update_user(user).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_user_passes_missing_kinds_through() {
        let mut repo = MockUserRepository::new();
        repo.expect_update().returning(|_| Err(AppError::AlreadyDeleted));

        let user = User {
            id: "u-1".to_string(),
            ..new_user("+1000")
        };
        let err = manager(repo).update_user(user).await.unwrap_err();

        assert!(matches!(err, AppError::AlreadyDeleted));
        assert!(err.is_missing());
    }

    #[tokio::test]
    async fn test_check_field_parses_column_name() {
        let mut repo = MockUserRepository::new();
        repo.expect_check_field()
            .with(eq(UserField::PhoneNumber), eq("+1000"))
            .times(1)
            .returning(|_, _| Ok(true));

        assert!(manager(repo)
            .check_field("phone_number", "+1000")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_check_field_rejects_unknown_column() {
        let mut repo = MockUserRepository::new();
        repo.expect_check_field().never();

        let err = manager(repo)
            .check_field("password; DROP TABLE users", "x")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_change_password_reports_no_match_as_false() {
        let mut repo = MockUserRepository::new();
        repo.expect_change_password()
            .with(eq("+2000"), eq("new"))
            .returning(|_, _| Ok(false));

        assert!(!manager(repo).change_password("+2000", "new").await.unwrap());
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_get().returning(|_| Err(AppError::NotFound));

        let err = manager(repo).get_user("missing").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn test_list_users_forwards_window_and_filters() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .withf(|page, filters| {
                *page == Pagination::new(10, 20)
                    && filters.len() == 1
                    && filters[0] == Filter::ById("u-1".to_string())
            })
            .returning(|_, _| Ok(Vec::new()));

        let users = manager(repo)
            .list_users(Pagination::new(10, 20), vec![Filter::ById("u-1".to_string())])
            .await
            .unwrap();

        assert!(users.is_empty());
    }
}
