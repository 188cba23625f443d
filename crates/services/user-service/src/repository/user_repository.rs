//! User repository implementation with soft delete support.

use async_trait::async_trait;
use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult};

use super::credentials::CredentialRotator;
use super::entities::user::{self, Entity as UserEntity, UserRow};
use super::existence::ExistenceChecker;
use super::predicate::ContactPredicate;
use super::query_builder::QueryBuilder;
use super::soft_delete;
use common::{AppError, AppResult, OptionExt};
use domain::{Filter, Pagination, User, UserField};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

type Users = QueryBuilder<UserEntity>;

/// User repository trait for dependency injection.
///
/// Every method sees live rows only. A soft-deleted user cannot be read,
/// updated, deleted again or matched by the existence checks.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return its id
    async fn create(&self, user: &User) -> AppResult<String>;

    /// Insert a user and return the stored row in one round trip
    async fn create_and_fetch(&self, user: &User) -> AppResult<User>;

    /// Find a live user by id
    async fn get(&self, id: &str) -> AppResult<User>;

    /// List live users matching every filter, ordered by `user_order`
    async fn list(&self, page: Pagination, filters: &[Filter]) -> AppResult<Vec<User>>;

    /// Replace the updatable columns of a live user
    async fn update(&self, user: &User) -> AppResult<()>;

    /// Soft delete a live user
    async fn delete(&self, id: &str) -> AppResult<()>;

    /// Whether any live user holds `value` in `field`
    async fn check_field(&self, field: UserField, value: &str) -> AppResult<bool>;

    /// Whether a live user owns this phone number
    async fn if_exists(&self, phone_number: &str) -> AppResult<bool>;

    /// Overwrite the password of the live user with this phone number
    async fn change_password(&self, phone_number: &str, new_password: &str) -> AppResult<bool>;

    /// Overwrite the refresh token of a live user
    async fn update_refresh_token(&self, id: &str, token: &str) -> AppResult<bool>;
}

/// Concrete implementation of UserRepository on the `users` table
pub struct UserStore {
    db: Arc<DatabaseConnection>,
    existence: ExistenceChecker,
    credentials: CredentialRotator,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            existence: ExistenceChecker::new(Arc::clone(&db), user::TABLE_NAME),
            credentials: CredentialRotator::new(Arc::clone(&db), user::TABLE_NAME),
            db,
        }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn create(&self, user: &User) -> AppResult<String> {
        let insert = Users::insert(user::insert_values(user), false)?;
        let stmt = self.db.get_database_backend().build(&insert);

        self.db.execute(stmt).await?;

        Ok(user.id.clone())
    }

    async fn create_and_fetch(&self, user: &User) -> AppResult<User> {
        let insert = Users::insert(user::insert_values(user), true)?;
        let stmt = self.db.get_database_backend().build(&insert);

        let row = UserRow::find_by_statement(stmt)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| AppError::internal("insert returned no row"))?;

        Ok(User::from(row))
    }

    async fn get(&self, id: &str) -> AppResult<User> {
        let stmt = self
            .db
            .get_database_backend()
            .build(&Users::select_by_id(id));

        let row = UserRow::find_by_statement(stmt)
            .one(self.db.as_ref())
            .await?
            .ok_or_not_found()?;

        Ok(User::from(row))
    }

    async fn list(&self, page: Pagination, filters: &[Filter]) -> AppResult<Vec<User>> {
        let stmt = self
            .db
            .get_database_backend()
            .build(&Users::select(filters, page));

        let rows = UserRow::find_by_statement(stmt).all(self.db.as_ref()).await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn update(&self, user: &User) -> AppResult<()> {
        let update = Users::update(&user.id, user::update_values(user))?;
        let stmt = self.db.get_database_backend().build(&update);

        let result = self.db.execute(stmt).await?;
        if result.rows_affected() == 0 {
            let db = self.db.as_ref();
            return Err(soft_delete::explain_missing::<UserEntity, _>(db, &user.id).await);
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let stmt = self
            .db
            .get_database_backend()
            .build(&Users::soft_delete(id));

        let result = self.db.execute(stmt).await?;
        if result.rows_affected() == 0 {
            let db = self.db.as_ref();
            return Err(soft_delete::explain_missing::<UserEntity, _>(db, id).await);
        }

        Ok(())
    }

    async fn check_field(&self, field: UserField, value: &str) -> AppResult<bool> {
        self.existence.check_field(field.column(), value).await
    }

    async fn if_exists(&self, phone_number: &str) -> AppResult<bool> {
        self.existence
            .exists(ContactPredicate::Phone(phone_number))
            .await
    }

    async fn change_password(&self, phone_number: &str, new_password: &str) -> AppResult<bool> {
        self.credentials
            .set_password(ContactPredicate::Phone(phone_number), new_password)
            .await
    }

    async fn update_refresh_token(&self, id: &str, token: &str) -> AppResult<bool> {
        self.credentials.set_refresh_token(id, token).await
    }
}
