//! Admin repository implementation with soft delete support.

use async_trait::async_trait;
use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult};

use super::credentials::CredentialRotator;
use super::entities::admin::{self, AdminRow, Entity as AdminEntity};
use super::existence::ExistenceChecker;
use super::predicate::ContactPredicate;
use super::query_builder::QueryBuilder;
use super::soft_delete;
use common::{AppError, AppResult, OptionExt};
use domain::{Admin, AdminContact, AdminField, Filter, Pagination};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

type Admins = QueryBuilder<AdminEntity>;

/// Admin repository trait for dependency injection.
///
/// Contact lookups come in two flavours: `if_exists` requires the phone
/// number and the email on the same live row, while `if_exists_either` and
/// `change_password` accept a match on either one.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Insert an admin and return its id
    async fn create(&self, admin: &Admin) -> AppResult<String>;

    /// Insert an admin and return the stored row in one round trip
    async fn create_and_fetch(&self, admin: &Admin) -> AppResult<Admin>;

    /// Find a live admin by id
    async fn get(&self, id: &str) -> AppResult<Admin>;

    /// List live admins matching every filter, ordered by `admin_order`
    async fn list(&self, page: Pagination, filters: &[Filter]) -> AppResult<Vec<Admin>>;

    /// Replace the updatable columns of a live admin
    async fn update(&self, admin: &Admin) -> AppResult<()>;

    /// Soft delete a live admin
    async fn delete(&self, id: &str) -> AppResult<()>;

    /// Whether any live admin holds `value` in `field`
    async fn check_field(&self, field: AdminField, value: &str) -> AppResult<bool>;

    /// Whether a live admin has both this phone number and this email
    async fn if_exists(&self, contact: &AdminContact) -> AppResult<bool>;

    /// Whether a live admin has this phone number or this email
    async fn if_exists_either(&self, contact: &AdminContact) -> AppResult<bool>;

    /// Overwrite the password of live admins matching the phone number or email
    async fn change_password(&self, contact: &AdminContact, new_password: &str)
        -> AppResult<bool>;

    /// Overwrite the refresh token of a live admin
    async fn update_refresh_token(&self, id: &str, token: &str) -> AppResult<bool>;
}

/// Concrete implementation of AdminRepository on the `admins` table
pub struct AdminStore {
    db: Arc<DatabaseConnection>,
    existence: ExistenceChecker,
    credentials: CredentialRotator,
}

impl AdminStore {
    /// Create new repository instance
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            existence: ExistenceChecker::new(Arc::clone(&db), admin::TABLE_NAME),
            credentials: CredentialRotator::new(Arc::clone(&db), admin::TABLE_NAME),
            db,
        }
    }
}

fn both(contact: &AdminContact) -> ContactPredicate<'_> {
    ContactPredicate::PhoneAndEmail {
        phone_number: &contact.phone_number,
        email: &contact.email,
    }
}

fn either(contact: &AdminContact) -> ContactPredicate<'_> {
    ContactPredicate::PhoneOrEmail {
        phone_number: &contact.phone_number,
        email: &contact.email,
    }
}

#[async_trait]
impl AdminRepository for AdminStore {
    async fn create(&self, admin: &Admin) -> AppResult<String> {
        let insert = Admins::insert(admin::insert_values(admin), false)?;
        let stmt = self.db.get_database_backend().build(&insert);

        self.db.execute(stmt).await?;

        Ok(admin.id.clone())
    }

    async fn create_and_fetch(&self, admin: &Admin) -> AppResult<Admin> {
        let insert = Admins::insert(admin::insert_values(admin), true)?;
        let stmt = self.db.get_database_backend().build(&insert);

        let row = AdminRow::find_by_statement(stmt)
            .one(self.db.as_ref())
            .await?
            .ok_or_else(|| AppError::internal("insert returned no row"))?;

        Ok(Admin::from(row))
    }

    async fn get(&self, id: &str) -> AppResult<Admin> {
        let stmt = self
            .db
            .get_database_backend()
            .build(&Admins::select_by_id(id));

        let row = AdminRow::find_by_statement(stmt)
            .one(self.db.as_ref())
            .await?
            .ok_or_not_found()?;

        Ok(Admin::from(row))
    }

    async fn list(&self, page: Pagination, filters: &[Filter]) -> AppResult<Vec<Admin>> {
        let stmt = self
            .db
            .get_database_backend()
            .build(&Admins::select(filters, page));

        let rows = AdminRow::find_by_statement(stmt).all(self.db.as_ref()).await?;

        Ok(rows.into_iter().map(Admin::from).collect())
    }

    async fn update(&self, admin: &Admin) -> AppResult<()> {
        let update = Admins::update(&admin.id, admin::update_values(admin))?;
        let stmt = self.db.get_database_backend().build(&update);

        let result = self.db.execute(stmt).await?;
        if result.rows_affected() == 0 {
            let db = self.db.as_ref();
            return Err(soft_delete::explain_missing::<AdminEntity, _>(db, &admin.id).await);
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let stmt = self
            .db
            .get_database_backend()
            .build(&Admins::soft_delete(id));

        let result = self.db.execute(stmt).await?;
        if result.rows_affected() == 0 {
            let db = self.db.as_ref();
            return Err(soft_delete::explain_missing::<AdminEntity, _>(db, id).await);
        }

        Ok(())
    }

    async fn check_field(&self, field: AdminField, value: &str) -> AppResult<bool> {
        self.existence.check_field(field.column(), value).await
    }

    async fn if_exists(&self, contact: &AdminContact) -> AppResult<bool> {
        self.existence.exists(both(contact)).await
    }

    async fn if_exists_either(&self, contact: &AdminContact) -> AppResult<bool> {
        self.existence.exists(either(contact)).await
    }

    async fn change_password(
        &self,
        contact: &AdminContact,
        new_password: &str,
    ) -> AppResult<bool> {
        self.credentials
            .set_password(either(contact), new_password)
            .await
    }

    async fn update_refresh_token(&self, id: &str, token: &str) -> AppResult<bool> {
        self.credentials.set_refresh_token(id, token).await
    }
}
