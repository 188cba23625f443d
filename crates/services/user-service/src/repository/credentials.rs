//! Password and refresh token rotation.

use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection, Statement, Value};

use common::AppResult;

use super::predicate::ContactPredicate;

/// Overwrites credential columns on live rows of one table.
///
/// The prior value is never checked. A rotation that matches no live row
/// reports `false` rather than an error.
#[derive(Clone)]
pub struct CredentialRotator {
    db: Arc<DatabaseConnection>,
    table: &'static str,
}

impl CredentialRotator {
    pub fn new(db: Arc<DatabaseConnection>, table: &'static str) -> Self {
        Self { db, table }
    }

    pub async fn set_password(
        &self,
        predicate: ContactPredicate<'_>,
        new_password: &str,
    ) -> AppResult<bool> {
        let (condition, values) = predicate.render(2);
        let sql = format!(
            "UPDATE {} SET password = $1 WHERE {} AND deleted_at IS NULL",
            self.table, condition
        );

        let mut params = vec![Value::from(new_password)];
        params.extend(values);

        self.execute(sql, params).await
    }

    pub async fn set_refresh_token(&self, id: &str, token: &str) -> AppResult<bool> {
        let sql = format!(
            "UPDATE {} SET refresh_token = $1 WHERE id = $2 AND deleted_at IS NULL",
            self.table
        );

        self.execute(sql, vec![Value::from(token), Value::from(id)])
            .await
    }

    async fn execute(&self, sql: String, values: Vec<Value>) -> AppResult<bool> {
        let stmt = Statement::from_sql_and_values(self.db.get_database_backend(), sql, values);
        let result = self.db.execute(stmt).await?;

        Ok(result.rows_affected() > 0)
    }
}
