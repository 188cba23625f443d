//! Uniqueness and existence checks against a live table.

use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseConnection, Statement, Value};

use common::AppResult;

use super::predicate::ContactPredicate;

/// Runs counting and existence queries on one table.
///
/// Column names reach this type only through the per-entity field registries,
/// never from caller input.
#[derive(Clone)]
pub struct ExistenceChecker {
    db: Arc<DatabaseConnection>,
    table: &'static str,
}

impl ExistenceChecker {
    pub fn new(db: Arc<DatabaseConnection>, table: &'static str) -> Self {
        Self { db, table }
    }

    /// True when at least one live row holds `value` in `column`.
    pub async fn check_field(&self, column: &'static str, value: &str) -> AppResult<bool> {
        let sql = format!(
            "SELECT count(1) AS count FROM {} WHERE {} = $1 AND deleted_at IS NULL",
            self.table, column
        );
        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            [Value::from(value)],
        );

        let count = match self.db.query_one(stmt).await? {
            Some(row) => row.try_get::<i64>("", "count")?,
            None => 0,
        };

        if count > 1 {
            tracing::debug!(table = self.table, column, count, "value held by several live rows");
        }

        Ok(count > 0)
    }

    /// True when a live row matches the contact predicate.
    pub async fn exists(&self, predicate: ContactPredicate<'_>) -> AppResult<bool> {
        let (condition, values) = predicate.render(1);
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE {} AND deleted_at IS NULL) AS found",
            self.table, condition
        );
        let stmt = Statement::from_sql_and_values(self.db.get_database_backend(), sql, values);

        match self.db.query_one(stmt).await? {
            Some(row) => Ok(row.try_get::<bool>("", "found")?),
            None => Ok(false),
        }
    }
}
