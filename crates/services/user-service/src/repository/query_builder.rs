//! Statement construction for account tables.
//!
//! Reads always use the table's fixed projection and the live-row predicate.
//! Writes are checked for malformed column sets before any SQL is produced,
//! and those failures surface as `AppError::Build`.

use std::marker::PhantomData;

use sea_orm::sea_query::{
    Expr, InsertStatement, Order, Query, SelectStatement, SimpleExpr, UpdateStatement,
};
use sea_orm::{IdenStatic, Value};

use common::{AppError, AppResult};
use domain::{Filter, Pagination};

use super::entities::AccountTable;
use super::soft_delete;

/// Builds parametrised statements for one account table.
pub struct QueryBuilder<E>(PhantomData<E>);

impl<E: AccountTable> QueryBuilder<E> {
    /// Single live row by identifier.
    pub fn select_by_id(id: &str) -> SelectStatement {
        Self::select(&[Filter::ById(id.to_string())], Pagination::unlimited())
    }

    /// Live rows matching every filter, ordered by ordinal.
    ///
    /// `LIMIT`/`OFFSET` are only emitted for a non-zero limit.
    pub fn select(filters: &[Filter], page: Pagination) -> SelectStatement {
        let mut query = Query::select();
        query
            .columns(E::PROJECTION.iter().copied())
            .from(E::default())
            .and_where(soft_delete::live::<E>());

        for filter in filters {
            match filter {
                Filter::ById(id) => query.and_where(Expr::col(E::ID).eq(id.as_str())),
                Filter::ByCreatedAt(created_at) => {
                    query.and_where(Expr::col(E::CREATED_AT).eq(*created_at))
                }
            };
        }

        query.order_by(E::ORDINAL, Order::Asc);

        if let Some((limit, offset)) = page.window() {
            query.limit(limit).offset(offset);
        }

        query
    }

    /// INSERT of the given column set, optionally returning the projection.
    pub fn insert(values: Vec<(E::Column, Value)>, returning: bool) -> AppResult<InsertStatement> {
        Self::check_columns(&values, &[E::ORDINAL, E::DELETED_AT], "insert")?;

        let (columns, exprs): (Vec<E::Column>, Vec<SimpleExpr>) = values
            .into_iter()
            .map(|(column, value)| (column, SimpleExpr::from(value)))
            .unzip();

        let mut insert = Query::insert();
        insert.into_table(E::default()).columns(columns).values(exprs)?;

        if returning {
            insert.returning(Query::returning().columns(E::PROJECTION.iter().copied()));
        }

        Ok(insert)
    }

    /// UPDATE of the given column set on a live row.
    pub fn update(id: &str, values: Vec<(E::Column, Value)>) -> AppResult<UpdateStatement> {
        Self::check_columns(
            &values,
            &[E::ID, E::ORDINAL, E::CREATED_AT, E::DELETED_AT],
            "update",
        )?;

        let mut update = Query::update();
        update
            .table(E::default())
            .values(
                values
                    .into_iter()
                    .map(|(column, value)| (column, SimpleExpr::from(value))),
            )
            .cond_where(soft_delete::live_by_id::<E>(id));

        Ok(update)
    }

    /// Set the deletion marker on a live row.
    pub fn soft_delete(id: &str) -> UpdateStatement {
        Query::update()
            .table(E::default())
            .value(E::DELETED_AT, Expr::current_timestamp())
            .cond_where(soft_delete::live_by_id::<E>(id))
            .to_owned()
    }

    fn check_columns(
        values: &[(E::Column, Value)],
        forbidden: &[E::Column],
        operation: &str,
    ) -> AppResult<()> {
        let table = E::default();

        if values.is_empty() {
            return Err(AppError::build(format!(
                "{} on {} has no columns",
                operation,
                table.table_name()
            )));
        }

        for (column, _) in values {
            if forbidden.iter().any(|f| f.as_str() == column.as_str()) {
                return Err(AppError::build(format!(
                    "{} on {} may not write column {}",
                    operation,
                    table.table_name(),
                    column.as_str()
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::entities::{admin, user};
    use chrono::{TimeZone, Utc};
    use domain::User;
    use sea_orm::sea_query::PostgresQueryBuilder;

    type Users = QueryBuilder<user::Entity>;
    type Admins = QueryBuilder<admin::Entity>;

    #[test]
    fn test_select_always_gated_and_ordered() {
        let sql = Users::select(&[], Pagination::unlimited()).to_string(PostgresQueryBuilder);

        assert!(sql.starts_with(r#"SELECT "id", "user_order", "first_name""#));
        assert!(sql.contains(r#"FROM "users" WHERE "deleted_at" IS NULL"#));
        assert!(sql.ends_with(r#"ORDER BY "user_order" ASC"#));
    }

    #[test]
    fn test_select_projection_excludes_deletion_marker() {
        let sql = Admins::select(&[], Pagination::unlimited()).to_string(PostgresQueryBuilder);
        let projection = sql.split(" FROM ").next().unwrap();

        assert!(!projection.contains("deleted_at"));
        assert!(projection.contains(r#""start_work_year""#));
        assert!(projection.contains(r#""updated_at""#));
    }

    #[test]
    fn test_zero_limit_means_unlimited() {
        let unlimited = Users::select(&[], Pagination::unlimited()).to_string(PostgresQueryBuilder);
        let zero = Users::select(&[], Pagination::new(0, 15)).to_string(PostgresQueryBuilder);

        assert_eq!(unlimited, zero);
        assert!(!zero.contains("LIMIT"));
        assert!(!zero.contains("OFFSET"));
    }

    #[test]
    fn test_window_applied_for_non_zero_limit() {
        let sql = Users::select(&[], Pagination::new(5, 10)).to_string(PostgresQueryBuilder);

        assert!(sql.ends_with("LIMIT 5 OFFSET 10"));
    }

    #[test]
    fn test_filters_are_anded() {
        let created_at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap();
        let filters = [
            Filter::ById("u-1".to_string()),
            Filter::ByCreatedAt(created_at),
        ];
        let sql = Users::select(&filters, Pagination::unlimited()).to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#""deleted_at" IS NULL AND "id" = 'u-1' AND "created_at" = "#));
    }

    #[test]
    fn test_select_by_id() {
        let sql = Admins::select_by_id("a-1").to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#"FROM "admins" WHERE "deleted_at" IS NULL AND "id" = 'a-1'"#));
        assert!(!sql.contains("LIMIT"));
    }

    #[test]
    fn test_insert_writes_only_given_columns() {
        let user = User {
            id: "u-1".to_string(),
            phone_number: "+1000".to_string(),
            created_at: Utc::now(),
            ..Default::default()
        };
        let sql = Users::insert(user::insert_values(&user), false)
            .unwrap()
            .to_string(PostgresQueryBuilder);

        assert!(sql.starts_with(r#"INSERT INTO "users" ("id", "first_name""#));
        assert!(!sql.contains("user_order"));
        assert!(!sql.contains("deleted_at"));
        assert!(!sql.contains("RETURNING"));
        // empty birth date becomes NULL
        assert!(sql.contains("'+1000'"));
        assert!(sql.contains("NULL"));
    }

    #[test]
    fn test_insert_returning_projection() {
        let user = User {
            id: "u-1".to_string(),
            ..Default::default()
        };
        let sql = Users::insert(user::insert_values(&user), true)
            .unwrap()
            .to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#"RETURNING "id", "user_order""#));
    }

    #[test]
    fn test_insert_rejects_server_managed_columns() {
        let values = vec![
            (user::Column::Id, Value::from("u-1")),
            (user::Column::UserOrder, Value::from(7i64)),
        ];
        let err = Users::insert(values, false).unwrap_err();

        assert!(matches!(err, AppError::Build(ref m) if m.contains("user_order")));
    }

    #[test]
    fn test_insert_rejects_empty_column_set() {
        let err = Users::insert(Vec::new(), false).unwrap_err();
        assert!(matches!(err, AppError::Build(_)));
    }

    #[test]
    fn test_update_is_gated_by_id_and_liveness() {
        let user = User {
            id: "u-1".to_string(),
            first_name: "Ann".to_string(),
            ..Default::default()
        };
        let sql = Users::update(&user.id, user::update_values(&user))
            .unwrap()
            .to_string(PostgresQueryBuilder);

        assert!(sql.starts_with(r#"UPDATE "users" SET "first_name" = 'Ann'"#));
        assert!(sql.ends_with(r#"WHERE "id" = 'u-1' AND "deleted_at" IS NULL"#));
        assert!(!sql.contains(r#""created_at" ="#));
        assert!(!sql.contains(r#""refresh_token" ="#));
    }

    #[test]
    fn test_update_rejects_identity_column() {
        let values = vec![(admin::Column::Id, Value::from("other"))];
        let err = Admins::update("a-1", values).unwrap_err();

        assert!(matches!(err, AppError::Build(_)));
    }

    #[test]
    fn test_soft_delete_statement() {
        let sql = Admins::soft_delete("a-1").to_string(PostgresQueryBuilder);

        assert_eq!(
            sql,
            r#"UPDATE "admins" SET "deleted_at" = CURRENT_TIMESTAMP WHERE "id" = 'a-1' AND "deleted_at" IS NULL"#
        );
    }
}
