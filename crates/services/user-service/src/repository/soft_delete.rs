//! Soft delete gate.
//!
//! A row is live while `deleted_at IS NULL`. Every generated read and every
//! mutation goes through the predicates below; rows with a deletion marker
//! stay in the table but are invisible to the rest of the repository.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Condition, Expr, Query, SelectStatement, SimpleExpr};
use sea_orm::{ConnectionTrait, FromQueryResult};

use common::AppError;

use super::entities::AccountTable;

/// `deleted_at IS NULL`
pub fn live<E: AccountTable>() -> SimpleExpr {
    Expr::col(E::DELETED_AT).is_null()
}

/// `id = $1 AND deleted_at IS NULL`
pub fn live_by_id<E: AccountTable>(id: &str) -> Condition {
    Condition::all()
        .add(Expr::col(E::ID).eq(id))
        .add(live::<E>())
}

/// Deletion marker lookup that ignores the gate on purpose.
pub fn row_state<E: AccountTable>(id: &str) -> SelectStatement {
    Query::select()
        .column(E::DELETED_AT)
        .from(E::default())
        .and_where(Expr::col(E::ID).eq(id))
        .to_owned()
}

#[derive(Debug, FromQueryResult)]
struct RowState {
    deleted_at: Option<DateTime<Utc>>,
}

/// Explain why a gated mutation on `id` matched no rows.
///
/// Returns `NotFound` when the row was never stored and `AlreadyDeleted` when
/// it carries a deletion marker.
pub async fn explain_missing<E, C>(db: &C, id: &str) -> AppError
where
    E: AccountTable,
    C: ConnectionTrait,
{
    let stmt = db.get_database_backend().build(&row_state::<E>(id));

    match RowState::find_by_statement(stmt).one(db).await {
        Ok(None) => AppError::NotFound,
        Ok(Some(RowState {
            deleted_at: Some(_),
        })) => AppError::AlreadyDeleted,
        Ok(Some(RowState { deleted_at: None })) => {
            tracing::warn!(id, "row is live but the gated statement matched nothing");
            AppError::internal("row changed while being modified")
        }
        Err(e) => AppError::from(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::entities::{admin, user};
    use sea_orm::sea_query::PostgresQueryBuilder;

    #[test]
    fn test_live_by_id_renders_both_predicates() {
        let sql = Query::select()
            .column(user::Column::Id)
            .from(user::Entity)
            .cond_where(live_by_id::<user::Entity>("u-1"))
            .to_string(PostgresQueryBuilder);

        assert_eq!(
            sql,
            r#"SELECT "id" FROM "users" WHERE "id" = 'u-1' AND "deleted_at" IS NULL"#
        );
    }

    #[test]
    fn test_row_state_skips_the_gate() {
        let sql = row_state::<admin::Entity>("a-1").to_string(PostgresQueryBuilder);

        assert_eq!(sql, r#"SELECT "deleted_at" FROM "admins" WHERE "id" = 'a-1'"#);
    }
}
