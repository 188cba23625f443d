//! Admin repository tests against a mocked PostgreSQL connection.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{
    DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult, Transaction, Value,
};

use common::AppError;
use domain::{Admin, AdminContact, AdminField, Pagination};
use user_service_lib::repository::{AdminRepository, AdminStore};

type Row = BTreeMap<&'static str, Value>;

fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
}

fn admin_row(id: &str, order: i64) -> Row {
    BTreeMap::from([
        ("id", Value::from(id)),
        ("admin_order", Value::from(order)),
        ("role", Value::from("admin")),
        ("first_name", Value::from("Bo")),
        ("last_name", Value::from("Kim")),
        ("birth_date", Value::from("1990-01-01")),
        ("phone_number", Value::from("+2000")),
        ("email", Value::from("bo@example.com")),
        ("password", Value::from("pw")),
        ("gender", Value::from("male")),
        ("salary", Value::from(1500.5f32)),
        ("biography", Value::from("")),
        ("start_work_year", Value::from("2015")),
        ("end_work_year", Value::String(None)),
        ("work_years", Value::from(9i64)),
        ("refresh_token", Value::from("")),
        ("created_at", Value::from(created_at())),
        (
            "updated_at",
            Value::from(Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())),
        ),
    ])
}

fn found(value: bool) -> Row {
    BTreeMap::from([("found", Value::from(value))])
}

fn affected(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

/// Drop every store first so the pool can be reclaimed.
fn transaction_log(db: Arc<DatabaseConnection>) -> Vec<Transaction> {
    Arc::try_unwrap(db)
        .ok()
        .expect("store still holds the pool")
        .into_transaction_log()
}

fn contact() -> AdminContact {
    AdminContact::new("+2000", "bo@example.com")
}

#[tokio::test]
async fn test_get_decodes_nullable_columns() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![admin_row("a-1", 3)]])
        .into_connection();

    let admin = AdminStore::new(Arc::new(db)).get("a-1").await.unwrap();

    assert_eq!(admin.admin_order, 3);
    assert_eq!(admin.birth_date, "1990-01-01");
    assert_eq!(admin.start_work_year, "2015");
    assert_eq!(admin.end_work_year, "");
    assert_eq!(admin.salary, 1500.5);
    assert!(admin.is_updated());
}

#[tokio::test]
async fn test_list_decodes_every_row() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![admin_row("a-1", 1), admin_row("a-2", 2)]])
        .into_connection();

    let admins = AdminStore::new(Arc::new(db))
        .list(Pagination::new(0, 0), &[])
        .await
        .unwrap();

    assert_eq!(admins.len(), 2);
    assert!(admins.iter().all(|a| a.end_work_year.is_empty()));
}

#[tokio::test]
async fn test_if_exists_requires_both_contacts() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![found(false)]])
        .into_connection();
    let db = Arc::new(db);

    let repo = AdminStore::new(Arc::clone(&db));
    assert!(!repo.if_exists(&contact()).await.unwrap());

    drop(repo);
    assert_eq!(
        transaction_log(db),
        [Transaction::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT EXISTS(SELECT 1 FROM admins WHERE (phone_number = $1 AND email = $2) AND deleted_at IS NULL) AS found",
            [Value::from("+2000"), Value::from("bo@example.com")],
        )]
    );
}

#[tokio::test]
async fn test_change_password_matches_either_contact() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([affected(1)])
        .into_connection();
    let db = Arc::new(db);

    let repo = AdminStore::new(Arc::clone(&db));
    assert!(repo.change_password(&contact(), "new").await.unwrap());

    drop(repo);
    assert_eq!(
        transaction_log(db),
        [Transaction::from_sql_and_values(
            DatabaseBackend::Postgres,
            "UPDATE admins SET password = $1 WHERE (phone_number = $2 OR email = $3) AND deleted_at IS NULL",
            [
                Value::from("new"),
                Value::from("+2000"),
                Value::from("bo@example.com"),
            ],
        )]
    );
}

#[tokio::test]
async fn test_if_exists_either_is_a_separate_predicate() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![found(true)]])
        .into_connection();
    let db = Arc::new(db);

    let repo = AdminStore::new(Arc::clone(&db));
    assert!(repo
        .if_exists_either(&AdminContact::new("+2000", "other@example.com"))
        .await
        .unwrap());

    drop(repo);
    let log = transaction_log(db);
    assert_eq!(log.len(), 1);
    assert!(format!("{:?}", log[0]).contains("phone_number = $1 OR email = $2"));
}

#[tokio::test]
async fn test_check_field_email() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![BTreeMap::from([("count", Value::from(1i64))])]])
        .into_connection();
    let db = Arc::new(db);

    let repo = AdminStore::new(Arc::clone(&db));
    assert!(repo
        .check_field(AdminField::Email, "bo@example.com")
        .await
        .unwrap());

    drop(repo);
    assert_eq!(
        transaction_log(db),
        [Transaction::from_sql_and_values(
            DatabaseBackend::Postgres,
            "SELECT count(1) AS count FROM admins WHERE email = $1 AND deleted_at IS NULL",
            [Value::from("bo@example.com")],
        )]
    );
}

#[tokio::test]
async fn test_delete_unknown_admin_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([affected(0)])
        .append_query_results([Vec::<Row>::new()])
        .into_connection();

    let err = AdminStore::new(Arc::new(db)).delete("a-404").await.unwrap_err();

    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn test_create_and_fetch_returns_stored_order() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![admin_row("a-1", 7)]])
        .into_connection();

    let admin = Admin {
        id: "a-1".to_string(),
        role: "admin".to_string(),
        phone_number: "+2000".to_string(),
        email: "bo@example.com".to_string(),
        created_at: created_at(),
        ..Default::default()
    };
    let stored = AdminStore::new(Arc::new(db)).create_and_fetch(&admin).await.unwrap();

    assert_eq!(stored.id, "a-1");
    assert_eq!(stored.admin_order, 7);
    assert_eq!(stored.work_years, 9);
}
