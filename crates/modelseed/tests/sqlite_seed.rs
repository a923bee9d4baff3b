//! End-to-end seeding and migration tests against in-memory SQLite.

use std::collections::HashMap;

use async_trait::async_trait;
use modelseed::ddl::{self, column_types, ColumnDef, TableDef};
use modelseed::{
    Connection, InsertOutcome, Migration, MigrationContext, MigrationRunner, ModelSchemas, Result,
    Row, SeedError, Seeder, SqlNullType, SqlValue, SqliteConnection,
};

async fn user_fixture() -> (SqliteConnection, ModelSchemas) {
    let conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
    conn.execute("CREATE TABLE users (id INTEGER PRIMARY KEY, email TEXT UNIQUE, name TEXT)")
        .await
        .unwrap();

    let schemas = ModelSchemas::new().register(
        "User",
        "users",
        [
            ("email".to_string(), column_types::STRING.to_string()),
            ("name".to_string(), column_types::STRING.to_string()),
        ],
    );
    (conn, schemas)
}

#[tokio::test]
async fn seed_model_persists_exactly_the_given_columns() {
    let (conn, schemas) = user_fixture().await;
    let seeder = Seeder::new(&conn, &schemas);

    let row = Row::new().set("email", "a@example.com").set("name", "A");
    assert_eq!(
        seeder.seed_model("User", &row).await.unwrap(),
        InsertOutcome::Inserted
    );

    let rows = seeder.read_models("User", None).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].get("email"),
        Some(&SqlValue::Text("a@example.com".to_string()))
    );
    assert_eq!(rows[0].get("name"), Some(&SqlValue::Text("A".to_string())));
    assert_eq!(rows[0].get("id"), Some(&SqlValue::I64(1)));
}

#[tokio::test]
async fn reseeding_identical_unique_key_is_idempotent() {
    let (conn, schemas) = user_fixture().await;
    let seeder = Seeder::new(&conn, &schemas);

    let row = Row::new().set("email", "a@example.com").set("name", "A");
    assert_eq!(
        seeder.seed_model("User", &row).await.unwrap(),
        InsertOutcome::Inserted
    );
    assert_eq!(
        seeder.seed_model("User", &row).await.unwrap(),
        InsertOutcome::DuplicateIgnored
    );

    let rows = seeder.read_models("User", None).await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn hundred_identical_rows_leave_one_persisted() {
    let (conn, schemas) = user_fixture().await;
    let seeder = Seeder::new(&conn, &schemas);

    let report = seeder
        .seed_models(100, "User", |_| Row::new().set("email", "same@example.com"))
        .await
        .unwrap();

    assert_eq!(report.rows_inserted, 1);
    assert_eq!(report.duplicates_ignored, 99);
    assert_eq!(seeder.read_models("User", None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn seed_table_generates_distinct_rows() {
    let (conn, schemas) = user_fixture().await;
    let seeder = Seeder::new(&conn, &schemas);

    let report = seeder
        .seed_table(
            5,
            "users",
            |ctx| Row::new().set("email", format!("u{}@example.com", ctx.record_index)),
            &HashMap::new(),
        )
        .await
        .unwrap();

    assert_eq!(report.rows_inserted, 5);
    assert_eq!(seeder.read_table("users", None).await.unwrap().len(), 5);
    assert_eq!(seeder.read_table("users", Some(3)).await.unwrap().len(), 3);
}

#[tokio::test]
async fn empty_row_insert_is_attempted_and_succeeds_with_defaults() {
    let conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
    conn.execute("CREATE TABLE counters (id INTEGER PRIMARY KEY)")
        .await
        .unwrap();
    let schemas = ModelSchemas::new();
    let seeder = Seeder::new(&conn, &schemas);

    let outcome = seeder
        .seed_row("counters", &Row::new(), &HashMap::new())
        .await
        .unwrap();
    assert_eq!(outcome, InsertOutcome::Inserted);
    assert_eq!(seeder.last_insert_id().await.unwrap(), "1");

    seeder
        .seed_row("counters", &Row::new(), &HashMap::new())
        .await
        .unwrap();
    assert_eq!(seeder.last_insert_id().await.unwrap(), "2");
}

#[tokio::test]
async fn insert_into_missing_table_propagates_database_error() {
    let conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
    let schemas = ModelSchemas::new();
    let seeder = Seeder::new(&conn, &schemas);

    let row = Row::new().set("email", "a@example.com");
    let err = seeder
        .seed_row("missing_table", &row, &HashMap::new())
        .await
        .unwrap_err();
    assert!(matches!(err, SeedError::Sqlite(_)));
}

#[tokio::test]
async fn values_round_trip_with_storage_types() {
    let conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
    conn.execute("CREATE TABLE vals (n INTEGER, x REAL, b BLOB, t TEXT)")
        .await
        .unwrap();
    let schemas = ModelSchemas::new();
    let seeder = Seeder::new(&conn, &schemas);

    let row = Row::new()
        .set("n", 42i64)
        .set("x", 1.5f64)
        .set("b", vec![0xDEu8, 0xAD])
        .set("t", SqlValue::Null(SqlNullType::Text));
    seeder.seed_row("vals", &row, &HashMap::new()).await.unwrap();

    let rows = seeder.read_table("vals", None).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("n"), Some(&SqlValue::I64(42)));
    assert_eq!(rows[0].get("x"), Some(&SqlValue::F64(1.5)));
    assert_eq!(rows[0].get("b"), Some(&SqlValue::Bytes(vec![0xDE, 0xAD])));
    assert!(rows[0].get("t").unwrap().is_null());
}

/// Creates the model's table, with one raw-typed column rendered verbatim.
struct CreateUsersTable;

#[async_trait]
impl Migration for CreateUsersTable {
    fn model_class(&self) -> &str {
        "User"
    }

    async fn up(&self, conn: &dyn Connection, ctx: &MigrationContext<'_>) -> Result<()> {
        let table = TableDef::new(ctx.table()?)
            .column(ColumnDef::new("id", column_types::BIGINT).primary_key())
            .column(ColumnDef::new("email", column_types::STRING).not_null().unique())
            .column(ColumnDef::raw("created_at", "TEXT DEFAULT CURRENT_TIMESTAMP"));
        conn.execute(&ddl::create_table_sql(conn, &table)?).await?;
        Ok(())
    }

    async fn down(&self, conn: &dyn Connection, ctx: &MigrationContext<'_>) -> Result<()> {
        conn.execute(&ddl::drop_table_sql(conn, ctx.table()?)?).await?;
        Ok(())
    }
}

#[tokio::test]
async fn migration_creates_table_then_seeding_works() {
    let conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
    let schemas = ModelSchemas::new().register(
        "User",
        "users",
        [("email".to_string(), column_types::STRING.to_string())],
    );

    let migrations: Vec<Box<dyn Migration>> = vec![Box::new(CreateUsersTable)];
    let runner = MigrationRunner::new(&conn, &schemas);
    assert_eq!(runner.migrate(&migrations).await.unwrap(), 1);

    let seeder = Seeder::new(&conn, &schemas);
    let row = Row::new().set("id", 1i64).set("email", "a@example.com");
    assert_eq!(
        seeder.seed_model("User", &row).await.unwrap(),
        InsertOutcome::Inserted
    );
    // The raw-typed column picked up its SQL default.
    let rows = seeder.read_models("User", None).await.unwrap();
    assert!(matches!(rows[0].get("created_at"), Some(SqlValue::Text(_))));

    assert_eq!(runner.rollback(&migrations).await.unwrap(), 1);
    assert!(seeder.read_models("User", None).await.is_err());
}
