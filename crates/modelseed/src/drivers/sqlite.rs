//! SQLite driver over sqlx, for embedded databases and tests.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Column as _, Row as SqlxRow, Sqlite, TypeInfo as _, ValueRef as _};

use crate::config::DatabaseConfig;
use crate::core::identifier;
use crate::core::traits::{BoundColumn, Connection};
use crate::core::value::{Row, SqlNullType, SqlValue};
use crate::error::{Result, SeedError};

/// SQLite-backed [`Connection`].
///
/// The pool is capped at one connection: an in-memory database exists per
/// connection, and the seeding model is single-writer anyway.
pub struct SqliteConnection {
    pool: SqlitePool,
}

impl SqliteConnection {
    /// Connect to a SQLite database URL (e.g. `sqlite::memory:`,
    /// `sqlite://data/seed.db`). File databases are created if missing.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Ok(Self { pool })
    }

    /// Connect using a [`DatabaseConfig`].
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self> {
        Self::connect(&config.sqlite_url()).await
    }

    /// Access the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Bind a [`SqlValue`] as the next query parameter.
///
/// SQLite has no native UUID or decimal storage; both are bound as text.
fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: &SqlValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        SqlValue::Null(_) => query.bind(None::<String>),
        SqlValue::Bool(v) => query.bind(*v),
        SqlValue::I32(v) => query.bind(*v),
        SqlValue::I64(v) => query.bind(*v),
        SqlValue::F64(v) => query.bind(*v),
        SqlValue::Text(v) => query.bind(v.clone()),
        SqlValue::Bytes(v) => query.bind(v.clone()),
        SqlValue::Uuid(v) => query.bind(v.to_string()),
        SqlValue::Decimal(v) => query.bind(v.to_string()),
        SqlValue::DateTime(v) => query.bind(*v),
        SqlValue::Date(v) => query.bind(*v),
    }
}

/// Decode one column of a fetched row by its value type.
fn decode_value(row: &sqlx::sqlite::SqliteRow, index: usize) -> Result<SqlValue> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(SqlValue::Null(SqlNullType::Text));
    }
    let type_name = raw.type_info().name().to_string();

    Ok(match type_name.as_str() {
        "INTEGER" => SqlValue::I64(row.try_get(index)?),
        "BOOLEAN" => SqlValue::Bool(row.try_get(index)?),
        "REAL" => SqlValue::F64(row.try_get(index)?),
        "BLOB" => SqlValue::Bytes(row.try_get(index)?),
        "DATETIME" => SqlValue::DateTime(row.try_get(index)?),
        "DATE" => SqlValue::Date(row.try_get(index)?),
        _ => SqlValue::Text(row.try_get(index)?),
    })
}

#[async_trait]
impl Connection for SqliteConnection {
    fn quote_ident(&self, name: &str) -> Result<String> {
        identifier::quote_ident(name)
    }

    async fn insert(&self, table: &str, columns: &[BoundColumn]) -> Result<u64> {
        let quoted_names: Vec<&str> = columns.iter().map(|c| c.quoted_name.as_str()).collect();
        let sql = super::insert_sql(&self.quote_ident(table)?, &quoted_names, |_| "?".to_string());

        let mut query = sqlx::query(&sql);
        for column in columns {
            query = bind_value(query, &column.value);
        }

        match query.execute(&self.pool).await {
            Ok(result) => Ok(result.rows_affected()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(SeedError::unique_violation(table, db.message()))
            }
            Err(e) => Err(SeedError::from(e)),
        }
    }

    async fn select_all(&self, table: &str, limit: Option<usize>) -> Result<Vec<Row>> {
        let mut sql = format!("SELECT * FROM {}", self.quote_ident(table)?);
        if let Some(n) = limit {
            sql.push_str(&format!(" LIMIT {}", n));
        }

        let fetched = sqlx::query(&sql).fetch_all(&self.pool).await?;
        let mut rows = Vec::with_capacity(fetched.len());
        for sqlite_row in &fetched {
            let mut row = Row::new();
            for (index, column) in sqlite_row.columns().iter().enumerate() {
                row = row.set(column.name(), decode_value(sqlite_row, index)?);
            }
            rows.push(row);
        }
        Ok(rows)
    }

    async fn last_insert_id(&self) -> Result<String> {
        let id: i64 = sqlx::query_scalar("SELECT last_insert_rowid()")
            .fetch_one(&self.pool)
            .await?;
        Ok(id.to_string())
    }

    async fn execute(&self, sql: &str) -> Result<u64> {
        Ok(sqlx::query(sql).execute(&self.pool).await?.rows_affected())
    }

    fn db_type(&self) -> &str {
        "sqlite"
    }
}
