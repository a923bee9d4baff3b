//! PostgreSQL driver over tokio-postgres.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tokio_postgres::error::SqlState;
use tokio_postgres::types::{ToSql, Type};
use tokio_postgres::{Client, NoTls};
use tracing::error;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::core::identifier;
use crate::core::traits::{BoundColumn, Connection};
use crate::core::value::{Row, SqlNullType, SqlValue};
use crate::ddl::column_types;
use crate::error::{Result, SeedError};

/// PostgreSQL-backed [`Connection`].
///
/// Connects without TLS; `sslmode=prefer` in the connection string lets the
/// server downgrade to plaintext.
pub struct PostgresConnection {
    client: Client,
}

impl PostgresConnection {
    /// Connect with a libpq-style connection string.
    pub async fn connect(conn_str: &str) -> Result<Self> {
        let (client, connection) = tokio_postgres::connect(conn_str, NoTls).await?;
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!("postgres connection error: {}", e);
            }
        });
        Ok(Self { client })
    }

    /// Connect using a [`DatabaseConfig`].
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self> {
        Self::connect(&config.postgres_connection_string()).await
    }

    /// Access the underlying client.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// Typed NULL parameter: PostgreSQL rejects untyped NULLs, so the declared
/// column type picks the bind type, falling back to the value's hint.
fn null_param(type_id: &str, hint: SqlNullType) -> Box<dyn ToSql + Sync + Send> {
    match type_id {
        column_types::INTEGER => Box::new(None::<i32>),
        column_types::BIGINT => Box::new(None::<i64>),
        column_types::BOOLEAN => Box::new(None::<bool>),
        column_types::FLOAT => Box::new(None::<f64>),
        column_types::DECIMAL => Box::new(None::<Decimal>),
        column_types::DATE => Box::new(None::<NaiveDate>),
        column_types::DATETIME => Box::new(None::<NaiveDateTime>),
        column_types::UUID => Box::new(None::<Uuid>),
        column_types::BINARY => Box::new(None::<Vec<u8>>),
        column_types::STRING | column_types::TEXT => Box::new(None::<String>),
        _ => match hint {
            SqlNullType::Bool => Box::new(None::<bool>),
            SqlNullType::Int => Box::new(None::<i64>),
            SqlNullType::Float => Box::new(None::<f64>),
            SqlNullType::Bytes => Box::new(None::<Vec<u8>>),
            SqlNullType::Uuid => Box::new(None::<Uuid>),
            SqlNullType::Decimal => Box::new(None::<Decimal>),
            SqlNullType::DateTime => Box::new(None::<NaiveDateTime>),
            SqlNullType::Date => Box::new(None::<NaiveDate>),
            SqlNullType::Text => Box::new(None::<String>),
        },
    }
}

/// Box a column's value as a bindable parameter.
fn bind_param(column: &BoundColumn) -> Box<dyn ToSql + Sync + Send> {
    match &column.value {
        SqlValue::Null(hint) => null_param(&column.type_id, *hint),
        SqlValue::Bool(v) => Box::new(*v),
        SqlValue::I32(v) => Box::new(*v),
        SqlValue::I64(v) => Box::new(*v),
        SqlValue::F64(v) => Box::new(*v),
        SqlValue::Text(v) => Box::new(v.clone()),
        SqlValue::Bytes(v) => Box::new(v.clone()),
        SqlValue::Uuid(v) => Box::new(*v),
        SqlValue::Decimal(v) => Box::new(*v),
        SqlValue::DateTime(v) => Box::new(*v),
        SqlValue::Date(v) => Box::new(*v),
    }
}

/// Decode one column of a fetched row by its declared type.
fn decode_value(row: &tokio_postgres::Row, index: usize, ty: &Type) -> Result<SqlValue> {
    let value = if *ty == Type::BOOL {
        row.try_get::<_, Option<bool>>(index)?.map(SqlValue::Bool)
    } else if *ty == Type::INT2 {
        row.try_get::<_, Option<i16>>(index)?
            .map(|v| SqlValue::I32(v as i32))
    } else if *ty == Type::INT4 {
        row.try_get::<_, Option<i32>>(index)?.map(SqlValue::I32)
    } else if *ty == Type::INT8 {
        row.try_get::<_, Option<i64>>(index)?.map(SqlValue::I64)
    } else if *ty == Type::FLOAT4 {
        row.try_get::<_, Option<f32>>(index)?
            .map(|v| SqlValue::F64(v as f64))
    } else if *ty == Type::FLOAT8 {
        row.try_get::<_, Option<f64>>(index)?.map(SqlValue::F64)
    } else if *ty == Type::UUID {
        row.try_get::<_, Option<Uuid>>(index)?.map(SqlValue::Uuid)
    } else if *ty == Type::NUMERIC {
        row.try_get::<_, Option<Decimal>>(index)?
            .map(SqlValue::Decimal)
    } else if *ty == Type::TIMESTAMP {
        row.try_get::<_, Option<NaiveDateTime>>(index)?
            .map(SqlValue::DateTime)
    } else if *ty == Type::DATE {
        row.try_get::<_, Option<NaiveDate>>(index)?.map(SqlValue::Date)
    } else if *ty == Type::BYTEA {
        row.try_get::<_, Option<Vec<u8>>>(index)?.map(SqlValue::Bytes)
    } else {
        row.try_get::<_, Option<String>>(index)?.map(SqlValue::Text)
    };

    Ok(value.unwrap_or(SqlValue::Null(SqlNullType::Text)))
}

#[async_trait]
impl Connection for PostgresConnection {
    fn quote_ident(&self, name: &str) -> Result<String> {
        identifier::quote_ident(name)
    }

    async fn insert(&self, table: &str, columns: &[BoundColumn]) -> Result<u64> {
        let quoted_names: Vec<&str> = columns.iter().map(|c| c.quoted_name.as_str()).collect();
        let sql = super::insert_sql(&self.quote_ident(table)?, &quoted_names, |i| {
            format!("${}", i)
        });

        let params: Vec<Box<dyn ToSql + Sync + Send>> = columns.iter().map(bind_param).collect();
        let param_refs: Vec<&(dyn ToSql + Sync)> = params
            .iter()
            .map(|p| p.as_ref() as &(dyn ToSql + Sync))
            .collect();

        match self.client.execute(sql.as_str(), &param_refs).await {
            Ok(affected) => Ok(affected),
            Err(e) if e.code() == Some(&SqlState::UNIQUE_VIOLATION) => {
                Err(SeedError::unique_violation(table, e.to_string()))
            }
            Err(e) => Err(SeedError::from(e)),
        }
    }

    async fn select_all(&self, table: &str, limit: Option<usize>) -> Result<Vec<Row>> {
        let mut sql = format!("SELECT * FROM {}", self.quote_ident(table)?);
        if let Some(n) = limit {
            sql.push_str(&format!(" LIMIT {}", n));
        }

        let fetched = self.client.query(sql.as_str(), &[]).await?;
        let mut rows = Vec::with_capacity(fetched.len());
        for pg_row in &fetched {
            let mut row = Row::new();
            for (index, column) in pg_row.columns().iter().enumerate() {
                row = row.set(column.name(), decode_value(pg_row, index, column.type_())?);
            }
            rows.push(row);
        }
        Ok(rows)
    }

    async fn last_insert_id(&self) -> Result<String> {
        let row = self.client.query_one("SELECT LASTVAL()", &[]).await?;
        let id: i64 = row.try_get(0)?;
        Ok(id.to_string())
    }

    async fn execute(&self, sql: &str) -> Result<u64> {
        Ok(self.client.execute(sql, &[]).await?)
    }

    fn db_type(&self) -> &str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ddl::column_types;

    // Connection-level behavior is covered by the SQLite integration suite;
    // these only exercise the pure parameter mapping.

    #[test]
    fn test_null_param_prefers_declared_type() {
        // The boxed value itself is opaque; just make sure every declared
        // type and every hint has a mapping that does not panic.
        for type_id in [
            column_types::INTEGER,
            column_types::BIGINT,
            column_types::BOOLEAN,
            column_types::FLOAT,
            column_types::DECIMAL,
            column_types::DATE,
            column_types::DATETIME,
            column_types::UUID,
            column_types::BINARY,
            column_types::STRING,
            column_types::TEXT,
            "unknown",
        ] {
            let _ = null_param(type_id, SqlNullType::Text);
        }
    }

    #[test]
    fn test_bind_param_covers_all_values() {
        let values = [
            SqlValue::Null(SqlNullType::Int),
            SqlValue::Bool(true),
            SqlValue::I32(1),
            SqlValue::I64(2),
            SqlValue::F64(3.0),
            SqlValue::Text("x".to_string()),
            SqlValue::Bytes(vec![1, 2]),
            SqlValue::Uuid(Uuid::nil()),
            SqlValue::Decimal(Decimal::new(1950, 2)),
        ];
        for value in values {
            let column = BoundColumn {
                quoted_name: "\"c\"".to_string(),
                value,
                type_id: column_types::STRING.to_string(),
            };
            let _ = bind_param(&column);
        }
    }
}
