//! Collaborator traits for the seeding and migration layers.
//!
//! - [`Connection`]: the externally owned database handle
//! - [`SchemaInfo`]: the service translating model classes to physical schema
//!
//! Both are injected explicitly at construction; no component resolves
//! its dependencies from ambient state.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::core::value::{Row, SqlValue};
use crate::error::Result;

/// A column ready for insertion: quoted name, value, and declared type.
///
/// Produced by the seeder's insert path; the quoted name is interpolated
/// into the statement verbatim, the value is bound as a parameter, and the
/// declared type guides NULL binding on strictly typed backends.
#[derive(Debug, Clone)]
pub struct BoundColumn {
    /// Identifier already quoted per the connection's rules.
    pub quoted_name: String,
    /// Value to bind.
    pub value: SqlValue,
    /// Declared column type identifier (see [`crate::ddl::column_types`]).
    pub type_id: String,
}

/// An externally owned database connection.
///
/// The seeding subsystem assumes exclusive use of the connection for the
/// duration of each call but provides no locking itself; concurrent seeding
/// against one connection must be serialized by the caller. Lifetime and
/// teardown belong to whoever constructed the connection.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Quote an identifier per this connection's rules.
    fn quote_ident(&self, name: &str) -> Result<String>;

    /// Insert one row, returning the number of affected rows.
    ///
    /// An empty column list must still issue an insert (`DEFAULT VALUES`),
    /// never skip it. A unique-constraint rejection surfaces as
    /// [`SeedError::UniqueViolation`](crate::error::SeedError::UniqueViolation);
    /// any other failure propagates unchanged.
    async fn insert(&self, table: &str, columns: &[BoundColumn]) -> Result<u64>;

    /// Read all rows from a table, optionally limited.
    async fn select_all(&self, table: &str, limit: Option<usize>) -> Result<Vec<Row>>;

    /// Last identifier generated by an insert on this connection.
    async fn last_insert_id(&self) -> Result<String>;

    /// Execute a raw statement (DDL), returning affected rows.
    async fn execute(&self, sql: &str) -> Result<u64>;

    /// Database type identifier (e.g. "sqlite", "postgres").
    fn db_type(&self) -> &str;

    /// strftime format for datetime literals on this platform.
    ///
    /// PostgreSQL and SQLite both accept the default; override for
    /// backends with a different literal format.
    fn datetime_format(&self) -> &'static str {
        "%Y-%m-%d %H:%M:%S"
    }
}

/// Authoritative mapping from logical model classes to physical schema.
///
/// Read-only from the seeding subsystem's perspective; a miss on either
/// method is a fatal [`Lookup`](crate::error::SeedError::Lookup) error.
pub trait SchemaInfo: Send + Sync {
    /// Physical table name for a model class.
    fn table(&self, model_class: &str) -> Result<&str>;

    /// Attribute name → column type identifier map for a model class.
    fn attribute_types(&self, model_class: &str) -> Result<&HashMap<String, String>>;
}
