//! Table and column definitions with SQL rendering.
//!
//! Migration steps build [`TableDef`]s and render them to `CREATE TABLE`
//! statements through a [`Connection`]'s quoting rules. Column types are
//! logical identifiers (see [`column_types`]) mapped to SQL type text; the
//! [`column_types::RAW_NAME`] type bypasses the mapping and emits
//! caller-supplied SQL type text verbatim.

use crate::core::traits::Connection;
use crate::error::{Result, SeedError};

/// Logical column type identifiers.
///
/// These are the identifiers stored in attribute type maps and resolved by
/// the seeding layer; [`type_sql`] maps them to SQL type text.
pub mod column_types {
    /// Short string, the default type for unresolved attributes.
    pub const STRING: &str = "string";
    /// 32-bit integer.
    pub const INTEGER: &str = "integer";
    /// 64-bit integer.
    pub const BIGINT: &str = "bigint";
    /// Boolean.
    pub const BOOLEAN: &str = "boolean";
    /// Unbounded text.
    pub const TEXT: &str = "text";
    /// Double-precision float.
    pub const FLOAT: &str = "float";
    /// Arbitrary-precision decimal.
    pub const DECIMAL: &str = "decimal";
    /// Calendar date.
    pub const DATE: &str = "date";
    /// Timestamp without timezone.
    pub const DATETIME: &str = "datetime";
    /// UUID.
    pub const UUID: &str = "uuid";
    /// Binary blob.
    pub const BINARY: &str = "binary";
    /// Pass-through type: the column's raw SQL type text is emitted verbatim.
    pub const RAW_NAME: &str = "raw_name";
}

/// Map a logical column type identifier to SQL type text.
///
/// Unknown identifiers fall back to the string type, mirroring the
/// seeding layer's default.
pub fn type_sql(type_id: &str) -> &'static str {
    match type_id {
        column_types::INTEGER => "integer",
        column_types::BIGINT => "bigint",
        column_types::BOOLEAN => "boolean",
        column_types::TEXT => "text",
        column_types::FLOAT => "double precision",
        column_types::DECIMAL => "numeric(19,4)",
        column_types::DATE => "date",
        column_types::DATETIME => "timestamp",
        column_types::UUID => "uuid",
        column_types::BINARY => "bytea",
        _ => "varchar(255)",
    }
}

/// Column definition for DDL rendering.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    /// Column name.
    pub name: String,

    /// Logical type identifier (see [`column_types`]).
    pub type_id: String,

    /// Raw SQL type text, required when `type_id` is [`column_types::RAW_NAME`].
    pub raw_type: Option<String>,

    /// Whether the column allows NULL.
    pub nullable: bool,

    /// Whether the column is the primary key.
    pub primary_key: bool,

    /// Whether the column carries a UNIQUE constraint.
    pub unique: bool,
}

impl ColumnDef {
    /// Create a column with a logical type.
    pub fn new(name: impl Into<String>, type_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_id: type_id.into(),
            raw_type: None,
            nullable: true,
            primary_key: false,
            unique: false,
        }
    }

    /// Create a column whose SQL type text is emitted verbatim.
    pub fn raw(name: impl Into<String>, raw_type: impl Into<String>) -> Self {
        Self {
            raw_type: Some(raw_type.into()),
            ..Self::new(name, column_types::RAW_NAME)
        }
    }

    /// Mark the column NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Mark the column as the primary key.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    /// Add a UNIQUE constraint.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// SQL type text for this column.
    ///
    /// For [`column_types::RAW_NAME`] columns the raw text is returned
    /// unchanged, no escaping. A missing or empty raw string is a fatal
    /// configuration error surfaced here, at schema-build time.
    pub fn sql_type(&self) -> Result<&str> {
        if self.type_id == column_types::RAW_NAME {
            match self.raw_type.as_deref() {
                Some(raw) if !raw.is_empty() => Ok(raw),
                _ => Err(SeedError::Config(format!(
                    "raw type text is not set for column {}",
                    self.name
                ))),
            }
        } else {
            Ok(type_sql(&self.type_id))
        }
    }
}

/// Table definition for DDL rendering.
#[derive(Debug, Clone)]
pub struct TableDef {
    /// Table name.
    pub name: String,

    /// Column definitions in declaration order.
    pub columns: Vec<ColumnDef>,
}

impl TableDef {
    /// Create a table definition with no columns.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Append a column.
    #[must_use]
    pub fn column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }
}

/// Render one column declaration.
fn column_sql(conn: &dyn Connection, col: &ColumnDef) -> Result<String> {
    let mut sql = format!("{} {}", conn.quote_ident(&col.name)?, col.sql_type()?);
    if col.primary_key {
        sql.push_str(" PRIMARY KEY");
    } else if !col.nullable {
        sql.push_str(" NOT NULL");
    }
    if col.unique {
        sql.push_str(" UNIQUE");
    }
    Ok(sql)
}

/// Render a `CREATE TABLE` statement for a table definition.
pub fn create_table_sql(conn: &dyn Connection, table: &TableDef) -> Result<String> {
    if table.columns.is_empty() {
        return Err(SeedError::Config(format!(
            "table {} has no columns",
            table.name
        )));
    }

    let columns = table
        .columns
        .iter()
        .map(|c| column_sql(conn, c))
        .collect::<Result<Vec<_>>>()?;

    Ok(format!(
        "CREATE TABLE {} ({})",
        conn.quote_ident(&table.name)?,
        columns.join(", ")
    ))
}

/// Render a `DROP TABLE IF EXISTS` statement.
pub fn drop_table_sql(conn: &dyn Connection, table_name: &str) -> Result<String> {
    Ok(format!(
        "DROP TABLE IF EXISTS {}",
        conn.quote_ident(table_name)?
    ))
}
