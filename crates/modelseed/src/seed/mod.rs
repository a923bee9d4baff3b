//! Row, table, and model seeding.
//!
//! [`Seeder`] is the seeding capability: it pairs a [`Connection`] with a
//! [`SchemaInfo`] service and funnels generated rows through a single
//! insert path. Duplicate rows (unique-constraint rejections) are an
//! expected outcome when reseeding and are absorbed as
//! [`InsertOutcome::DuplicateIgnored`] rather than errors; everything else
//! propagates unchanged.
//!
//! Each row is inserted individually and independently, with no batching
//! and no transaction wrapping at this layer. Callers needing whole-batch
//! atomicity must provide their own transaction scope.

use std::collections::HashMap;

use chrono::Local;
use tracing::{debug, info};

use crate::config::SeedingConfig;
use crate::core::traits::{BoundColumn, Connection, SchemaInfo};
use crate::core::value::Row;
use crate::ddl::column_types;
use crate::error::{Result, SeedError};

/// Resolves an attribute name to its column type identifier.
///
/// An override-table hit wins; anything else falls back to the default
/// type. Pure and order-independent.
#[derive(Debug, Clone, Copy)]
pub struct AttributeTypeResolver<'a> {
    overrides: &'a HashMap<String, String>,
    default_type: &'a str,
}

impl<'a> AttributeTypeResolver<'a> {
    /// Create a resolver over an override table with the standard
    /// string-type fallback.
    #[must_use]
    pub fn new(overrides: &'a HashMap<String, String>) -> Self {
        Self {
            overrides,
            default_type: column_types::STRING,
        }
    }

    /// Replace the fallback type identifier.
    #[must_use]
    pub fn with_default(mut self, default_type: &'a str) -> Self {
        self.default_type = default_type;
        self
    }

    /// Resolve a column name to its type identifier.
    #[must_use]
    pub fn resolve(&self, column: &str) -> &str {
        self.overrides
            .get(column)
            .map(String::as_str)
            .unwrap_or(self.default_type)
    }
}

/// Outcome of a single row insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The row was inserted (exactly one row affected).
    Inserted,
    /// A unique constraint rejected the row; treated as success.
    DuplicateIgnored,
}

/// Counters for a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Rows actually inserted.
    pub rows_inserted: u64,
    /// Duplicate rows absorbed.
    pub duplicates_ignored: u64,
}

impl SeedReport {
    fn record(&mut self, outcome: InsertOutcome) {
        match outcome {
            InsertOutcome::Inserted => self.rows_inserted += 1,
            InsertOutcome::DuplicateIgnored => self.duplicates_ignored += 1,
        }
    }

    /// Total insert attempts accounted for.
    #[must_use]
    pub fn attempts(&self) -> u64 {
        self.rows_inserted + self.duplicates_ignored
    }
}

/// Behavior knobs for a [`Seeder`].
#[derive(Debug, Clone)]
pub struct SeedOptions {
    /// Fallback type identifier for attributes absent from the override table.
    pub default_type: String,
    /// Log absorbed duplicates at debug level.
    pub log_duplicates: bool,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            default_type: column_types::STRING.to_string(),
            log_duplicates: true,
        }
    }
}

impl From<&SeedingConfig> for SeedOptions {
    fn from(config: &SeedingConfig) -> Self {
        Self {
            default_type: config.default_type.clone(),
            log_duplicates: config.log_duplicates,
        }
    }
}

/// Dependencies handed to row generators.
///
/// Generators may read reference data (foreign keys, existing rows) through
/// the connection or resolve other models through the schema service.
pub struct SeedContext<'a> {
    /// The connection the generated row will be inserted on.
    pub connection: &'a dyn Connection,
    /// The schema-info service.
    pub schemas: &'a dyn SchemaInfo,
    /// Zero-based index of the record being generated.
    pub record_index: usize,
}

impl SeedContext<'_> {
    /// Current timestamp formatted for the connection's platform, for
    /// filling `created_at`-style columns.
    #[must_use]
    pub fn now(&self) -> String {
        now_for(self.connection)
    }
}

fn now_for(conn: &dyn Connection) -> String {
    Local::now()
        .naive_local()
        .format(conn.datetime_format())
        .to_string()
}

/// The seeding capability: inserts generated or fixed rows into tables
/// resolved directly or through model classes.
///
/// # Example
///
/// ```rust,no_run
/// use modelseed::drivers::SqliteConnection;
/// use modelseed::schema::ModelSchemas;
/// use modelseed::seed::Seeder;
/// use modelseed::core::Row;
///
/// # async fn demo() -> modelseed::Result<()> {
/// let conn = SqliteConnection::connect("sqlite::memory:").await?;
/// let schemas = ModelSchemas::new().register("User", "users", []);
/// let seeder = Seeder::new(&conn, &schemas);
///
/// let report = seeder
///     .seed_models(10, "User", |ctx| {
///         Row::new().set("name", format!("user-{}", ctx.record_index))
///     })
///     .await?;
/// assert_eq!(report.attempts(), 10);
/// # Ok(())
/// # }
/// ```
pub struct Seeder<'a> {
    conn: &'a dyn Connection,
    schemas: &'a dyn SchemaInfo,
    options: SeedOptions,
}

impl<'a> Seeder<'a> {
    /// Create a seeder with default options.
    pub fn new(conn: &'a dyn Connection, schemas: &'a dyn SchemaInfo) -> Self {
        Self {
            conn,
            schemas,
            options: SeedOptions::default(),
        }
    }

    /// Replace the seeder's options.
    #[must_use]
    pub fn with_options(mut self, options: SeedOptions) -> Self {
        self.options = options;
        self
    }

    /// Seed `records` generated rows into a table.
    ///
    /// The generator is invoked exactly `records` times; every generated
    /// row is immediately inserted. A failure on row `i` leaves rows
    /// `0..i` in place.
    pub async fn seed_table<F>(
        &self,
        records: usize,
        table: &str,
        mut generate: F,
        type_overrides: &HashMap<String, String>,
    ) -> Result<SeedReport>
    where
        F: FnMut(&SeedContext<'_>) -> Row,
    {
        let resolver =
            AttributeTypeResolver::new(type_overrides).with_default(&self.options.default_type);

        let mut report = SeedReport::default();
        for record_index in 0..records {
            let ctx = SeedContext {
                connection: self.conn,
                schemas: self.schemas,
                record_index,
            };
            let row = generate(&ctx);
            let outcome = self.insert_row(table, &row, resolver).await?;
            report.record(outcome);
        }

        info!(
            table,
            rows_inserted = report.rows_inserted,
            duplicates_ignored = report.duplicates_ignored,
            "seeded table"
        );
        Ok(report)
    }

    /// Seed `records` generated rows into a model's table, using the
    /// model's attribute types as the override table.
    pub async fn seed_models<F>(
        &self,
        records: usize,
        model_class: &str,
        generate: F,
    ) -> Result<SeedReport>
    where
        F: FnMut(&SeedContext<'_>) -> Row,
    {
        let table = self.schemas.table(model_class)?;
        let attribute_types = self.schemas.attribute_types(model_class)?;
        self.seed_table(records, table, generate, attribute_types)
            .await
    }

    /// Insert one fixed row into a table.
    pub async fn seed_row(
        &self,
        table: &str,
        row: &Row,
        type_overrides: &HashMap<String, String>,
    ) -> Result<InsertOutcome> {
        let resolver =
            AttributeTypeResolver::new(type_overrides).with_default(&self.options.default_type);
        self.insert_row(table, row, resolver).await
    }

    /// Insert one fixed row into a model's table.
    pub async fn seed_model(&self, model_class: &str, row: &Row) -> Result<InsertOutcome> {
        let table = self.schemas.table(model_class)?;
        let attribute_types = self.schemas.attribute_types(model_class)?;
        self.seed_row(table, row, attribute_types).await
    }

    /// Read rows from a table, optionally limited.
    ///
    /// `limit`, when given, must be positive.
    pub async fn read_table(&self, table: &str, limit: Option<usize>) -> Result<Vec<Row>> {
        if limit == Some(0) {
            return Err(SeedError::Precondition(
                "read limit must be positive".to_string(),
            ));
        }
        self.conn.select_all(table, limit).await
    }

    /// Read rows from a model's table, optionally limited.
    pub async fn read_models(&self, model_class: &str, limit: Option<usize>) -> Result<Vec<Row>> {
        let table = self.schemas.table(model_class)?;
        self.read_table(table, limit).await
    }

    /// Last identifier generated by an insert on this connection.
    pub async fn last_insert_id(&self) -> Result<String> {
        self.conn.last_insert_id().await
    }

    /// Current timestamp formatted for the connection's platform.
    #[must_use]
    pub fn now(&self) -> String {
        now_for(self.conn)
    }

    /// The single insert path: quote identifiers, resolve declared types,
    /// issue exactly one insert, classify the outcome.
    async fn insert_row(
        &self,
        table: &str,
        row: &Row,
        resolver: AttributeTypeResolver<'_>,
    ) -> Result<InsertOutcome> {
        let mut columns = Vec::with_capacity(row.len());
        for (column, value) in row.iter() {
            columns.push(BoundColumn {
                quoted_name: self.conn.quote_ident(column)?,
                value: value.clone(),
                type_id: resolver.resolve(column).to_string(),
            });
        }

        match self.conn.insert(table, &columns).await {
            Ok(1) => Ok(InsertOutcome::Inserted),
            Ok(affected) => Err(SeedError::insert(
                table,
                format!("insert affected {} rows unexpectedly", affected),
            )),
            Err(SeedError::UniqueViolation { detail, .. }) => {
                if self.options.log_duplicates {
                    debug!(table, %detail, "duplicate row ignored");
                }
                Ok(InsertOutcome::DuplicateIgnored)
            }
            Err(other) => Err(other),
        }
    }
}
