//! Migration steps and the context handed to them.
//!
//! A [`Migration`] is one schema-change step tied to a model class. The
//! [`MigrationRunner`] executes steps sequentially, building an immutable
//! [`MigrationContext`] for each so the step can resolve its table name and
//! attribute types without touching ambient state.

use async_trait::async_trait;
use tracing::info;

use crate::core::traits::{Connection, SchemaInfo};
use crate::error::{Result, SeedError};

/// Immutable pairing of a model class and the schema-info service.
///
/// Created once per migration step and discarded when the step completes.
pub struct MigrationContext<'a> {
    model_class: String,
    schemas: &'a dyn SchemaInfo,
}

impl std::fmt::Debug for MigrationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationContext")
            .field("model_class", &self.model_class)
            .finish_non_exhaustive()
    }
}

impl<'a> MigrationContext<'a> {
    /// Create a context for one model class.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Precondition` for an empty model class.
    pub fn new(model_class: impl Into<String>, schemas: &'a dyn SchemaInfo) -> Result<Self> {
        let model_class = model_class.into();
        if model_class.is_empty() {
            return Err(SeedError::Precondition(
                "migration context requires a non-empty model class".to_string(),
            ));
        }
        Ok(Self {
            model_class,
            schemas,
        })
    }

    /// The model class this context was built for.
    #[must_use]
    pub fn model_class(&self) -> &str {
        &self.model_class
    }

    /// The schema-info service.
    #[must_use]
    pub fn schemas(&self) -> &dyn SchemaInfo {
        self.schemas
    }

    /// Physical table name for this context's model class.
    pub fn table(&self) -> Result<&str> {
        self.schemas.table(&self.model_class)
    }

    /// Attribute type map for this context's model class.
    pub fn attribute_types(
        &self,
    ) -> Result<&std::collections::HashMap<String, String>> {
        self.schemas.attribute_types(&self.model_class)
    }
}

/// One schema-change step for a model's table.
#[async_trait]
pub trait Migration: Send + Sync {
    /// The model class this step migrates.
    fn model_class(&self) -> &str;

    /// Apply the step.
    async fn up(&self, conn: &dyn Connection, ctx: &MigrationContext<'_>) -> Result<()>;

    /// Revert the step.
    async fn down(&self, conn: &dyn Connection, ctx: &MigrationContext<'_>) -> Result<()>;
}

/// Executes migration steps sequentially against one connection.
pub struct MigrationRunner<'a> {
    conn: &'a dyn Connection,
    schemas: &'a dyn SchemaInfo,
}

impl<'a> MigrationRunner<'a> {
    /// Create a runner over a connection and schema service.
    pub fn new(conn: &'a dyn Connection, schemas: &'a dyn SchemaInfo) -> Self {
        Self { conn, schemas }
    }

    /// Apply all steps in order, returning the number applied.
    ///
    /// Stops at the first failure; steps already applied stay applied
    /// (transactional DDL is the caller's concern, as with seeding).
    pub async fn migrate(&self, migrations: &[Box<dyn Migration>]) -> Result<usize> {
        for (applied, migration) in migrations.iter().enumerate() {
            let ctx = MigrationContext::new(migration.model_class(), self.schemas)?;
            migration.up(self.conn, &ctx).await.map_err(|e| {
                SeedError::migration(migration.model_class(), e.to_string())
            })?;
            info!(
                model_class = migration.model_class(),
                step = applied + 1,
                "applied migration"
            );
        }
        Ok(migrations.len())
    }

    /// Revert all steps in reverse order, returning the number reverted.
    pub async fn rollback(&self, migrations: &[Box<dyn Migration>]) -> Result<usize> {
        for migration in migrations.iter().rev() {
            let ctx = MigrationContext::new(migration.model_class(), self.schemas)?;
            migration.down(self.conn, &ctx).await.map_err(|e| {
                SeedError::migration(migration.model_class(), e.to_string())
            })?;
            info!(model_class = migration.model_class(), "reverted migration");
        }
        Ok(migrations.len())
    }
}
