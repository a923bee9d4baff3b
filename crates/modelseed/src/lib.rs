//! # modelseed
//!
//! Schema-aware database seeding and migration support.
//!
//! This library populates relational tables with generated or fixed rows and
//! supplies schema metadata to migration steps:
//!
//! - **Model resolution**: logical model classes map to physical tables and
//!   column types through a [`SchemaInfo`] service
//! - **Idempotent seeding**: unique-constraint rejections are absorbed as an
//!   explicit [`DuplicateIgnored`](seed::InsertOutcome::DuplicateIgnored)
//!   outcome and counted, so reseeding is safe
//! - **Migration contexts**: immutable model/schema pairings handed to
//!   sequential migration steps
//! - **Raw column types**: DDL rendering can pass caller-supplied SQL type
//!   text through verbatim
//!
//! ## Example
//!
//! ```rust,no_run
//! use modelseed::{ModelSchemas, Row, Seeder, SqliteConnection};
//! use modelseed::ddl::column_types;
//!
//! #[tokio::main]
//! async fn main() -> modelseed::Result<()> {
//!     let conn = SqliteConnection::connect("sqlite::memory:").await?;
//!     let schemas = ModelSchemas::new().register(
//!         "User",
//!         "users",
//!         [("email".to_string(), column_types::STRING.to_string())],
//!     );
//!
//!     let seeder = Seeder::new(&conn, &schemas);
//!     let report = seeder
//!         .seed_models(100, "User", |ctx| {
//!             Row::new().set("email", format!("user-{}@example.com", ctx.record_index))
//!         })
//!         .await?;
//!     println!("inserted {} rows", report.rows_inserted);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod ddl;
pub mod drivers;
pub mod error;
pub mod migration;
pub mod schema;
pub mod seed;

// Re-exports for convenient access
pub use config::{Config, DatabaseConfig, SeedingConfig};
pub use crate::core::{BoundColumn, Connection, Row, SchemaInfo, SqlNullType, SqlValue};
pub use ddl::{ColumnDef, TableDef};
pub use drivers::{PostgresConnection, SqliteConnection};
pub use error::{Result, SeedError};
pub use migration::{Migration, MigrationContext, MigrationRunner};
pub use schema::ModelSchemas;
pub use seed::{AttributeTypeResolver, InsertOutcome, SeedContext, SeedOptions, SeedReport, Seeder};
