//! Error types for seeding and migration operations.

use thiserror::Error;

/// Main error type for seeding and migration operations.
#[derive(Error, Debug)]
pub enum SeedError {
    /// Configuration error (invalid YAML, missing raw type text, bad identifier, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unknown model class or missing schema entry.
    #[error("Lookup failed: {0}")]
    Lookup(String),

    /// Invalid argument caught at construction time.
    #[error("Precondition violated: {0}")]
    Precondition(String),

    /// A unique constraint rejected the row.
    ///
    /// The seeding layer absorbs this as [`InsertOutcome::DuplicateIgnored`](crate::seed::InsertOutcome);
    /// it only reaches callers that bypass the seeder and talk to a connection directly.
    #[error("Unique constraint violated on table {table}: {detail}")]
    UniqueViolation { table: String, detail: String },

    /// Any non-uniqueness insert failure.
    #[error("Insert failed for table {table}: {message}")]
    Insert { table: String, message: String },

    /// A migration step failed.
    #[error("Migration {name} failed: {message}")]
    Migration { name: String, message: String },

    /// PostgreSQL connection or query error.
    #[error("Database error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    /// SQLite connection or query error.
    #[error("Database error: {0}")]
    Sqlite(#[from] sqlx::Error),

    /// IO error (file operations).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SeedError {
    /// Create a Lookup error.
    pub fn lookup(message: impl Into<String>) -> Self {
        SeedError::Lookup(message.into())
    }

    /// Create an Insert error with table context.
    pub fn insert(table: impl Into<String>, message: impl Into<String>) -> Self {
        SeedError::Insert {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a UniqueViolation error with table context.
    pub fn unique_violation(table: impl Into<String>, detail: impl Into<String>) -> Self {
        SeedError::UniqueViolation {
            table: table.into(),
            detail: detail.into(),
        }
    }

    /// Create a Migration error.
    pub fn migration(name: impl Into<String>, message: impl Into<String>) -> Self {
        SeedError::Migration {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Format error with full details including error chain.
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for seeding and migration operations.
pub type Result<T> = std::result::Result<T, SeedError>;
