//! Configuration type definitions.

use serde::{Deserialize, Serialize};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Database connection configuration.
    pub database: DatabaseConfig,

    /// Seeding behavior configuration.
    #[serde(default)]
    pub seeding: SeedingConfig,
}

/// Database connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database type: "sqlite" or "postgres".
    #[serde(default = "default_sqlite")]
    pub r#type: String,

    /// SQLite database path; empty selects an in-memory database.
    #[serde(default)]
    pub path: String,

    /// Database host (postgres).
    #[serde(default)]
    pub host: String,

    /// Database port (default: 5432).
    #[serde(default = "default_pg_port")]
    pub port: u16,

    /// Database name (postgres).
    #[serde(default)]
    pub database: String,

    /// Username (postgres).
    #[serde(default)]
    pub user: String,

    /// Password (postgres).
    #[serde(default)]
    pub password: String,

    /// SSL mode (default: "prefer").
    #[serde(default = "default_prefer")]
    pub ssl_mode: String,
}

/// Seeding behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedingConfig {
    /// Fallback column type for attributes without an override (default: "string").
    #[serde(default = "default_string_type")]
    pub default_type: String,

    /// Log absorbed duplicate rows at debug level (default: true).
    #[serde(default = "default_true")]
    pub log_duplicates: bool,
}

impl Default for SeedingConfig {
    fn default() -> Self {
        Self {
            default_type: default_string_type(),
            log_duplicates: true,
        }
    }
}

// Default value functions for serde

fn default_sqlite() -> String {
    "sqlite".to_string()
}

fn default_pg_port() -> u16 {
    5432
}

fn default_prefer() -> String {
    "prefer".to_string()
}

fn default_string_type() -> String {
    crate::ddl::column_types::STRING.to_string()
}

fn default_true() -> bool {
    true
}
