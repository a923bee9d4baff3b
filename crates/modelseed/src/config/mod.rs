//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::error::Result;
use std::path::Path;

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

impl DatabaseConfig {
    /// Build a connection string for tokio-postgres.
    pub fn postgres_connection_string(&self) -> String {
        format!(
            "host={} port={} dbname={} user={} password={} sslmode={}",
            self.host, self.port, self.database, self.user, self.password, self.ssl_mode
        )
    }

    /// Build a connection URL for the SQLite driver.
    ///
    /// An empty path selects an in-memory database.
    pub fn sqlite_url(&self) -> String {
        if self.path.is_empty() {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite://{}", self.path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml_minimal_sqlite() {
        let config = Config::from_yaml("database:\n  type: sqlite\n").unwrap();
        assert_eq!(config.database.r#type, "sqlite");
        assert_eq!(config.database.sqlite_url(), "sqlite::memory:");
        assert!(config.seeding.log_duplicates);
    }

    #[test]
    fn test_from_yaml_postgres() {
        let yaml = r#"
database:
  type: postgres
  host: db.example.com
  database: app
  user: seeder
  password: secret
seeding:
  log_duplicates: false
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(
            config.database.postgres_connection_string(),
            "host=db.example.com port=5432 dbname=app user=seeder password=secret sslmode=prefer"
        );
        assert!(!config.seeding.log_duplicates);
    }

    #[test]
    fn test_sqlite_url_with_path() {
        let config = Config::from_yaml("database:\n  type: sqlite\n  path: data/seed.db\n").unwrap();
        assert_eq!(config.database.sqlite_url(), "sqlite://data/seed.db");
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(Config::from_yaml("database: [not a map").is_err());
    }
}
