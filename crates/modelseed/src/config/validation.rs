//! Configuration validation.

use super::Config;
use crate::error::{Result, SeedError};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    match config.database.r#type.as_str() {
        "sqlite" => {}
        "postgres" => {
            if config.database.host.is_empty() {
                return Err(SeedError::Config("database.host is required".into()));
            }
            if config.database.database.is_empty() {
                return Err(SeedError::Config("database.database is required".into()));
            }
            if config.database.user.is_empty() {
                return Err(SeedError::Config("database.user is required".into()));
            }
        }
        other => {
            return Err(SeedError::Config(format!(
                "database.type must be 'sqlite' or 'postgres', got '{}'",
                other
            )));
        }
    }

    if config.seeding.default_type.is_empty() {
        return Err(SeedError::Config(
            "seeding.default_type must not be empty".into(),
        ));
    }

    Ok(())
}
