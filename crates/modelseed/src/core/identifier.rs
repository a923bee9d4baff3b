//! Identifier validation and quoting.
//!
//! SQL identifiers (table names, column names) cannot be passed as
//! parameters in prepared statements, only data values can. To construct
//! dynamic SQL safely, identifiers are validated for suspicious patterns
//! and quoted with database rules before interpolation.

use crate::error::{Result, SeedError};

/// Maximum identifier length (conservative limit across databases).
/// - PostgreSQL: 63 bytes
/// - SQLite: no hard limit, but long names indicate malformed input
const MAX_IDENTIFIER_LENGTH: usize = 128;

/// Validate an identifier for security issues.
///
/// Rejects:
/// - Empty identifiers
/// - Identifiers containing null bytes (injection vector)
/// - Identifiers exceeding maximum length
///
/// # Errors
///
/// Returns `SeedError::Config` for invalid identifiers with a descriptive message.
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(SeedError::Config("Identifier cannot be empty".to_string()));
    }

    if name.contains('\0') {
        return Err(SeedError::Config(format!(
            "Identifier contains null byte (possible injection attempt): {:?}",
            name
        )));
    }

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(SeedError::Config(format!(
            "Identifier exceeds maximum length of {} bytes (got {} bytes): {:?}",
            MAX_IDENTIFIER_LENGTH,
            name.len(),
            name
        )));
    }

    Ok(())
}

/// Quote an identifier with double quotes (PostgreSQL and SQLite rules).
///
/// Escapes embedded double quotes by doubling them and wraps in double
/// quotes. Validates the identifier before quoting.
pub fn quote_ident(name: &str) -> Result<String> {
    validate_identifier(name)?;
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("users").unwrap(), "\"users\"");
        assert_eq!(quote_ident("Users").unwrap(), "\"Users\"");
        assert_eq!(quote_ident("table\"name").unwrap(), "\"table\"\"name\"");
    }

    #[test]
    fn test_empty_identifier_rejected() {
        assert!(quote_ident("").is_err());
    }

    #[test]
    fn test_null_byte_rejected() {
        let err = validate_identifier("users\0; DROP TABLE users").unwrap_err();
        assert!(err.to_string().contains("null byte"));
    }

    #[test]
    fn test_overlong_identifier_rejected() {
        let long = "a".repeat(200);
        assert!(validate_identifier(&long).is_err());
    }
}
