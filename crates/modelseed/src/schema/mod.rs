//! In-memory model schema registry.

use std::collections::HashMap;

use crate::core::traits::SchemaInfo;
use crate::error::{Result, SeedError};

/// Schema details for one model class.
#[derive(Debug, Clone)]
struct ModelSchema {
    table: String,
    attribute_types: HashMap<String, String>,
}

/// In-memory [`SchemaInfo`] implementation.
///
/// Built once at startup (typically by the surrounding application from its
/// model definitions) and shared read-only with seeders and migrations.
///
/// # Example
///
/// ```rust
/// use modelseed::schema::ModelSchemas;
/// use modelseed::ddl::column_types;
///
/// let schemas = ModelSchemas::new().register(
///     "User",
///     "users",
///     [
///         ("email".to_string(), column_types::STRING.to_string()),
///         ("age".to_string(), column_types::INTEGER.to_string()),
///     ],
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModelSchemas {
    models: HashMap<String, ModelSchema>,
}

impl ModelSchemas {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model class with its table and attribute type map.
    ///
    /// Registering the same model class twice replaces the earlier entry.
    #[must_use]
    pub fn register(
        mut self,
        model_class: impl Into<String>,
        table: impl Into<String>,
        attribute_types: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        self.models.insert(
            model_class.into(),
            ModelSchema {
                table: table.into(),
                attribute_types: attribute_types.into_iter().collect(),
            },
        );
        self
    }

    /// Check whether a model class is registered.
    #[must_use]
    pub fn contains(&self, model_class: &str) -> bool {
        self.models.contains_key(model_class)
    }

    fn get(&self, model_class: &str) -> Result<&ModelSchema> {
        self.models
            .get(model_class)
            .ok_or_else(|| SeedError::lookup(format!("unknown model class: {}", model_class)))
    }
}

impl SchemaInfo for ModelSchemas {
    fn table(&self, model_class: &str) -> Result<&str> {
        Ok(&self.get(model_class)?.table)
    }

    fn attribute_types(&self, model_class: &str) -> Result<&HashMap<String, String>> {
        Ok(&self.get(model_class)?.attribute_types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ddl::column_types;

    fn user_schemas() -> ModelSchemas {
        ModelSchemas::new().register(
            "User",
            "users",
            [
                ("email".to_string(), column_types::STRING.to_string()),
                ("age".to_string(), column_types::INTEGER.to_string()),
            ],
        )
    }

    #[test]
    fn test_table_lookup() {
        let schemas = user_schemas();
        assert_eq!(schemas.table("User").unwrap(), "users");
    }

    #[test]
    fn test_attribute_types_lookup() {
        let schemas = user_schemas();
        let types = schemas.attribute_types("User").unwrap();
        assert_eq!(types.get("age").map(String::as_str), Some(column_types::INTEGER));
    }

    #[test]
    fn test_unknown_model_is_lookup_error() {
        let schemas = user_schemas();
        let err = schemas.table("Comment").unwrap_err();
        assert!(matches!(err, SeedError::Lookup(_)));
        assert!(err.to_string().contains("Comment"));
    }

    #[test]
    fn test_register_replaces() {
        let schemas = user_schemas().register("User", "accounts", []);
        assert_eq!(schemas.table("User").unwrap(), "accounts");
        assert!(schemas.attribute_types("User").unwrap().is_empty());
    }
}
