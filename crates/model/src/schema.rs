//! Storage schema of the filtered entity.
//!
//! Entities are stored in a table that mixes a handful of native relational
//! columns with one JSON document column holding every other attribute. The
//! filter compiler consults this schema to decide how a field is addressed.

use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_DOCUMENT_COLUMN: &str = "Fields";
pub const DEFAULT_TEXT_SEARCH_CONFIG: &str = "english";
pub const DEFAULT_RELATIONAL_COLUMNS: [&str; 3] = ["ID", "Type", "Version"];

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse schema: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid {setting} '{value}': only ASCII letters, digits and '_' are allowed")]
    InvalidIdentifier { setting: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageSchema {
    /// Field names backed by a native column. Every other field lives in the
    /// document column.
    pub relational_columns: BTreeSet<String>,

    /// Name of the JSON document column.
    pub document_column: String,

    /// Text search configuration passed to `to_tsvector`/`to_tsquery`.
    pub text_search_config: String,
}

impl Default for StorageSchema {
    fn default() -> Self {
        Self {
            relational_columns: DEFAULT_RELATIONAL_COLUMNS
                .iter()
                .map(|c| c.to_string())
                .collect(),
            document_column: DEFAULT_DOCUMENT_COLUMN.to_string(),
            text_search_config: DEFAULT_TEXT_SEARCH_CONFIG.to_string(),
        }
    }
}

impl StorageSchema {
    pub fn new<I, S>(relational_columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            relational_columns: relational_columns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_document_column(mut self, column: impl Into<String>) -> Self {
        self.document_column = column.into();
        self
    }

    pub fn with_text_search_config(mut self, config: impl Into<String>) -> Self {
        self.text_search_config = config.into();
        self
    }

    /// Does the field name reference the document column rather than a native column?
    pub fn is_document_field(&self, field_name: &str) -> bool {
        !self.relational_columns.contains(field_name)
    }

    /// All names end up verbatim in generated SQL, so they must be plain identifiers.
    pub fn validate(&self) -> Result<(), SchemaError> {
        check_identifier("document column", &self.document_column)?;
        check_identifier("text search config", &self.text_search_config)?;
        for column in &self.relational_columns {
            check_identifier("relational column", column)?;
        }
        Ok(())
    }

    pub fn from_toml_str(source: &str) -> Result<Self, SchemaError> {
        let schema: StorageSchema = toml::from_str(source)?;
        schema.validate()?;
        Ok(schema)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let schema = Self::from_toml_str(&source)?;
        debug!(
            path = %path.display(),
            relational_columns = schema.relational_columns.len(),
            "Loaded storage schema"
        );
        Ok(schema)
    }
}

fn check_identifier(setting: &'static str, value: &str) -> Result<(), SchemaError> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
    if valid {
        Ok(())
    } else {
        Err(SchemaError::InvalidIdentifier {
            setting,
            value: value.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_schema() {
        let schema = StorageSchema::default();
        assert!(!schema.is_document_field("ID"));
        assert!(!schema.is_document_field("Type"));
        assert!(!schema.is_document_field("Version"));
        assert!(schema.is_document_field("title"));
        // lookups are case sensitive
        assert!(schema.is_document_field("id"));
        assert_eq!(schema.document_column, "Fields");
        assert_eq!(schema.text_search_config, "english");
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial_uses_defaults() {
        let schema = StorageSchema::from_toml_str(r#"relational_columns = ["ID", "Owner"]"#)
            .expect("valid schema");
        assert!(!schema.is_document_field("Owner"));
        assert!(schema.is_document_field("Type"));
        assert_eq!(schema.document_column, DEFAULT_DOCUMENT_COLUMN);
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        let err = StorageSchema::from_toml_str("columns = []").unwrap_err();
        assert!(matches!(err, SchemaError::Parse(_)));
    }

    #[test]
    fn test_invalid_identifiers() {
        let err = StorageSchema::from_toml_str(r#"document_column = "Fields'--""#).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::InvalidIdentifier {
                setting: "document column",
                ..
            }
        ));

        let schema = StorageSchema::default().with_text_search_config("");
        assert!(schema.validate().is_err());

        let schema = StorageSchema::new(["ID", "bad column"]);
        assert!(schema.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "relational_columns = [\"ID\"]\ndocument_column = \"Attributes\"\ntext_search_config = \"simple\""
        )
        .expect("write schema");

        let schema = StorageSchema::load(file.path()).expect("load schema");
        assert_eq!(schema, StorageSchema::new(["ID"])
            .with_document_column("Attributes")
            .with_text_search_config("simple"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = StorageSchema::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, SchemaError::Io { .. }));
    }
}
