//! Rename schema: a flat map from dotted path to replacement key name.
//!
//! Paths join mapping keys with `.` from the document root. Sequences do not
//! add a segment, so `"users.id"` addresses the `id` key of every element of
//! a `users` array. Schema documents can be written as JSON, YAML or TOML;
//! all three must be a single flat object whose values are strings.

use crate::error::{Error, Result};
use crate::utils::io;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    entries: HashMap<String, String>,
}

/// Document format of a schema file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    Json,
    Yaml,
    Toml,
}

impl SchemaFormat {
    /// Pick a format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(SchemaFormat::Json),
            Some("yaml") | Some("yml") => Ok(SchemaFormat::Yaml),
            Some("toml") => Ok(SchemaFormat::Toml),
            _ => Err(Error::validation_invalid_argument(
                "schema_file",
                format!(
                    "Cannot infer schema format from '{}'. Use a .json, .yaml, .yml or .toml file",
                    path.display()
                ),
                Some(path.display().to_string()),
                Some(vec!["json".into(), "yaml".into(), "yml".into(), "toml".into()]),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaFormat::Json => "json",
            SchemaFormat::Yaml => "yaml",
            SchemaFormat::Toml => "toml",
        }
    }
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rename for `path`, returning the previous name.
    pub fn insert(&mut self, path: impl Into<String>, name: impl Into<String>) -> Option<String> {
        self.entries.insert(path.into(), name.into())
    }

    /// Raw lookup, including entries whose replacement is empty.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    /// The key to substitute at `path`, if any.
    ///
    /// An empty replacement never renames: the original key is kept.
    pub fn rename_for(&self, path: &str) -> Option<&str> {
        self.get(path).filter(|name| !name.is_empty())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, n)| (p.as_str(), n.as_str()))
    }

    /// Entries sorted by path, for stable output.
    pub fn sorted_entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Build a schema from an already-parsed document.
    pub fn from_value(value: &Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(Error::config_invalid_value(
                "schema",
                Some(value_kind(value).to_string()),
                "Schema must be an object mapping dotted paths to key names",
            ));
        };

        let mut schema = Schema::new();
        for (path, name) in map {
            match name {
                Value::String(name) => {
                    schema.insert(path.clone(), name.clone());
                }
                other => {
                    return Err(Error::config_invalid_value(
                        path.clone(),
                        Some(other.to_string()),
                        format!(
                            "Replacement name must be a string, got {}",
                            value_kind(other)
                        ),
                    )
                    .with_hint("Quote dotted paths in TOML so they stay flat: \"users.id\" = \"userId\""));
                }
            }
        }

        Ok(schema)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| Error::config_invalid_json("schema", e.to_string()))?;
        Self::from_value(&value)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let value: Value = serde_yml::from_str(text)
            .map_err(|e| Error::config_invalid_json("schema", e.to_string()))?;
        Self::from_value(&value)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let value: Value = toml::from_str(text)
            .map_err(|e| Error::config_invalid_json("schema", e.to_string()))?;
        Self::from_value(&value)
    }

    pub fn parse(text: &str, format: SchemaFormat) -> Result<Self> {
        match format {
            SchemaFormat::Json => Self::from_json_str(text),
            SchemaFormat::Yaml => Self::from_yaml_str(text),
            SchemaFormat::Toml => Self::from_toml_str(text),
        }
    }

    /// Read a schema file, choosing the parser from its extension.
    pub fn load(path: &Path) -> Result<Self> {
        let format = SchemaFormat::from_path(path)?;
        let text = io::read_file(path, &format!("read schema {}", path.display()))?;

        let schema = Self::parse(&text, format).map_err(|mut err| {
            if err.code == crate::error::ErrorCode::ConfigInvalidJson {
                err.details["path"] = Value::String(path.display().to_string());
            }
            err
        })?;

        log_status!(
            "schema",
            "Loaded {} path(s) from {} ({})",
            schema.len(),
            path.display(),
            format.as_str()
        );
        Ok(schema)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Schema {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn rename_for_ignores_empty_replacement() {
        let schema: Schema = [("id", ""), ("name", "fullName")].into_iter().collect();
        assert!(schema.contains("id"));
        assert_eq!(schema.get("id"), Some(""));
        assert_eq!(schema.rename_for("id"), None);
        assert_eq!(schema.rename_for("name"), Some("fullName"));
    }

    #[test]
    fn from_json_str_parses_flat_object() {
        let schema = Schema::from_json_str(r#"{"users.id": "userId", "isActive": "status"}"#).unwrap();
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.rename_for("users.id"), Some("userId"));
    }

    #[test]
    fn from_json_str_rejects_non_string_value() {
        let err = Schema::from_json_str(r#"{"id": 5}"#).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
        assert_eq!(err.details["key"], "id");
    }

    #[test]
    fn from_json_str_rejects_array_document() {
        let err = Schema::from_json_str(r#"["id"]"#).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
        assert_eq!(err.details["value"], "array");
    }

    #[test]
    fn from_json_str_reports_syntax_error() {
        let err = Schema::from_json_str("{not json").unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_json");
    }

    #[test]
    fn from_yaml_str_parses_quoted_paths() {
        let schema = Schema::from_yaml_str("\"users.address.city\": location\nid: userId\n").unwrap();
        assert_eq!(schema.rename_for("users.address.city"), Some("location"));
        assert_eq!(schema.rename_for("id"), Some("userId"));
    }

    #[test]
    fn from_toml_str_parses_quoted_paths() {
        let schema = Schema::from_toml_str("\"users.name\" = \"fullName\"\nid = \"userId\"\n").unwrap();
        assert_eq!(schema.rename_for("users.name"), Some("fullName"));
        assert_eq!(schema.rename_for("id"), Some("userId"));
    }

    #[test]
    fn from_toml_str_rejects_bare_dotted_keys() {
        // Bare dotted keys become nested tables in TOML.
        let err = Schema::from_toml_str("users.name = \"fullName\"\n").unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
        assert_eq!(err.details["key"], "users");
        assert!(!err.hints.is_empty());
    }

    #[test]
    fn format_from_path_by_extension() {
        assert_eq!(SchemaFormat::from_path(Path::new("a.json")).unwrap(), SchemaFormat::Json);
        assert_eq!(SchemaFormat::from_path(Path::new("a.YML")).unwrap(), SchemaFormat::Yaml);
        assert_eq!(SchemaFormat::from_path(Path::new("a.toml")).unwrap(), SchemaFormat::Toml);
        assert!(SchemaFormat::from_path(Path::new("schema.txt")).is_err());
        assert!(SchemaFormat::from_path(Path::new("schema")).is_err());
    }

    #[test]
    fn load_reads_yaml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("schema.yaml");
        std::fs::write(&path, "\"profile.hobbies\": interests\n").unwrap();

        let schema = Schema::load(&path).unwrap();
        assert_eq!(schema.rename_for("profile.hobbies"), Some("interests"));
    }

    #[test]
    fn load_attaches_path_to_parse_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, "{\"id\": ").unwrap();

        let err = Schema::load(&path).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_json");
        assert_eq!(err.details["path"], json!(path.display().to_string()));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = Schema::load(Path::new("/nonexistent/schema.json")).unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
    }

    #[test]
    fn sorted_entries_orders_by_path() {
        let schema: Schema = [("b", "x"), ("a.c", "y"), ("a", "z")].into_iter().collect();
        let paths: Vec<_> = schema.sorted_entries().into_iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec!["a", "a.c", "b"]);
    }

    #[test]
    fn deserializes_transparently() {
        let schema: Schema = serde_json::from_value(json!({"id": "userId"})).unwrap();
        assert_eq!(schema.rename_for("id"), Some("userId"));
    }
}
