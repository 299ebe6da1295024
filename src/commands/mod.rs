use clap::Args;
use std::path::PathBuf;

use rekey::input::parse_json_spec;
use rekey::{Error, Schema};

pub type CmdResult<T> = rekey::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

/// Where the rename schema comes from. Exactly one source is required.
#[derive(Args, Default, Debug)]
pub struct SchemaSourceArgs {
    /// Schema as JSON (inline, @file, or - for stdin)
    #[arg(long, value_name = "JSON")]
    pub schema: Option<String>,

    /// Schema file; format from extension (.json, .yaml, .yml, .toml)
    #[arg(long, value_name = "PATH")]
    pub schema_file: Option<PathBuf>,
}

impl SchemaSourceArgs {
    pub fn resolve(&self) -> rekey::Result<Schema> {
        match (&self.schema, &self.schema_file) {
            (Some(spec), None) => {
                let value = parse_json_spec(spec, "schema")?;
                Schema::from_value(&value)
            }
            (None, Some(path)) => Schema::load(path),
            (Some(_), Some(_)) => Err(Error::validation_invalid_argument(
                "schema",
                "Use either --schema or --schema-file, not both",
                None,
                None,
            )),
            (None, None) => Err(Error::validation_missing_argument(vec![
                "--schema".to_string(),
                "--schema-file".to_string(),
            ])
            .with_hint("Pass --schema '{\"id\": \"userId\"}' or --schema-file schema.yaml")),
        }
    }
}

/// Pretty JSON for raw output.
pub(crate) fn to_pretty(value: &serde_json::Value) -> rekey::Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| Error::internal_json(e.to_string(), Some("serialize document".to_string())))
}

pub mod demo;
pub mod error;
pub mod schema;
pub mod transform;

pub(crate) fn run_raw(
    command: crate::Commands,
    _global: &GlobalArgs,
) -> rekey::Result<(String, i32)> {
    match command {
        crate::Commands::Transform(args) => transform::run_raw(args),
        crate::Commands::Demo(_) => demo::run_raw(),
        _ => Err(Error::validation_invalid_argument(
            "output_mode",
            "Command does not support raw output",
            None,
            None,
        )),
    }
}

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run_json($args))
    };
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (rekey::Result<serde_json::Value>, i32) {
    crate::tty::status("rekey is working...");

    match command {
        // Commands without global context
        crate::Commands::Demo(args) => dispatch!(args, demo),
        crate::Commands::Error(args) => dispatch!(args, error),

        // Commands with global context
        crate::Commands::Transform(args) => dispatch!(args, global, transform),
        crate::Commands::Schema(args) => dispatch!(args, global, schema),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn resolve_inline_schema() {
        let args = SchemaSourceArgs {
            schema: Some(r#"{"users.id": "userId"}"#.to_string()),
            schema_file: None,
        };
        let schema = args.resolve().unwrap();
        assert_eq!(schema.rename_for("users.id"), Some("userId"));
    }

    #[test]
    fn resolve_schema_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("schema.toml");
        std::fs::write(&path, "\"profile.name\" = \"fullName\"\n").unwrap();
        let args = SchemaSourceArgs {
            schema: None,
            schema_file: Some(path),
        };
        let schema = args.resolve().unwrap();
        assert_eq!(schema.rename_for("profile.name"), Some("fullName"));
    }

    #[test]
    fn resolve_requires_a_source() {
        let err = SchemaSourceArgs::default().resolve().unwrap_err();
        assert_eq!(err.code.as_str(), "validation.missing_argument");
    }

    #[test]
    fn resolve_rejects_both_sources() {
        let args = SchemaSourceArgs {
            schema: Some("{}".to_string()),
            schema_file: Some(PathBuf::from("schema.json")),
        };
        let err = args.resolve().unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }

    #[test]
    fn resolve_rejects_non_string_values() {
        let args = SchemaSourceArgs {
            schema: Some(r#"{"id": true}"#.to_string()),
            schema_file: None,
        };
        let err = args.resolve().unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_value");
    }
}
