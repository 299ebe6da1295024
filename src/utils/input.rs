//! JSON spec resolution for CLI arguments.
//!
//! A spec is one of:
//! - `-` - read from stdin (refused when stdin is a terminal)
//! - `@path` - read the file at `path`
//! - anything else - the JSON text itself

use crate::error::{Error, Result};
use crate::utils::io;
use serde_json::Value;
use std::io::{IsTerminal, Read};
use std::path::Path;

/// Resolve a spec to its raw text. `field` names the argument in errors.
pub fn read_json_spec_to_string(spec: &str, field: &str) -> Result<String> {
    if spec.trim() == "-" {
        let mut stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(Error::validation_invalid_argument(
                field,
                "Cannot read JSON from stdin when stdin is a TTY",
                None,
                None,
            ));
        }
        let mut buf = String::new();
        stdin
            .read_to_string(&mut buf)
            .map_err(|e| Error::internal_io(e.to_string(), Some("read stdin".to_string())))?;
        return Ok(buf);
    }

    if let Some(path) = spec.strip_prefix('@') {
        if path.trim().is_empty() {
            return Err(Error::validation_invalid_argument(
                field,
                "Invalid JSON spec '@' (missing file path)",
                None,
                None,
            ));
        }
        return io::read_file(Path::new(path), &format!("read {}", path));
    }

    Ok(spec.to_string())
}

/// Resolve a spec and parse it as JSON.
pub fn parse_json_spec(spec: &str, field: &str) -> Result<Value> {
    let raw = read_json_spec_to_string(spec, field)?;
    serde_json::from_str(&raw).map_err(|e| {
        Error::validation_invalid_json(
            e,
            Some(format!("parse {}", field)),
            Some(raw.chars().take(200).collect::<String>()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn inline_spec_is_returned_verbatim() {
        assert_eq!(
            read_json_spec_to_string(r#"{"id":1}"#, "input").unwrap(),
            r#"{"id":1}"#
        );
    }

    #[test]
    fn at_prefix_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": "0"}}]"#).unwrap();
        let spec = format!("@{}", file.path().display());

        let value = parse_json_spec(&spec, "input").unwrap();
        assert_eq!(value, json!([{"id": "0"}]));
    }

    #[test]
    fn bare_at_is_rejected() {
        let err = read_json_spec_to_string("@  ", "schema").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
        assert_eq!(err.details["field"], "schema");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_json_spec_to_string("@/nonexistent/input.json", "input").unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
    }

    #[test]
    fn invalid_json_carries_snippet() {
        let err = parse_json_spec("{oops", "input").unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_json");
        assert_eq!(err.details["context"], "parse input");
        assert_eq!(err.details["snippet"], "{oops");
    }

    #[test]
    fn primitives_parse() {
        assert_eq!(parse_json_spec("null", "input").unwrap(), Value::Null);
        assert_eq!(parse_json_spec("\"text\"", "input").unwrap(), json!("text"));
    }
}
