//! Key mapper - renames mapping keys in a JSON tree by dotted path.
//!
//! Walks the value depth-first and rebuilds every container. For each
//! mapping entry the path is `parent.key` (just `key` when the parent path
//! is empty) and the key is replaced when the schema has a non-empty name
//! for that exact path. Sequences are transparent: their elements are
//! walked with the sequence's own path.
//!
//! ```text
//! schema: { "users.id": "userId" }
//! { "users": [ { "id": 1 } ] }  ->  { "users": [ { "userId": 1 } ] }
//! ```
//!
//! Descendant paths are always built from the original key, never the
//! renamed one. When two entries of one mapping end up with the same key,
//! the entry visited later wins; with insertion-ordered maps the surviving
//! slot keeps the position of the first insertion.
//!
//! Unmatched schema paths are ignored without any diagnostic. Use
//! [`coverage`] to find them explicitly.

mod compiled;
mod coverage;

pub use compiled::CompiledSchema;
pub use coverage::{coverage, Collision, Coverage, PathHits};

use crate::schema::Schema;
use serde_json::{Map, Value};

/// Join a parent path and a key.
pub fn build_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Rename keys in `value` according to `schema`.
///
/// Neither argument is modified; the result is a new tree with the same
/// shape and the same leaves.
pub fn transform(value: &Value, schema: &Schema) -> Value {
    match value {
        Value::Array(items) if items.is_empty() => value.clone(),
        Value::Object(map) if map.is_empty() => value.clone(),
        _ => map_keys(value, schema, ""),
    }
}

/// [`transform`] for a value that may be absent.
pub fn transform_absent(value: Option<&Value>, schema: &Schema) -> Option<Value> {
    value.map(|v| transform(v, schema))
}

fn map_keys(value: &Value, schema: &Schema, parent: &str) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| map_keys(item, schema, parent))
                .collect(),
        ),
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, child) in map {
                let path = build_path(parent, key);
                let new_key = schema.rename_for(&path).unwrap_or(key.as_str());
                let mapped = map_keys(child, schema, &path);
                out.insert(new_key.to_string(), mapped);
            }
            Value::Object(out)
        }
        Value::Bool(_) | Value::Number(_) | Value::String(_) => value.clone(),
    }
}
