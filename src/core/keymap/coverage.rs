//! Opt-in report of how a schema lines up with a document.
//!
//! `transform` never complains about schema paths that match nothing or
//! about keys that overwrite each other. This walk uses the same path rules
//! and reports both, without producing the transformed value.

use super::build_path;
use crate::schema::Schema;
use serde::Serialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathHits {
    pub path: String,
    pub rename: String,
    pub hits: usize,
}

/// An output key written more than once inside one mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Collision {
    /// Path of the mapping holding the key (empty at the root).
    pub parent: String,
    pub key: String,
    /// Original key of the entry that won.
    pub winner: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coverage {
    pub matched: Vec<PathHits>,
    pub unmatched: Vec<String>,
    pub renamed_keys: usize,
    pub collisions: Vec<Collision>,
}

impl Coverage {
    pub fn is_complete(&self) -> bool {
        self.unmatched.is_empty()
    }
}

#[derive(Default)]
struct Tally {
    hits: HashMap<String, usize>,
    renamed: usize,
    collisions: Vec<Collision>,
}

/// Walk `value` and report which schema paths it reaches.
pub fn coverage(value: &Value, schema: &Schema) -> Coverage {
    let mut tally = Tally::default();
    walk(value, schema, "", &mut tally);

    let mut report = Coverage {
        renamed_keys: tally.renamed,
        collisions: tally.collisions,
        ..Coverage::default()
    };

    for (path, name) in schema.sorted_entries() {
        match tally.hits.get(path) {
            Some(&hits) => report.matched.push(PathHits {
                path: path.to_string(),
                rename: name.to_string(),
                hits,
            }),
            None => report.unmatched.push(path.to_string()),
        }
    }

    report
}

fn walk(value: &Value, schema: &Schema, parent: &str, tally: &mut Tally) {
    match value {
        Value::Array(items) => {
            for item in items {
                walk(item, schema, parent, tally);
            }
        }
        Value::Object(map) => {
            let mut written: HashSet<&str> = HashSet::with_capacity(map.len());
            for (key, child) in map {
                let path = build_path(parent, key);
                if schema.contains(&path) {
                    *tally.hits.entry(path.clone()).or_default() += 1;
                }

                let new_key = match schema.rename_for(&path) {
                    Some(name) => {
                        tally.renamed += 1;
                        name
                    }
                    None => key.as_str(),
                };

                if !written.insert(new_key) {
                    tally.collisions.push(Collision {
                        parent: parent.to_string(),
                        key: new_key.to_string(),
                        winner: key.clone(),
                    });
                }

                walk(child, schema, &path, tally);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}
