//! Schema pre-parsed into a trie of path segments.
//!
//! Produces exactly the same output as [`super::transform`] without
//! building a path string per entry. Build it once with
//! [`Schema::compile`] and reuse it across documents.

use crate::schema::Schema;
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct PathNode {
    rename: Option<String>,
    children: HashMap<String, PathNode>,
}

impl PathNode {
    fn walk(&self, key: &str) -> Option<&PathNode> {
        key.split('.')
            .try_fold(self, |node, segment| node.children.get(segment))
    }

    fn depth(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.depth())
            .max()
            .unwrap_or(0)
    }
}

/// Position of the walk inside the trie.
///
/// `Root` stands for an empty path. A key reached from an empty path starts
/// a fresh path, so the empty key at the root keeps the walk at `Root`.
#[derive(Debug, Clone, Copy)]
enum Cursor<'a> {
    Root,
    At(&'a PathNode),
    Detached,
}

#[derive(Debug, Clone, Default)]
pub struct CompiledSchema {
    root: PathNode,
    len: usize,
}

impl Schema {
    /// Pre-parse this schema for repeated transforms.
    pub fn compile(&self) -> CompiledSchema {
        let mut root = PathNode::default();
        for (path, name) in self.iter() {
            let node = path.split('.').fold(&mut root, |node, segment| {
                node.children.entry(segment.to_string()).or_default()
            });
            if !name.is_empty() {
                node.rename = Some(name.to_string());
            }
        }

        CompiledSchema {
            root,
            len: self.len(),
        }
    }
}

impl CompiledSchema {
    /// Number of schema entries compiled in.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Longest path, in segments.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Same contract as [`super::transform`].
    pub fn transform(&self, value: &Value) -> Value {
        match value {
            Value::Array(items) if items.is_empty() => value.clone(),
            Value::Object(map) if map.is_empty() => value.clone(),
            _ => self.map_keys(value, Cursor::Root),
        }
    }

    fn step<'a>(&'a self, cursor: Cursor<'a>, key: &str) -> (Option<&'a str>, Cursor<'a>) {
        let (start, from_root) = match cursor {
            Cursor::Root => (&self.root, true),
            Cursor::At(node) => (node, false),
            Cursor::Detached => return (None, Cursor::Detached),
        };

        let reached = start.walk(key);
        let rename = reached.and_then(|node| node.rename.as_deref());
        let next = if from_root && key.is_empty() {
            Cursor::Root
        } else {
            reached.map_or(Cursor::Detached, Cursor::At)
        };

        (rename, next)
    }

    fn map_keys(&self, value: &Value, cursor: Cursor<'_>) -> Value {
        match value {
            Value::Null => Value::Null,
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.map_keys(item, cursor))
                    .collect(),
            ),
            Value::Object(map) => {
                let mut out = Map::with_capacity(map.len());
                for (key, child) in map {
                    let (rename, next) = self.step(cursor, key);
                    let mapped = match next {
                        Cursor::Detached => child.clone(),
                        _ => self.map_keys(child, next),
                    };
                    out.insert(rename.unwrap_or(key.as_str()).to_string(), mapped);
                }
                Value::Object(out)
            }
            Value::Bool(_) | Value::Number(_) | Value::String(_) => value.clone(),
        }
    }
}
