//! Message tree model shared by every catalog.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Nested message tree of a single catalog.
///
/// Leaves are message strings. Nodes keep their keys in document order, but
/// equality ignores that order: two trees are equal when every level holds
/// the same keys with equal values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MessageTree {
    Leaf(String),
    Node(IndexMap<String, MessageTree>),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A value other than a string or an object was found.
    #[error("Unsupported {kind} value at '{path}': messages must be strings or objects")]
    Malformed { path: String, kind: &'static str },

    /// A key cannot be flattened without colliding with a nested path.
    #[error("Key '{key}' under '{path}' cannot be joined with the key separator '{separator}'")]
    SeparatorInKey { path: String, key: String, separator: String },

    /// A set-path runs into an existing value of the wrong shape.
    #[error("Cannot set '{path}': '{conflict}' already holds {found}")]
    PathConflict { path: String, conflict: String, found: &'static str },
}

impl MessageTree {
    /// An empty node.
    #[must_use]
    pub fn empty() -> Self {
        Self::Node(IndexMap::new())
    }

    /// Convert a parsed JSON document into a message tree.
    ///
    /// # Errors
    /// Returns [`TreeError::Malformed`] with the dotted path of the first
    /// number, boolean, null or array encountered.
    pub fn from_json(value: &Value) -> Result<Self, TreeError> {
        let mut path = Vec::new();
        Self::from_json_at(value, &mut path)
    }

    fn from_json_at<'a>(value: &'a Value, path: &mut Vec<&'a str>) -> Result<Self, TreeError> {
        match value {
            Value::String(s) => Ok(Self::Leaf(s.clone())),
            Value::Object(map) => {
                let mut node = IndexMap::with_capacity(map.len());
                for (key, child) in map {
                    path.push(key);
                    let child = Self::from_json_at(child, path)?;
                    path.pop();
                    node.insert(key.clone(), child);
                }
                Ok(Self::Node(node))
            }
            other => Err(TreeError::Malformed { path: path.join("."), kind: json_kind(other) }),
        }
    }

    #[must_use]
    pub const fn as_node(&self) -> Option<&IndexMap<String, Self>> {
        match self {
            Self::Node(map) => Some(map),
            Self::Leaf(_) => None,
        }
    }

    #[must_use]
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(s) => Some(s),
            Self::Node(_) => None,
        }
    }

    /// Number of message strings in the tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Node(map) => map.values().map(Self::leaf_count).sum(),
        }
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
