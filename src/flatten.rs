//! Conversion between nested message trees and flat key paths.

use indexmap::IndexMap;

use crate::catalog::{
    MessageTree,
    TreeError,
};

/// Flattened messages keyed by their joined key path, in traversal order.
pub type FlatMessages = IndexMap<String, String>;

/// What a [`set_path`] call did to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    Inserted,
    Replaced,
    /// The leaf already held the same value.
    Unchanged,
}

impl SetOutcome {
    #[must_use]
    pub const fn is_mutation(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Flatten a message tree into a key path map.
///
/// Keys are visited depth-first in document order.
///
/// # Examples
/// ```
/// use js_i18n_sync::catalog::MessageTree;
/// use js_i18n_sync::flatten::flatten;
/// use serde_json::json;
///
/// let tree = MessageTree::from_json(&json!({
///     "common": {
///         "hello": "Hello",
///         "goodbye": "Goodbye"
///     }
/// }))
/// .unwrap();
///
/// let flattened = flatten(&tree, ".").unwrap();
/// assert_eq!(flattened.get("common.hello"), Some(&"Hello".to_string()));
/// assert_eq!(flattened.get("common.goodbye"), Some(&"Goodbye".to_string()));
/// ```
///
/// # Errors
/// Returns [`TreeError::SeparatorInKey`] when a key contains the separator
/// or ends with the start of it, since its path could not be told apart
/// from another one.
pub fn flatten(tree: &MessageTree, separator: &str) -> Result<FlatMessages, TreeError> {
    let mut result = FlatMessages::new();
    flatten_value(tree, separator, None, &mut result)?;
    Ok(result)
}

fn flatten_value(
    tree: &MessageTree,
    separator: &str,
    prefix: Option<&str>,
    result: &mut FlatMessages,
) -> Result<(), TreeError> {
    match tree {
        MessageTree::Node(map) => {
            for (key, value) in map {
                if !joins_cleanly(key, separator) {
                    return Err(TreeError::SeparatorInKey {
                        path: prefix.unwrap_or_default().to_string(),
                        key: key.clone(),
                        separator: separator.to_string(),
                    });
                }
                let full_key =
                    prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
                flatten_value(value, separator, Some(&full_key), result)?;
            }
        }
        MessageTree::Leaf(s) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), s.clone());
            }
        }
    }
    Ok(())
}

/// True when `key` can sit before a separator without blurring the join.
///
/// The key must not contain the separator, and must not end with a proper
/// prefix of it (`"a_"` before `"__"`), otherwise the first separator found
/// when splitting the path would start inside the key.
fn joins_cleanly(key: &str, separator: &str) -> bool {
    !key.contains(separator)
        && !(1..separator.len())
            .filter_map(|end| separator.get(..end))
            .any(|head| key.ends_with(head))
}

/// Set the leaf at `path`, creating missing intermediate objects.
///
/// Sibling keys are left untouched. A failed call leaves the tree unchanged.
///
/// # Errors
/// Returns [`TreeError::PathConflict`] when an intermediate segment is a
/// message, or when the final segment already holds nested messages.
pub fn set_path(
    tree: &mut MessageTree,
    path: &str,
    value: &str,
    separator: &str,
) -> Result<SetOutcome, TreeError> {
    let segments: Vec<&str> = path.split(separator).collect();
    let (last, parents) = segments.split_last().map_or((path, &[][..]), |(last, parents)| {
        (*last, parents)
    });

    let mut current = tree;
    let mut walked: Vec<&str> = Vec::new();
    for &segment in parents {
        let map = node_mut(current, path, &walked, separator)?;
        walked.push(segment);
        current = map.entry(segment.to_string()).or_insert_with(MessageTree::empty);
    }

    let map = node_mut(current, path, &walked, separator)?;
    match map.get_mut(last) {
        Some(MessageTree::Leaf(existing)) if existing == value => Ok(SetOutcome::Unchanged),
        Some(MessageTree::Leaf(existing)) => {
            value.clone_into(existing);
            Ok(SetOutcome::Replaced)
        }
        Some(MessageTree::Node(_)) => Err(TreeError::PathConflict {
            path: path.to_string(),
            conflict: path.to_string(),
            found: "nested messages",
        }),
        None => {
            map.insert(last.to_string(), MessageTree::Leaf(value.to_string()));
            Ok(SetOutcome::Inserted)
        }
    }
}

fn node_mut<'t>(
    tree: &'t mut MessageTree,
    path: &str,
    walked: &[&str],
    separator: &str,
) -> Result<&'t mut IndexMap<String, MessageTree>, TreeError> {
    match tree {
        MessageTree::Node(map) => Ok(map),
        MessageTree::Leaf(_) => Err(TreeError::PathConflict {
            path: path.to_string(),
            conflict: walked.join(separator),
            found: "a message",
        }),
    }
}

/// Rebuild a tree from flattened messages.
///
/// # Errors
/// Returns [`TreeError::PathConflict`] when two paths disagree on whether a
/// segment is a message or an object.
pub fn unflatten(flat: &FlatMessages, separator: &str) -> Result<MessageTree, TreeError> {
    let mut tree = MessageTree::empty();
    for (path, value) in flat {
        set_path(&mut tree, path, value, separator)?;
    }
    Ok(tree)
}
