//! Nested error tree built from flat, path-addressed messages.
//!
//! # Field arrays
//!
//! An error addressed to a path that has submitted descendants (`items` with
//! `items.0`, `items.1`) belongs to the collection as a whole. It is stored in
//! a synthetic [`ROOT_KEY`] child so it cannot collide with the per-index
//! children:
//!
//! ```text
//! items
//! ├── root: ["At least two items"]
//! └── 0
//!     └── name: ["Required"]
//! ```

use indexmap::IndexMap;
use serde::Serialize;

use crate::known::KnownPaths;
use crate::path::{FieldPath, PathSegment};

/// Child key holding a field array's own messages.
pub const ROOT_KEY: &str = "root";

/// Key under which form-level messages are serialized.
pub const GLOBAL_KEY: &str = "_global";

/// One validation message addressed to a field path.
///
/// An empty path addresses the form as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatError {
    pub path: FieldPath,
    pub message: String,
}

impl FlatError {
    pub fn new(path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }

    /// An error not tied to any field.
    pub fn global(message: impl Into<String>) -> Self {
        Self::new(FieldPath::root(), message)
    }

    /// An error addressed by a submitted field name such as `contacts[0][email]`.
    ///
    /// Names that cannot be parsed address a single key with the raw name.
    pub fn at(name: &str, message: impl Into<String>) -> Self {
        let path = FieldPath::parse_name(name).unwrap_or_else(|error| {
            tracing::warn!(%error, "addressing error by raw field name");
            FieldPath::key(name)
        });
        Self::new(path, message)
    }
}

/// A position in the error tree.
///
/// A node can carry its own messages and children at the same time; this is
/// how an object field keeps its nested field errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<String>>,
    #[serde(flatten)]
    pub children: IndexMap<String, ErrorNode>,
}

impl ErrorNode {
    pub fn leaf(messages: Vec<String>) -> Self {
        Self {
            messages: Some(messages),
            children: IndexMap::new(),
        }
    }

    pub fn child(&self, key: &str) -> Option<&ErrorNode> {
        self.children.get(key)
    }

    /// The messages reported for this position itself.
    ///
    /// For a field array this is the content of its [`ROOT_KEY`] slot.
    pub fn own_messages(&self) -> Option<&[String]> {
        self.messages
            .as_deref()
            .or_else(|| self.child(ROOT_KEY)?.messages.as_deref())
    }

    /// Every message at or below this node, own messages first, children in
    /// insertion order.
    pub fn all_messages(&self) -> Vec<&str> {
        let mut collected: Vec<&str> = self
            .messages
            .iter()
            .flatten()
            .map(String::as_str)
            .collect();
        for child in self.children.values() {
            collected.extend(child.all_messages());
        }
        collected
    }

    /// Whether this node or any descendant holds a message.
    pub fn has_messages(&self) -> bool {
        self.messages.as_ref().is_some_and(|m| !m.is_empty())
            || self.children.values().any(ErrorNode::has_messages)
    }
}

/// Errors of one submission, nested by field path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorTree {
    /// Form-level messages.
    #[serde(rename = "_global", skip_serializing_if = "Vec::is_empty")]
    pub global: Vec<String>,
    #[serde(flatten)]
    pub fields: IndexMap<String, ErrorNode>,
}

impl ErrorTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.global.is_empty() && !self.fields.values().any(ErrorNode::has_messages)
    }

    pub fn get(&self, key: &str) -> Option<&ErrorNode> {
        self.fields.get(key)
    }

    pub fn get_path(&self, path: &FieldPath) -> Option<&ErrorNode> {
        let mut segments = path.0.iter().map(PathSegment::to_string);
        let mut node = self.fields.get(&segments.next()?)?;
        for segment in segments {
            node = node.children.get(&segment)?;
        }
        Some(node)
    }

    /// A top-level field's own messages, reading through a field-array root.
    ///
    /// Messages of nested fields (`address.city` for `address`) are not
    /// included; use [`ErrorNode::all_messages`] on [`ErrorTree::get`] for those.
    pub fn messages_for(&self, key: &str) -> Option<&[String]> {
        self.get(key)?.own_messages()
    }

    /// Get or create the node at `path`, creating intermediate nodes.
    ///
    /// Returns `None` for the root path, which has no node.
    pub fn node_mut(&mut self, path: &FieldPath) -> Option<&mut ErrorNode> {
        let mut segments = path.0.iter().map(PathSegment::to_string);
        let mut node = self.fields.entry(segments.next()?).or_default();
        for segment in segments {
            node = node.children.entry(segment).or_default();
        }
        Some(node)
    }

}

/// Build the error tree for one submission.
///
/// Messages for the exact same path are merged in encounter order. A path
/// with descendants in `known` is treated as a field array and its messages
/// go to the [`ROOT_KEY`] child.
pub fn build_error_tree(
    errors: impl IntoIterator<Item = FlatError>,
    known: &KnownPaths,
) -> ErrorTree {
    let mut grouped: IndexMap<FieldPath, Vec<String>> = IndexMap::new();
    for error in errors {
        grouped.entry(error.path).or_default().push(error.message);
    }

    let mut tree = ErrorTree::new();
    for (path, messages) in grouped {
        if path.is_root() {
            tree.global.extend(messages);
            continue;
        }
        let dotted = path.to_string();
        let is_array_root = known.has_descendants(&dotted);
        tracing::trace!(path = %dotted, is_array_root, count = messages.len(), "placing errors");

        let Some(node) = tree.node_mut(&path) else {
            continue;
        };
        if is_array_root {
            node.children.entry(ROOT_KEY.to_string()).or_default().messages = Some(messages);
        } else {
            node.messages = Some(messages);
        }
    }
    tree
}
