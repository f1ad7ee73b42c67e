//! Programmatic construction of [`SchemaDocument`]s.
//!
//! # Example
//!
//! ```
//! use formshape_schema::SchemaBuilder;
//!
//! let mut builder = SchemaBuilder::new();
//! let email = builder.string();
//! let age = builder.number();
//! let age = builder.optional(age);
//! let root = builder.object([("email", email), ("age", age)]);
//! let schema = builder.finish(root);
//!
//! assert_eq!(schema.field("age"), Some(age));
//! ```

use indexmap::IndexMap;

use crate::{DefaultValue, LeafSchema, SchemaDocument, SchemaNodeContent, SchemaNodeId};

/// Builder for a schema arena.
pub struct SchemaBuilder {
    nodes: Vec<SchemaNodeContent>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Append a node and return its id.
    pub fn create_node(&mut self, content: SchemaNodeContent) -> SchemaNodeId {
        let id = SchemaNodeId(self.nodes.len());
        self.nodes.push(content);
        id
    }

    /// Reserve a node slot, returning its ID.
    ///
    /// The node is initialized with `Any` content; use [`Self::set_node`] to
    /// fill it in once its children exist (recursive schemas).
    pub fn reserve_node(&mut self) -> SchemaNodeId {
        self.create_node(SchemaNodeContent::Leaf(LeafSchema::Any))
    }

    /// Replace the content of a previously created node.
    pub fn set_node(&mut self, id: SchemaNodeId, content: SchemaNodeContent) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            *node = content;
        }
    }

    pub fn string(&mut self) -> SchemaNodeId {
        self.create_node(SchemaNodeContent::Leaf(LeafSchema::String))
    }

    pub fn number(&mut self) -> SchemaNodeId {
        self.create_node(SchemaNodeContent::Leaf(LeafSchema::Number))
    }

    pub fn boolean(&mut self) -> SchemaNodeId {
        self.create_node(SchemaNodeContent::Leaf(LeafSchema::Boolean))
    }

    pub fn date(&mut self) -> SchemaNodeId {
        self.create_node(SchemaNodeContent::Leaf(LeafSchema::Date))
    }

    pub fn any(&mut self) -> SchemaNodeId {
        self.create_node(SchemaNodeContent::Leaf(LeafSchema::Any))
    }

    pub fn enumeration<S: Into<String>>(
        &mut self,
        values: impl IntoIterator<Item = S>,
    ) -> SchemaNodeId {
        let values = values.into_iter().map(Into::into).collect();
        self.create_node(SchemaNodeContent::Enum(values))
    }

    pub fn object<K: Into<String>>(
        &mut self,
        fields: impl IntoIterator<Item = (K, SchemaNodeId)>,
    ) -> SchemaNodeId {
        let fields: IndexMap<String, SchemaNodeId> = fields
            .into_iter()
            .map(|(key, id)| (key.into(), id))
            .collect();
        self.create_node(SchemaNodeContent::Leaf(LeafSchema::Object(fields)))
    }

    pub fn array(&mut self, item: SchemaNodeId) -> SchemaNodeId {
        self.create_node(SchemaNodeContent::Leaf(LeafSchema::Array(item)))
    }

    pub fn optional(&mut self, inner: SchemaNodeId) -> SchemaNodeId {
        self.create_node(SchemaNodeContent::Optional(inner))
    }

    pub fn nullable(&mut self, inner: SchemaNodeId) -> SchemaNodeId {
        self.create_node(SchemaNodeContent::Nullable(inner))
    }

    pub fn with_default(&mut self, inner: SchemaNodeId, value: DefaultValue) -> SchemaNodeId {
        self.create_node(SchemaNodeContent::Default { inner, value })
    }

    pub fn effect(&mut self, inner: SchemaNodeId) -> SchemaNodeId {
        self.create_node(SchemaNodeContent::Effect(inner))
    }

    pub fn pipeline(&mut self, input: SchemaNodeId, output: SchemaNodeId) -> SchemaNodeId {
        self.create_node(SchemaNodeContent::Pipeline { input, output })
    }

    /// Consume the builder and produce the final schema document.
    pub fn finish(self, root: SchemaNodeId) -> SchemaDocument {
        SchemaDocument {
            nodes: self.nodes,
            root,
        }
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}
