//! Schema reflection for form fields.
//!
//! A validation schema is represented as an arena of [`SchemaNodeContent`]s
//! addressed by [`SchemaNodeId`]. Wrapper nodes (optional, nullable, default,
//! effect, pipeline) are unwrapped by [`resolve`] into a flat [`ShapeInfo`]
//! describing what a single form field holds.
//!
//! The resolver only sees schemas through the [`ShapeSource`] trait, so any
//! validator can be plugged in by implementing that trait or by converting
//! into a [`SchemaDocument`] (see [`json_schema`]).

mod build;
pub mod json_schema;
mod lookup;
mod shape;

use std::fmt;
use std::sync::Arc;

use formshape_value::TypedValue;
use indexmap::IndexMap;

pub use build::SchemaBuilder;
pub use shape::{ShapeCache, ShapeInfo, ShapeSource, ShapeView, TypeKind, resolve, resolve_with};

/// Index of a node in a [`SchemaDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaNodeId(pub usize);

/// Lazily evaluated default value of a field.
///
/// The provider is only called when a value is actually needed.
#[derive(Clone)]
pub struct DefaultValue(Arc<dyn Fn() -> TypedValue + Send + Sync>);

impl DefaultValue {
    pub fn new(provider: impl Fn() -> TypedValue + Send + Sync + 'static) -> Self {
        Self(Arc::new(provider))
    }

    /// A provider that always returns a clone of `value`.
    pub fn constant(value: impl Into<TypedValue>) -> Self {
        let value = value.into();
        Self::new(move || value.clone())
    }

    pub fn get(&self) -> TypedValue {
        (self.0)()
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DefaultValue(..)")
    }
}

/// Two defaults are equal when they share the same provider.
impl PartialEq for DefaultValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Terminal (non-wrapper) schema types.
#[derive(Debug, Clone, PartialEq)]
pub enum LeafSchema {
    String,
    Number,
    Boolean,
    Date,
    /// Nested object with ordered fields.
    Object(IndexMap<String, SchemaNodeId>),
    /// Homogeneous array.
    Array(SchemaNodeId),
    /// Anything; no coercion is applied.
    Any,
}

/// A schema node: exactly one wrapper kind or a terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNodeContent {
    /// Refinement/transform around a source schema.
    Effect(SchemaNodeId),
    /// Two-stage schema; the form value is described by `output`.
    Pipeline {
        input: SchemaNodeId,
        output: SchemaNodeId,
    },
    Optional(SchemaNodeId),
    Nullable(SchemaNodeId),
    Default {
        inner: SchemaNodeId,
        value: DefaultValue,
    },
    /// String enumeration in declaration order.
    Enum(Vec<String>),
    Leaf(LeafSchema),
}

/// Arena of schema nodes with a designated root.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    pub nodes: Vec<SchemaNodeContent>,
    pub root: SchemaNodeId,
}

impl SchemaDocument {
    pub fn node(&self, id: SchemaNodeId) -> Option<&SchemaNodeContent> {
        self.nodes.get(id.0)
    }

    /// The node the given wrapper chain ends in.
    ///
    /// Returns `None` for dangling ids or chains longer than the arena (cycles).
    pub fn unwrap_node(&self, id: SchemaNodeId) -> Option<&SchemaNodeContent> {
        let mut current = id;
        for _ in 0..=self.nodes.len() {
            match self.node(current)? {
                SchemaNodeContent::Effect(inner)
                | SchemaNodeContent::Optional(inner)
                | SchemaNodeContent::Nullable(inner)
                | SchemaNodeContent::Default { inner, .. } => current = *inner,
                SchemaNodeContent::Pipeline { output, .. } => current = *output,
                terminal => return Some(terminal),
            }
        }
        None
    }

    /// Declared fields of an object node, in declaration order.
    pub fn object_fields(&self, id: SchemaNodeId) -> Option<&IndexMap<String, SchemaNodeId>> {
        match self.unwrap_node(id)? {
            SchemaNodeContent::Leaf(LeafSchema::Object(fields)) => Some(fields),
            _ => None,
        }
    }

    /// Node id of a top-level field.
    pub fn field(&self, key: &str) -> Option<SchemaNodeId> {
        self.object_fields(self.root)?.get(key).copied()
    }
}
