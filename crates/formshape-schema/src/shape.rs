//! Shape resolution: unwrap a schema node into a [`ShapeInfo`].

use std::fmt::{self, Debug, Display};
use std::hash::Hash;

use ahash::AHashMap;
use formshape_value::TypedValue;
use serde::Serialize;

use crate::{DefaultValue, LeafSchema, SchemaDocument, SchemaNodeContent, SchemaNodeId};

/// Wrapper chains deeper than this are treated as cyclic.
const MAX_DEPTH: usize = 64;

/// Primitive type a form field holds once all wrappers are removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    String,
    Number,
    Boolean,
    Date,
    Enum,
    /// Objects, arrays, and schemas without a recognizable type.
    #[default]
    Unknown,
}

impl Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeKind::String => "string",
            TypeKind::Number => "number",
            TypeKind::Boolean => "boolean",
            TypeKind::Date => "date",
            TypeKind::Enum => "enum",
            TypeKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Normalized description of a field's schema.
///
/// `optional` and `nullable` are accumulated over every wrapper layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeInfo {
    pub type_kind: TypeKind,
    pub optional: bool,
    pub nullable: bool,
    pub default_value: Option<DefaultValue>,
    pub enum_values: Option<Vec<String>>,
}

impl ShapeInfo {
    pub fn of(type_kind: TypeKind) -> Self {
        Self {
            type_kind,
            ..Self::default()
        }
    }

    pub fn enumeration<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self {
            type_kind: TypeKind::Enum,
            enum_values: Some(values.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_default(mut self, value: DefaultValue) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Neither optional nor nullable.
    pub fn is_required(&self) -> bool {
        !(self.optional || self.nullable)
    }

    /// Evaluate the default provider, if any.
    pub fn default_value(&self) -> Option<TypedValue> {
        self.default_value.as_ref().map(DefaultValue::get)
    }
}

/// One node as seen by the resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeView<'a, Id> {
    Effect(Id),
    /// Only the post-transform side matters for a form value.
    Pipeline(Id),
    Optional(Id),
    Nullable(Id),
    Default(Id, &'a DefaultValue),
    Enum(&'a [String]),
    Leaf(TypeKind),
}

/// Adapter between a validator's schema representation and the resolver.
pub trait ShapeSource {
    type Id: Copy + Eq + Hash + Debug;

    /// Describe a node. `None` for ids the source does not know.
    fn view(&self, id: Self::Id) -> Option<ShapeView<'_, Self::Id>>;

    /// Top-level form fields in declaration order.
    fn fields(&self) -> Vec<(String, Self::Id)>;
}

impl ShapeSource for SchemaDocument {
    type Id = SchemaNodeId;

    fn view(&self, id: SchemaNodeId) -> Option<ShapeView<'_, SchemaNodeId>> {
        let view = match self.node(id)? {
            SchemaNodeContent::Effect(inner) => ShapeView::Effect(*inner),
            SchemaNodeContent::Pipeline { output, .. } => ShapeView::Pipeline(*output),
            SchemaNodeContent::Optional(inner) => ShapeView::Optional(*inner),
            SchemaNodeContent::Nullable(inner) => ShapeView::Nullable(*inner),
            SchemaNodeContent::Default { inner, value } => ShapeView::Default(*inner, value),
            SchemaNodeContent::Enum(values) => ShapeView::Enum(values),
            SchemaNodeContent::Leaf(leaf) => ShapeView::Leaf(match leaf {
                LeafSchema::String => TypeKind::String,
                LeafSchema::Number => TypeKind::Number,
                LeafSchema::Boolean => TypeKind::Boolean,
                LeafSchema::Date => TypeKind::Date,
                LeafSchema::Object(_) | LeafSchema::Array(_) | LeafSchema::Any => {
                    TypeKind::Unknown
                }
            }),
        };
        Some(view)
    }

    fn fields(&self) -> Vec<(String, SchemaNodeId)> {
        self.object_fields(self.root)
            .map(|fields| fields.iter().map(|(k, v)| (k.clone(), *v)).collect())
            .unwrap_or_default()
    }
}

/// Resolve a node into its shape.
///
/// An absent node resolves to [`TypeKind::Unknown`].
pub fn resolve<S: ShapeSource + ?Sized>(source: &S, node: Option<S::Id>) -> ShapeInfo {
    resolve_with(source, node, ShapeInfo::default())
}

/// Resolve a node, continuing from already accumulated wrapper state.
///
/// `base.type_kind` is ignored; the result's kind is always the innermost
/// terminal found (or `Unknown`).
pub fn resolve_with<S: ShapeSource + ?Sized>(
    source: &S,
    node: Option<S::Id>,
    base: ShapeInfo,
) -> ShapeInfo {
    resolve_inner(source, node, base, 0)
}

fn resolve_inner<S: ShapeSource + ?Sized>(
    source: &S,
    node: Option<S::Id>,
    mut acc: ShapeInfo,
    depth: usize,
) -> ShapeInfo {
    let Some(id) = node else {
        acc.type_kind = TypeKind::Unknown;
        return acc;
    };
    if depth > MAX_DEPTH {
        tracing::warn!(?id, "schema wrapper chain too deep, treating as unknown");
        acc.type_kind = TypeKind::Unknown;
        return acc;
    }
    let Some(view) = source.view(id) else {
        tracing::warn!(?id, "dangling schema node");
        acc.type_kind = TypeKind::Unknown;
        return acc;
    };
    tracing::trace!(?id, ?view, "resolving shape");

    match view {
        ShapeView::Effect(inner) | ShapeView::Pipeline(inner) => {
            resolve_inner(source, Some(inner), acc, depth + 1)
        }
        ShapeView::Optional(inner) => {
            acc.optional = true;
            resolve_inner(source, Some(inner), acc, depth + 1)
        }
        ShapeView::Nullable(inner) => {
            acc.nullable = true;
            resolve_inner(source, Some(inner), acc, depth + 1)
        }
        ShapeView::Default(inner, value) => {
            acc.default_value = Some(value.clone());
            resolve_inner(source, Some(inner), acc, depth + 1)
        }
        ShapeView::Enum(values) => {
            acc.type_kind = TypeKind::Enum;
            acc.enum_values = Some(values.to_vec());
            acc
        }
        ShapeView::Leaf(kind) => {
            acc.type_kind = kind;
            acc
        }
    }
}

/// Memoized resolutions, keyed by node id.
///
/// Owned by the caller; valid for as long as the schema it was filled from.
#[derive(Debug)]
pub struct ShapeCache<Id> {
    shapes: AHashMap<Id, ShapeInfo>,
}

impl<Id> Default for ShapeCache<Id> {
    fn default() -> Self {
        Self {
            shapes: AHashMap::new(),
        }
    }
}

impl<Id: Copy + Eq + Hash + Debug> ShapeCache<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `id`, reusing a previous resolution when available.
    pub fn resolve<S>(&mut self, source: &S, id: Id) -> &ShapeInfo
    where
        S: ShapeSource<Id = Id> + ?Sized,
    {
        self.shapes
            .entry(id)
            .or_insert_with(|| resolve(source, Some(id)))
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }
}
