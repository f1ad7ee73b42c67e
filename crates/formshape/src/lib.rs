//! Schema-driven HTML form support.
//!
//! Given a validation schema, `formshape`
//!
//! - coerces a submitted [`FormPayload`] into typed values ([`coerce_payload`]),
//! - nests validator errors into an [`ErrorTree`] ([`Submission`]),
//! - and describes every field for rendering ([`assemble`]).
//!
//! ```
//! use formshape::{FormOptions, FormState, SchemaBuilder, ShapeCache, assemble};
//!
//! let mut builder = SchemaBuilder::new();
//! let email = builder.string();
//! let newsletter = builder.boolean();
//! let newsletter = builder.optional(newsletter);
//! let root = builder.object([("email", email), ("newsletter", newsletter)]);
//! let schema = builder.finish(root);
//!
//! let view = assemble(&schema, &FormState::new(), &FormOptions::new(), &mut ShapeCache::new())?;
//! assert_eq!(view.fields[0].label, "Email");
//! assert!(view.fields[0].required);
//! assert!(!view.fields[1].required);
//! # Ok::<(), formshape::AssembleError>(())
//! ```

mod assemble;
mod coerce;
mod options;
mod submission;

pub use assemble::{AssembleError, FieldDescriptor, FormState, FormView, assemble};
pub use coerce::{coerce_to_form, coerce_value};
pub use options::{FormOptions, SelectOption};
pub use submission::{FailureResponse, FormValues, Submission, coerce_payload};

pub use formshape_error::{
    ErrorNode, ErrorTree, FieldPath, FlatError, KnownPaths, PathSegment, build_error_tree,
};
pub use formshape_label::infer_label;
pub use formshape_schema::{
    DefaultValue, SchemaBuilder, SchemaDocument, SchemaNodeId, ShapeCache, ShapeInfo,
    ShapeSource, TypeKind, json_schema, resolve,
};
pub use formshape_value::{DateValue, DisplayValue, FileLike, FormPayload, TypedValue, WireValue};
