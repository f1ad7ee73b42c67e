//! Form error aggregation.
//!
//! Validators report errors as a flat list of [`FlatError`]s, each addressed
//! by a [`FieldPath`]. [`build_error_tree`] nests them into an [`ErrorTree`]
//! that mirrors the shape of the submitted form.

mod known;
mod path;
mod tree;

pub use known::KnownPaths;
pub use path::{FieldNameError, FieldPath, PathSegment};
pub use tree::{ErrorNode, ErrorTree, FlatError, GLOBAL_KEY, ROOT_KEY, build_error_tree};
