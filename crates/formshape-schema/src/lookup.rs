use crate::shape::{ShapeInfo, resolve};
use crate::{LeafSchema, SchemaDocument, SchemaNodeContent, SchemaNodeId};

impl SchemaDocument {
    /// Find the node a nested field path points at.
    ///
    /// Object segments select a field; any segment below an array selects
    /// its item schema. Returns `None` as soon as the path leaves the schema.
    pub fn node_at<S: AsRef<str>>(
        &self,
        path: impl IntoIterator<Item = S>,
    ) -> Option<SchemaNodeId> {
        let mut current = self.root;
        for segment in path {
            current = match self.unwrap_node(current)? {
                SchemaNodeContent::Leaf(LeafSchema::Object(fields)) => {
                    *fields.get(segment.as_ref())?
                }
                SchemaNodeContent::Leaf(LeafSchema::Array(item)) => *item,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Shape of a nested field such as `contacts.0.email`.
    ///
    /// Paths outside the schema resolve to an unknown shape.
    pub fn shape_at<S: AsRef<str>>(&self, path: impl IntoIterator<Item = S>) -> ShapeInfo {
        resolve(self, self.node_at(path))
    }
}
