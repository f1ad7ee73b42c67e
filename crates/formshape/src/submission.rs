//! Turning a submitted payload into typed values or a failure response.

use formshape_error::{ErrorTree, FieldPath, FlatError, KnownPaths, build_error_tree};
use formshape_schema::{SchemaDocument, SchemaNodeId, ShapeCache, ShapeInfo, ShapeSource};
use formshape_value::{FormPayload, TypedValue, WireValue};
use indexmap::IndexMap;
use serde::Serialize;

use crate::assemble::FormState;
use crate::coerce::coerce_value;

/// Coerced values keyed by dotted field path.
pub type FormValues = IndexMap<String, TypedValue>;

/// Coerce every submitted field by the shape the schema gives it.
///
/// Names are normalized to dotted paths (`contacts[0][email]` becomes
/// `contacts.0.email`). Names the schema does not know pass through
/// uncoerced. Declared top-level fields missing from the payload are coerced
/// from an absent value so that, for example, an unchecked checkbox becomes
/// `false`.
pub fn coerce_payload(
    schema: &SchemaDocument,
    payload: &FormPayload,
    cache: &mut ShapeCache<SchemaNodeId>,
) -> FormValues {
    let mut values = FormValues::new();
    for name in payload.names() {
        let (key, shape) = match FieldPath::parse_name(name) {
            Ok(path) => {
                let shape = schema
                    .node_at(path.segment_strings())
                    .map(|id| cache.resolve(schema, id).clone())
                    .unwrap_or_default();
                (path.to_string(), shape)
            }
            Err(error) => {
                tracing::warn!(%error, "passing unparsable field through uncoerced");
                (name.to_string(), ShapeInfo::default())
            }
        };
        values.insert(key, coerce_value(payload.get(name), &shape));
    }

    let known = KnownPaths::from_payload(payload);
    for (key, id) in schema.fields() {
        if values.contains_key(&key) || known.has_descendants(&key) {
            continue;
        }
        let shape = cache.resolve(schema, id);
        values.insert(key, coerce_value(&WireValue::Missing, shape));
    }
    values
}

/// A coerced submission awaiting validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub values: FormValues,
    pub known: KnownPaths,
}

impl Submission {
    pub fn parse(
        schema: &SchemaDocument,
        payload: &FormPayload,
        cache: &mut ShapeCache<SchemaNodeId>,
    ) -> Self {
        Self {
            values: coerce_payload(schema, payload, cache),
            known: KnownPaths::from_payload(payload),
        }
    }

    /// Coerce and validate in one step.
    ///
    /// `validate` receives the typed values and returns every problem it
    /// finds; an empty list accepts the submission.
    pub fn evaluate(
        schema: &SchemaDocument,
        payload: &FormPayload,
        validate: impl FnOnce(&FormValues) -> Vec<FlatError>,
    ) -> Result<FormValues, FailureResponse> {
        let mut cache = ShapeCache::new();
        Self::parse(schema, payload, &mut cache)
            .validate(validate)
            .map(|submission| submission.values)
    }

    pub fn validate(
        self,
        validate: impl FnOnce(&FormValues) -> Vec<FlatError>,
    ) -> Result<Self, FailureResponse> {
        let errors = validate(&self.values);
        if errors.is_empty() {
            return Ok(self);
        }
        Err(self.reject(errors))
    }

    /// Fail an already validated submission, e.g. when the mutation itself
    /// reports a problem.
    pub fn reject(self, errors: impl IntoIterator<Item = FlatError>) -> FailureResponse {
        let errors = build_error_tree(errors, &self.known);
        tracing::debug!(
            global = errors.global.len(),
            fields = errors.fields.len(),
            "submission rejected"
        );
        FailureResponse {
            errors,
            values: self.values,
        }
    }
}

/// What a rejected submission sends back to the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureResponse {
    pub errors: ErrorTree,
    pub values: FormValues,
}

impl FormState {
    /// Render state that re-shows a rejected submission.
    pub fn from_failure(failure: FailureResponse) -> Self {
        Self {
            submitted_values: failure.values,
            submitted_errors: Some(failure.errors),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use formshape_schema::SchemaBuilder;
    use serde_json::json;

    use super::*;

    fn signup() -> SchemaDocument {
        let mut builder = SchemaBuilder::new();
        let email = builder.string();
        let age = builder.number();
        let age = builder.optional(age);
        let terms = builder.boolean();
        let tag = builder.string();
        let tags = builder.array(tag);
        let root = builder.object([
            ("email", email),
            ("age", age),
            ("terms", terms),
            ("tags", tags),
        ]);
        builder.finish(root)
    }

    #[test]
    fn test_missing_checkbox_becomes_false() {
        let payload: FormPayload = [("email", "a@b.c"), ("age", "")].into_iter().collect();
        let values = coerce_payload(&signup(), &payload, &mut ShapeCache::new());
        assert_eq!(values["email"], TypedValue::from("a@b.c"));
        assert_eq!(values["age"], TypedValue::Undefined);
        assert_eq!(values["terms"], TypedValue::Bool(false));
        assert_eq!(values["tags"], TypedValue::Undefined);
    }

    #[test]
    fn test_nested_names_are_normalized() {
        let payload: FormPayload = [("tags[0]", "rust"), ("extra", "kept")].into_iter().collect();
        let values = coerce_payload(&signup(), &payload, &mut ShapeCache::new());
        assert_eq!(values["tags.0"], TypedValue::from("rust"));
        assert_eq!(values["extra"], TypedValue::from("kept"));
        assert!(!values.contains_key("tags"));
    }

    #[test]
    fn test_failure_response_json() {
        let payload: FormPayload = [("email", ""), ("age", "abc")].into_iter().collect();
        let failure = Submission::evaluate(&signup(), &payload, |values| {
            let mut errors = Vec::new();
            if values["email"] == TypedValue::from("") {
                errors.push(FlatError::at("email", "Required"));
            }
            if values["age"].is_nan() {
                errors.push(FlatError::at("age", "Expected a number"));
            }
            errors
        })
        .unwrap_err();
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({
                "errors": {
                    "email": { "messages": ["Required"] },
                    "age": { "messages": ["Expected a number"] }
                },
                "values": { "email": "", "age": null, "terms": false, "tags": null }
            })
        );
    }

    #[test]
    fn test_accepted_submission() {
        let payload: FormPayload = [("email", "a@b.c"), ("terms", "on")].into_iter().collect();
        let values = Submission::evaluate(&signup(), &payload, |_| Vec::new()).unwrap();
        assert_eq!(values["terms"], TypedValue::Bool(true));
    }
}
