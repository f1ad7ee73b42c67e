//! Per-field presentation metadata.
//!
//! [`assemble`] walks the declared fields of a schema in order and combines
//! the resolved shape, the current value, the error tree, and the caller's
//! [`FormOptions`] into one [`FieldDescriptor`] per field.

use formshape_error::{ErrorNode, ErrorTree};
use formshape_label::infer_label;
use formshape_schema::{ShapeCache, ShapeInfo, ShapeSource, TypeKind};
use formshape_value::{DisplayValue, TypedValue};
use indexmap::IndexMap;
use serde::Serialize;

use crate::coerce::coerce_to_form;
use crate::options::{FormOptions, SelectOption};

/// Values and errors a form is rendered from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    /// Initial values supplied by the caller.
    pub defaults: IndexMap<String, TypedValue>,
    /// Values returned with a rejected submission.
    pub submitted_values: IndexMap<String, TypedValue>,
    /// Errors returned with a rejected submission.
    pub submitted_errors: Option<ErrorTree>,
    /// Errors from validation running while the user edits.
    pub live_errors: Option<ErrorTree>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults<K, V>(mut self, defaults: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<TypedValue>,
    {
        self.defaults
            .extend(defaults.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_live_errors(mut self, errors: ErrorTree) -> Self {
        self.live_errors = Some(errors);
        self
    }

    /// Live tree first, then the submitted one.
    fn error_trees(&self) -> impl Iterator<Item = &ErrorTree> {
        self.live_errors.iter().chain(self.submitted_errors.iter())
    }

    /// Own messages of a top-level field.
    ///
    /// Live messages win for a field that has them; any other field keeps
    /// the messages returned with the submission.
    pub fn field_errors(&self, key: &str) -> Option<&[String]> {
        self.error_trees()
            .find_map(|tree| tree.messages_for(key).filter(|messages| !messages.is_empty()))
    }

    /// Error node of a top-level field, chosen like [`FormState::field_errors`]
    /// but also counting nested messages.
    pub fn error_node(&self, key: &str) -> Option<&ErrorNode> {
        self.error_trees()
            .filter_map(|tree| tree.get(key))
            .find(|node| node.has_messages())
    }

    /// Submitted form-level messages followed by live ones not already listed.
    pub fn global_errors(&self) -> Vec<String> {
        let mut global = self
            .submitted_errors
            .as_ref()
            .map(|tree| tree.global.clone())
            .unwrap_or_default();
        for message in self.live_errors.iter().flat_map(|tree| &tree.global) {
            if !global.contains(message) {
                global.push(message.clone());
            }
        }
        global
    }

    /// Submitted value of `key`, else its default.
    pub fn value(&self, key: &str) -> Option<&TypedValue> {
        self.submitted_values
            .get(key)
            .or_else(|| self.defaults.get(key))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub key: String,
    pub type_kind: TypeKind,
    pub required: bool,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    pub auto_focus: bool,
    pub value: DisplayValue,
    pub hidden: bool,
    pub multiline: bool,
}

/// Everything needed to render one form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    pub fields: Vec<FieldDescriptor>,
    /// Form-level messages, including promoted hidden-field errors.
    pub global_errors: Vec<String>,
    /// Key of the field that receives focus.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autofocus: Option<String>,
}

impl FormView {
    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.key == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssembleError {
    #[error("autofocus requested for '{key}', which is not a field of this form")]
    UnknownAutofocusField { key: String },
}

/// Build the descriptors of every declared field.
///
/// # Errors
///
/// Fails only when [`FormOptions::autofocus`] names a key the schema does
/// not declare.
pub fn assemble<S: ShapeSource + ?Sized>(
    source: &S,
    state: &FormState,
    options: &FormOptions,
    cache: &mut ShapeCache<S::Id>,
) -> Result<FormView, AssembleError> {
    let declared = source.fields();
    if let Some(key) = &options.autofocus
        && !declared.iter().any(|(declared_key, _)| declared_key == key)
    {
        return Err(AssembleError::UnknownAutofocusField { key: key.clone() });
    }

    let mut view = FormView {
        global_errors: state.global_errors(),
        ..FormView::default()
    };

    for (key, id) in declared {
        let shape = cache.resolve(source, id);
        let hidden = options.is_hidden(&key);
        let label = options
            .labels
            .get(&key)
            .cloned()
            .unwrap_or_else(|| infer_label(&key));
        let mut field_errors = state.field_errors(&key).map(<[String]>::to_vec);

        // Hidden fields surface every message, nested ones included, globally.
        if hidden {
            field_errors = None;
            if let Some(node) = state.error_node(&key) {
                let messages = node.all_messages();
                tracing::debug!(%key, count = messages.len(), "promoting hidden field errors");
                view.global_errors
                    .extend(messages.iter().map(|message| format!("{label}: {message}")));
            }
        }

        let placeholder = options.placeholders.get(&key).cloned();
        let field_options = select_options(&key, shape, options, placeholder.as_deref());
        let value = match state.value(&key) {
            Some(value) => coerce_to_form(value, shape),
            None => coerce_to_form(&shape.default_value().unwrap_or_default(), shape),
        };

        view.fields.push(FieldDescriptor {
            type_kind: shape.type_kind,
            required: shape.is_required(),
            label,
            placeholder,
            options: field_options,
            errors: field_errors,
            auto_focus: false,
            value,
            hidden,
            multiline: options.is_multiline(&key),
            key,
        });
    }

    view.autofocus = view
        .fields
        .iter()
        .find(|field| field.errors.is_some())
        .map(|field| field.key.clone())
        .or_else(|| {
            options
                .autofocus
                .clone()
                .filter(|key| !options.is_hidden(key))
        });
    if let Some(target) = &view.autofocus {
        tracing::debug!(key = %target, "autofocus target");
        for field in &mut view.fields {
            field.auto_focus = &field.key == target;
        }
    }
    Ok(view)
}

/// Caller options, else enum values labelled by inference.
///
/// Fields that are not required get a leading empty option.
fn select_options(
    key: &str,
    shape: &ShapeInfo,
    options: &FormOptions,
    placeholder: Option<&str>,
) -> Option<Vec<SelectOption>> {
    let mut list = match (options.options.get(key), &shape.enum_values) {
        (Some(list), _) => list.clone(),
        (None, Some(values)) => values
            .iter()
            .map(|value| SelectOption::new(infer_label(value), value.clone()))
            .collect(),
        (None, None) => return None,
    };
    if !shape.is_required() {
        list.insert(0, SelectOption::new(placeholder.unwrap_or_default(), ""));
    }
    Some(list)
}
