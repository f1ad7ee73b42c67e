use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// One entry of a select control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOption {
    pub display_name: String,
    pub wire_value: String,
}

impl SelectOption {
    pub fn new(display_name: impl Into<String>, wire_value: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            wire_value: wire_value.into(),
        }
    }
}

/// Per-field presentation overrides supplied by the caller.
///
/// Every field is optional when loaded from JSON:
///
/// ```json
/// {
///   "labels": { "url": "Homepage" },
///   "hiddenFields": ["csrfToken"],
///   "autofocus": "email"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormOptions {
    pub labels: IndexMap<String, String>,
    pub placeholders: IndexMap<String, String>,
    pub options: IndexMap<String, Vec<SelectOption>>,
    pub hidden_fields: IndexSet<String>,
    pub multiline_fields: IndexSet<String>,
    /// Field to focus when no field has errors.
    pub autofocus: Option<String>,
}

impl FormOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.labels.insert(key.into(), label.into());
        self
    }

    pub fn placeholder(mut self, key: impl Into<String>, placeholder: impl Into<String>) -> Self {
        self.placeholders.insert(key.into(), placeholder.into());
        self
    }

    pub fn options(
        mut self,
        key: impl Into<String>,
        options: impl IntoIterator<Item = SelectOption>,
    ) -> Self {
        self.options
            .insert(key.into(), options.into_iter().collect());
        self
    }

    pub fn hidden(mut self, key: impl Into<String>) -> Self {
        self.hidden_fields.insert(key.into());
        self
    }

    pub fn multiline(mut self, key: impl Into<String>) -> Self {
        self.multiline_fields.insert(key.into());
        self
    }

    pub fn autofocus(mut self, key: impl Into<String>) -> Self {
        self.autofocus = Some(key.into());
        self
    }

    pub fn is_hidden(&self, key: &str) -> bool {
        self.hidden_fields.contains(key)
    }

    pub fn is_multiline(&self, key: &str) -> bool {
        self.multiline_fields.contains(key)
    }
}
