//! Wire format: the string/file representation of a submitted form.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thisisplural::Plural;

/// Metadata of an uploaded file. The content itself never reaches this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileLike {
    pub name: String,
    pub content_type: Option<String>,
    pub size: u64,
}

impl FileLike {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            size: 0,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }
}

/// Generic string coercion of a file object, as browsers produce it.
impl Display for FileLike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[object File]")
    }
}

/// A single raw value as produced by parsing a form body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WireValue {
    /// The field was not part of the submission at all.
    #[default]
    Missing,
    Null,
    Text(String),
    /// Repeated field name (multi-select, checkbox group).
    List(Vec<String>),
    File(FileLike),
}

impl WireValue {
    /// Whether the value counts as submitted.
    ///
    /// Empty text and empty lists are treated like a missing value: this is
    /// what an untouched input produces.
    pub fn is_present(&self) -> bool {
        match self {
            WireValue::Missing | WireValue::Null => false,
            WireValue::Text(text) => !text.is_empty(),
            WireValue::List(items) => !items.is_empty(),
            WireValue::File(_) => true,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, WireValue::File(_))
    }

    /// The textual content, if this is a plain text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            WireValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// String coercion with `Array.prototype.join` semantics for lists.
    pub fn to_wire_string(&self) -> String {
        match self {
            WireValue::Missing => "undefined".to_string(),
            WireValue::Null => "null".to_string(),
            WireValue::Text(text) => text.clone(),
            WireValue::List(items) => items.join(","),
            WireValue::File(file) => file.to_string(),
        }
    }
}

impl From<&str> for WireValue {
    fn from(value: &str) -> Self {
        WireValue::Text(value.to_string())
    }
}

impl From<String> for WireValue {
    fn from(value: String) -> Self {
        WireValue::Text(value)
    }
}

impl From<FileLike> for WireValue {
    fn from(value: FileLike) -> Self {
        WireValue::File(value)
    }
}

impl<T: Into<WireValue>> From<Option<T>> for WireValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(WireValue::Null, Into::into)
    }
}

/// Flat mapping from submitted field name to its raw value, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Plural)]
#[plural(len, is_empty, iter, into_iter_ref, new)]
pub struct FormPayload(IndexMap<String, WireValue>);

impl FormPayload {
    /// Parse an `application/x-www-form-urlencoded` body.
    ///
    /// Repeated names are collected into [`WireValue::List`].
    pub fn from_urlencoded(body: &str) -> Self {
        let mut payload = Self::default();
        for (name, value) in url::form_urlencoded::parse(body.as_bytes()) {
            payload.append(name.into_owned(), value.into_owned());
        }
        tracing::trace!(fields = payload.len(), "parsed urlencoded payload");
        payload
    }

    /// Get the raw value of a field. Unknown names yield `Missing`.
    pub fn get(&self, name: &str) -> &WireValue {
        static MISSING: WireValue = WireValue::Missing;
        self.0.get(name).unwrap_or(&MISSING)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Replace the value of a field.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<WireValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Add a text value, turning repeated names into a list.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        let entry = self.0.entry(name.into()).or_default();
        *entry = match std::mem::take(entry) {
            WireValue::Text(first) => WireValue::List(vec![first, value]),
            WireValue::List(mut items) => {
                items.push(value);
                WireValue::List(items)
            }
            WireValue::Missing | WireValue::Null | WireValue::File(_) => WireValue::Text(value),
        };
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<WireValue>> FromIterator<(K, V)> for FormPayload {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}
