//! Typed values produced by inbound coercion, and their display form.

use chrono::{NaiveDate, NaiveTime};
use serde::{Serialize, Serializer};

use crate::date::DateValue;
use crate::number::format_js_number;
use crate::wire::{FileLike, WireValue};

/// A coerced value.
///
/// Invalid input is represented in-band (`Number(NaN)`, `Date(Invalid)`) so
/// that rejection is left to schema validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TypedValue {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(DateValue),
    /// Uncoerced repeated values, passed through for unknown shapes.
    List(Vec<String>),
    /// Uncoerced upload, passed through for unknown shapes.
    File(FileLike),
}

impl TypedValue {
    /// `null` or `undefined`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, TypedValue::Undefined | TypedValue::Null)
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, TypedValue::Number(n) if n.is_nan())
    }

    pub fn is_invalid_date(&self) -> bool {
        matches!(self, TypedValue::Date(DateValue::Invalid))
    }

    /// JavaScript truthiness.
    pub fn is_truthy(&self) -> bool {
        match self {
            TypedValue::Undefined | TypedValue::Null => false,
            TypedValue::Bool(b) => *b,
            TypedValue::Number(n) => *n != 0.0 && !n.is_nan(),
            TypedValue::Text(text) => !text.is_empty(),
            TypedValue::Date(_) | TypedValue::List(_) | TypedValue::File(_) => true,
        }
    }

    /// `String(value)` for the non-nullish cases.
    pub fn to_display_string(&self) -> String {
        match self {
            TypedValue::Undefined => "undefined".to_string(),
            TypedValue::Null => "null".to_string(),
            TypedValue::Bool(b) => b.to_string(),
            TypedValue::Number(n) => format_js_number(*n),
            TypedValue::Text(text) => text.clone(),
            TypedValue::Date(DateValue::Valid(datetime)) => {
                if datetime.time() == NaiveTime::MIN {
                    datetime.format("%Y-%m-%d").to_string()
                } else {
                    datetime.format("%Y-%m-%dT%H:%M:%S").to_string()
                }
            }
            TypedValue::Date(DateValue::Invalid) => "Invalid Date".to_string(),
            TypedValue::List(items) => items.join(","),
            TypedValue::File(file) => file.to_string(),
        }
    }

    /// Convert a raw wire value without any coercion.
    pub fn from_wire(raw: &WireValue) -> Self {
        match raw {
            WireValue::Missing => TypedValue::Undefined,
            WireValue::Null => TypedValue::Null,
            WireValue::Text(text) => TypedValue::Text(text.clone()),
            WireValue::List(items) => TypedValue::List(items.clone()),
            WireValue::File(file) => TypedValue::File(file.clone()),
        }
    }
}

impl From<bool> for TypedValue {
    fn from(value: bool) -> Self {
        TypedValue::Bool(value)
    }
}

impl From<f64> for TypedValue {
    fn from(value: f64) -> Self {
        TypedValue::Number(value)
    }
}

impl From<i32> for TypedValue {
    fn from(value: i32) -> Self {
        TypedValue::Number(f64::from(value))
    }
}

impl From<&str> for TypedValue {
    fn from(value: &str) -> Self {
        TypedValue::Text(value.to_string())
    }
}

impl From<String> for TypedValue {
    fn from(value: String) -> Self {
        TypedValue::Text(value)
    }
}

impl From<NaiveDate> for TypedValue {
    fn from(value: NaiveDate) -> Self {
        TypedValue::Date(value.into())
    }
}

impl From<DateValue> for TypedValue {
    fn from(value: DateValue) -> Self {
        TypedValue::Date(value)
    }
}

/// JSON follows `JSON.stringify`: non-finite numbers and invalid dates become `null`.
impl Serialize for TypedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TypedValue::Undefined | TypedValue::Null => serializer.serialize_none(),
            TypedValue::Bool(b) => serializer.serialize_bool(*b),
            TypedValue::Number(n) if n.is_finite() => serializer.serialize_f64(*n),
            TypedValue::Number(_) => serializer.serialize_none(),
            TypedValue::Text(text) => serializer.serialize_str(text),
            TypedValue::Date(DateValue::Valid(_)) => {
                serializer.serialize_str(&self.to_display_string())
            }
            TypedValue::Date(DateValue::Invalid) => serializer.serialize_none(),
            TypedValue::List(items) => items.serialize(serializer),
            TypedValue::File(file) => file.serialize(serializer),
        }
    }
}

/// A value formatted for re-populating a form control.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayValue {
    /// Nothing to show; the control keeps its own empty state.
    Absent,
    Text(String),
    /// Checkbox state.
    Checked(bool),
    /// Untouched value for shapes the formatter does not specialize.
    Raw(TypedValue),
}

impl DisplayValue {
    /// What a browser would submit for a control showing this value.
    ///
    /// An unchecked checkbox is not submitted at all.
    pub fn to_wire(&self) -> WireValue {
        match self {
            DisplayValue::Absent => WireValue::Missing,
            DisplayValue::Text(text) => WireValue::Text(text.clone()),
            DisplayValue::Checked(true) => WireValue::Text("on".to_string()),
            DisplayValue::Checked(false) => WireValue::Missing,
            DisplayValue::Raw(value) => match value {
                TypedValue::Undefined => WireValue::Missing,
                TypedValue::Null => WireValue::Null,
                TypedValue::List(items) => WireValue::List(items.clone()),
                TypedValue::File(file) => WireValue::File(file.clone()),
                other => WireValue::Text(other.to_display_string()),
            },
        }
    }
}

impl Serialize for DisplayValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DisplayValue::Absent => serializer.serialize_none(),
            DisplayValue::Text(text) => serializer.serialize_str(text),
            DisplayValue::Checked(checked) => serializer.serialize_bool(*checked),
            DisplayValue::Raw(value) => value.serialize(serializer),
        }
    }
}
