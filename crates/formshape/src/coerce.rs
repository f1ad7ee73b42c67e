//! Value coercion between the wire format and typed values.
//!
//! Inbound coercion never fails. Presence is checked first; only for an
//! absent value do `nullable` and then `optional` apply, before falling back
//! to the type's empty sentinel:
//!
//! | kind            | present                | absent (not nullable/optional) |
//! |-----------------|------------------------|--------------------------------|
//! | boolean         | `true`                 | `false` (never `undefined`)    |
//! | number          | `Number(raw)`, maybe NaN | `null`                       |
//! | date            | calendar date          | `null` (always)                |
//! | string / enum   | `String(raw)`          | `""`                           |
//! | unknown         | passthrough            | passthrough                    |

use formshape_schema::{ShapeInfo, TypeKind};
use formshape_value::date::{parse_date_generic, parse_date_only};
use formshape_value::number::parse_js_number;
use formshape_value::{DisplayValue, TypedValue, WireValue};

/// Coerce a raw submitted value into the type described by `shape`.
pub fn coerce_value(raw: &WireValue, shape: &ShapeInfo) -> TypedValue {
    let present = raw.is_present();
    let value = match shape.type_kind {
        TypeKind::Unknown => TypedValue::from_wire(raw),
        TypeKind::Boolean => {
            if present {
                TypedValue::Bool(true)
            } else if shape.nullable {
                TypedValue::Null
            } else {
                TypedValue::Bool(false)
            }
        }
        TypeKind::Number => {
            if present {
                TypedValue::Number(parse_js_number(&raw.to_wire_string()))
            } else {
                empty_value(shape, TypedValue::Null)
            }
        }
        TypeKind::Date => match raw {
            _ if !present => TypedValue::Null,
            WireValue::Text(text) => {
                TypedValue::Date(parse_date_only(text).unwrap_or_else(|| parse_date_generic(text)))
            }
            _ => TypedValue::Null,
        },
        TypeKind::String | TypeKind::Enum => {
            if present {
                TypedValue::Text(raw.to_wire_string())
            } else {
                empty_value(shape, TypedValue::Text(String::new()))
            }
        }
    };
    tracing::trace!(kind = %shape.type_kind, ?raw, ?value, "coerced value");
    value
}

fn empty_value(shape: &ShapeInfo, fallback: TypedValue) -> TypedValue {
    if shape.nullable {
        TypedValue::Null
    } else if shape.optional {
        TypedValue::Undefined
    } else {
        fallback
    }
}

/// Format a typed value for re-populating the form control of `shape`.
pub fn coerce_to_form(value: &TypedValue, shape: &ShapeInfo) -> DisplayValue {
    match shape.type_kind {
        TypeKind::Boolean => DisplayValue::Checked(value.is_truthy()),
        TypeKind::Date => match value {
            TypedValue::Date(date) => date
                .to_form_string()
                .map_or(DisplayValue::Absent, DisplayValue::Text),
            TypedValue::Undefined | TypedValue::Null => DisplayValue::Absent,
            TypedValue::Text(text) => DisplayValue::Text(text.clone()),
            other => DisplayValue::Raw(other.clone()),
        },
        TypeKind::String | TypeKind::Number | TypeKind::Enum => {
            if value.is_nullish() {
                DisplayValue::Text(String::new())
            } else {
                DisplayValue::Text(value.to_display_string())
            }
        }
        TypeKind::Unknown => match value {
            TypedValue::Undefined | TypedValue::Null => DisplayValue::Text(String::new()),
            TypedValue::Text(text) => DisplayValue::Text(text.clone()),
            other => DisplayValue::Raw(other.clone()),
        },
    }
}
