//! JSON Schema adapter
//!
//! Builds a [`SchemaDocument`] from a JSON Schema object so that forms backed
//! by JSON Schema validators get the same field shapes as any other source.
//!
//! Supported keywords: `type` (single or `[T, "null"]`), `enum`, `default`,
//! `format: "date"` / `"date-time"`, `nullable` (OpenAPI), `properties`,
//! `required`, `items`. Unrecognized keywords are ignored.

use formshape_value::TypedValue;
use serde_json::{Map, Value};

use crate::{DefaultValue, SchemaBuilder, SchemaDocument, SchemaNodeId};

/// Errors that can occur during JSON Schema conversion
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum JsonSchemaError {
    #[error("expected a schema object at {path}")]
    ExpectedObject { path: String },

    #[error("unsupported type '{type_name}' at {path}")]
    UnsupportedType { type_name: String, path: String },

    #[error("type unions other than nullable are not supported at {path}")]
    UnionNotSupported { path: String },

    #[error("enum values must be strings or numbers at {path}")]
    InvalidEnumValue { path: String },
}

/// Convert a JSON Schema into a schema document.
pub fn from_json_schema(schema: &Value) -> Result<SchemaDocument, JsonSchemaError> {
    let mut ctx = ConversionContext {
        builder: SchemaBuilder::new(),
        path: Vec::new(),
    };
    let root = ctx.convert(schema)?;
    Ok(ctx.builder.finish(root))
}

struct ConversionContext {
    builder: SchemaBuilder,
    /// JSON pointer segments of the node being converted, for error messages
    path: Vec<String>,
}

impl ConversionContext {
    fn pointer(&self) -> String {
        if self.path.is_empty() {
            return "#".to_string();
        }
        format!("#/{}", self.path.join("/"))
    }

    fn with_segments<T>(
        &mut self,
        segments: &[&str],
        f: impl FnOnce(&mut Self) -> Result<T, JsonSchemaError>,
    ) -> Result<T, JsonSchemaError> {
        let depth = self.path.len();
        self.path.extend(segments.iter().map(|s| s.to_string()));
        let result = f(self);
        self.path.truncate(depth);
        result
    }

    fn convert(&mut self, schema: &Value) -> Result<SchemaNodeId, JsonSchemaError> {
        let object = match schema {
            Value::Object(object) => object,
            Value::Bool(true) => return Ok(self.builder.any()),
            _ => {
                return Err(JsonSchemaError::ExpectedObject {
                    path: self.pointer(),
                });
            }
        };

        let (mut node, mut nullable) = match object.get("enum") {
            Some(values) => (self.convert_enum(values)?, false),
            None => self.convert_typed(object)?,
        };

        if object.get("nullable").and_then(Value::as_bool) == Some(true) {
            nullable = true;
        }
        if nullable {
            node = self.builder.nullable(node);
        }
        if let Some(default) = object.get("default") {
            node = self
                .builder
                .with_default(node, DefaultValue::constant(json_to_typed(default)));
        }
        Ok(node)
    }

    /// Returns the node and whether `"null"` was part of the type list.
    fn convert_typed(
        &mut self,
        object: &Map<String, Value>,
    ) -> Result<(SchemaNodeId, bool), JsonSchemaError> {
        let (type_name, nullable) = match object.get("type") {
            None => return Ok((self.builder.any(), false)),
            Some(Value::String(name)) => (Some(name.as_str()), false),
            Some(Value::Array(names)) => {
                let mut nullable = false;
                let mut rest = Vec::new();
                for name in names {
                    match name.as_str() {
                        Some("null") => nullable = true,
                        Some(name) => rest.push(name),
                        None => {
                            return Err(JsonSchemaError::UnsupportedType {
                                type_name: name.to_string(),
                                path: self.pointer(),
                            });
                        }
                    }
                }
                if rest.len() > 1 {
                    return Err(JsonSchemaError::UnionNotSupported {
                        path: self.pointer(),
                    });
                }
                (rest.first().copied(), nullable)
            }
            Some(other) => {
                return Err(JsonSchemaError::UnsupportedType {
                    type_name: other.to_string(),
                    path: self.pointer(),
                });
            }
        };

        let node = match type_name {
            None => self.builder.any(),
            Some("string") => match object.get("format").and_then(Value::as_str) {
                Some("date" | "date-time") => self.builder.date(),
                _ => self.builder.string(),
            },
            Some("number" | "integer") => self.builder.number(),
            Some("boolean") => self.builder.boolean(),
            Some("object") => self.convert_object(object)?,
            Some("array") => match object.get("items") {
                Some(items) => {
                    let item = self.with_segments(&["items"], |ctx| ctx.convert(items))?;
                    self.builder.array(item)
                }
                None => {
                    let item = self.builder.any();
                    self.builder.array(item)
                }
            },
            Some(other) => {
                return Err(JsonSchemaError::UnsupportedType {
                    type_name: other.to_string(),
                    path: self.pointer(),
                });
            }
        };
        Ok((node, nullable))
    }

    fn convert_object(
        &mut self,
        object: &Map<String, Value>,
    ) -> Result<SchemaNodeId, JsonSchemaError> {
        let required: Vec<&str> = object
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let mut fields = Vec::new();
        if let Some(properties) = object.get("properties").and_then(Value::as_object) {
            for (key, property) in properties {
                let mut node = self
                    .with_segments(&["properties", key.as_str()], |ctx| ctx.convert(property))?;
                if !required.contains(&key.as_str()) {
                    node = self.builder.optional(node);
                }
                fields.push((key.clone(), node));
            }
        }
        Ok(self.builder.object(fields))
    }

    fn convert_enum(&mut self, values: &Value) -> Result<SchemaNodeId, JsonSchemaError> {
        let invalid = || JsonSchemaError::InvalidEnumValue {
            path: format!("{}/enum", self.pointer()),
        };
        let values = values.as_array().ok_or_else(invalid)?;
        let mut names = Vec::with_capacity(values.len());
        for value in values {
            match value {
                Value::String(name) => names.push(name.clone()),
                Value::Number(number) => names.push(number.to_string()),
                _ => return Err(invalid()),
            }
        }
        Ok(self.builder.enumeration(names))
    }
}

fn json_to_typed(value: &Value) -> TypedValue {
    match value {
        Value::Null => TypedValue::Null,
        Value::Bool(b) => TypedValue::Bool(*b),
        Value::Number(number) => number
            .as_f64()
            .map_or(TypedValue::Number(f64::NAN), TypedValue::Number),
        Value::String(text) => TypedValue::Text(text.clone()),
        Value::Array(items) => TypedValue::List(
            items
                .iter()
                .map(|item| match item {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect(),
        ),
        Value::Object(_) => TypedValue::Undefined,
    }
}
