//! codec/values.rs
//! Record <-> positional value array.
//!
//! Encode: serde renders the record to a JSON object, then the layout picks the
//! fields out in positional order, recursing into composite fields.
//! Decode: the layout names each positional slot again, composite slots are
//! rebuilt into objects, and serde materializes the record.
//!
//! Notes:
//! - Extra trailing values are ignored; missing trailing values leave the field unset.
//! - Keyed maps of records stay JSON objects; only their values become positional.
//! - A composite field backed by anything other than an array (or object, for maps)
//!   is a `FormatError` naming the field.

use serde_json::{Map, Value};

use crate::codec::layout::{FieldKind, Layout, Record};
use crate::types::{JabError, Result};

/// Positional values of `record` in layout order.
pub fn values_of<R: Record>(record: &R) -> Result<Vec<Value>> {
    let value = serde_json::to_value(record)
        .map_err(|e| JabError::format_with(format!("serialize {}", R::type_name()), e))?;
    to_positional(value, &R::layout(), R::type_name())
}

/// `values_of` rendered as a compact JSON array string.
pub fn values_json<R: Record>(record: &R) -> Result<String> {
    render(&values_of(record)?)
}

/// Rebuild a record from positional values.
pub fn record_from<R: Record>(values: Vec<Value>) -> Result<R> {
    let named = to_named(values, &R::layout(), R::type_name())?;
    serde_json::from_value(Value::Object(named))
        .map_err(|e| JabError::format_with(format!("materialize {}", R::type_name()), e))
}

/// Rebuild a record from a JSON array string.
pub fn record_from_json<R: Record>(json: &str) -> Result<R> {
    record_from(parse_array(json)?)
}

pub fn render(values: &[Value]) -> Result<String> {
    serde_json::to_string(values).map_err(|e| JabError::format_with("render value array", e))
}

pub fn parse_array(json: &str) -> Result<Vec<Value>> {
    serde_json::from_str(json).map_err(|e| JabError::format_with("parse value array", e))
}

fn to_positional(value: Value, layout: &Layout, ctx: &str) -> Result<Vec<Value>> {
    let mut object = match value {
        Value::Object(object) => object,
        other => {
            return Err(JabError::format(format!(
                "{ctx}: record must serialize to an object, got {}",
                kind_name(&other)
            )))
        }
    };

    layout
        .fields()
        .iter()
        .map(|field| {
            let value = object.remove(field.name).unwrap_or(Value::Null);
            let ctx = format!("{ctx}.{}", field.name);
            match field.kind {
                FieldKind::Scalar => Ok(value),
                FieldKind::Record(nested) => nested_positional(value, &nested(), &ctx),
                FieldKind::List(nested) => match value {
                    Value::Null => Ok(Value::Null),
                    Value::Array(items) => {
                        let nested = nested();
                        items
                            .into_iter()
                            .map(|item| nested_positional(item, &nested, &ctx))
                            .collect::<Result<Vec<_>>>()
                            .map(Value::Array)
                    }
                    other => Err(shape_error(&ctx, "array", &other)),
                },
                FieldKind::Map(nested) => match value {
                    Value::Null => Ok(Value::Null),
                    Value::Object(entries) => {
                        let nested = nested();
                        entries
                            .into_iter()
                            .map(|(k, v)| nested_positional(v, &nested, &ctx).map(|v| (k, v)))
                            .collect::<Result<Map<_, _>>>()
                            .map(Value::Object)
                    }
                    other => Err(shape_error(&ctx, "object", &other)),
                },
            }
        })
        .collect()
}

fn nested_positional(value: Value, layout: &Layout, ctx: &str) -> Result<Value> {
    match value {
        Value::Null => Ok(Value::Null),
        other => to_positional(other, layout, ctx).map(Value::Array),
    }
}

fn to_named(values: Vec<Value>, layout: &Layout, ctx: &str) -> Result<Map<String, Value>> {
    let mut named = Map::new();
    // zip: extra values are dropped, missing ones leave the field out
    for (field, value) in layout.fields().iter().zip(values) {
        let ctx = format!("{ctx}.{}", field.name);
        let value = match field.kind {
            FieldKind::Scalar => value,
            FieldKind::Record(nested) => nested_named(value, &nested(), &ctx)?,
            FieldKind::List(nested) => match value {
                Value::Null => Value::Null,
                Value::Array(items) => {
                    let nested = nested();
                    Value::Array(
                        items
                            .into_iter()
                            .map(|item| nested_named(item, &nested, &ctx))
                            .collect::<Result<Vec<_>>>()?,
                    )
                }
                other => return Err(shape_error(&ctx, "array", &other)),
            },
            FieldKind::Map(nested) => match value {
                Value::Null => Value::Null,
                Value::Object(entries) => {
                    let nested = nested();
                    Value::Object(
                        entries
                            .into_iter()
                            .map(|(k, v)| nested_named(v, &nested, &ctx).map(|v| (k, v)))
                            .collect::<Result<Map<_, _>>>()?,
                    )
                }
                other => return Err(shape_error(&ctx, "object", &other)),
            },
        };
        named.insert(field.name.to_string(), value);
    }
    Ok(named)
}

fn nested_named(value: Value, layout: &Layout, ctx: &str) -> Result<Value> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::Array(values) => to_named(values, layout, ctx).map(Value::Object),
        other => Err(shape_error(ctx, "nested array", &other)),
    }
}

fn shape_error(ctx: &str, expected: &str, got: &Value) -> JabError {
    JabError::format(format!("{ctx}: expected {expected}, got {}", kind_name(got)))
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A payload record's positional values together with their JSON rendering.
///
/// Stages read this instead of the typed record: checksums and signatures are
/// computed over `json()`.
#[derive(Clone, Debug, PartialEq)]
pub struct Positional {
    values: Vec<Value>,
    json: String,
}

impl Positional {
    pub fn of<R: Record>(record: &R) -> Result<Self> {
        Self::from_values(values_of(record)?)
    }

    pub fn from_values(values: Vec<Value>) -> Result<Self> {
        let json = render(&values)?;
        Ok(Self { values, json })
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn json(&self) -> &str {
        &self.json
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn to_record<R: Record>(&self) -> Result<R> {
        record_from(self.values.clone())
    }
}
