#![forbid(unsafe_code)]

//! Records bound from JSON documents
//!
//! A [`DynamicRecord`] pairs a [`RecordSchema`] with values read from one
//! JSON object. Binding converts every leaf value to its declared category
//! up front, so validation sees the same shapes a compiled record would.
//! Inline fields read their values from the same object as their parent.

use crate::error::SchemaError;
use crate::record::{Field, FieldValue, Validate};
use crate::schema::definition::{FieldSchema, FieldType, RecordSchema};
use crate::types::{Classification, ValueCategory};
use serde_json::{Map, Value as Json};

/// A JSON object as read from an input document
pub type Document = Map<String, Json>;

/// Splits a JSON text into record documents
///
/// The text holds either one object or an array of objects.
///
/// # Errors
///
/// Returns `SchemaError::Json` for malformed JSON and
/// `SchemaError::NotAnObject` for any element that is not an object.
pub fn parse_documents(text: &str) -> Result<Vec<Document>, SchemaError> {
    match serde_json::from_str::<Json>(text)? {
        Json::Object(object) => Ok(vec![object]),
        Json::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Json::Object(object) => Ok(object),
                _ => Err(SchemaError::NotAnObject { index }),
            })
            .collect(),
        _ => Err(SchemaError::NotAnObject { index: 0 }),
    }
}

#[derive(Debug)]
enum Bound<'s> {
    Leaf(Classification, Option<FieldValue>),
    Inline(DynamicRecord<'s>),
    Any(Json),
}

/// A record whose layout comes from a schema and whose values come from JSON
#[derive(Debug)]
pub struct DynamicRecord<'s> {
    schema: &'s RecordSchema,
    values: Vec<Bound<'s>>,
}

impl<'s> DynamicRecord<'s> {
    /// Binds `document` against `schema`
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::MissingValue` when a non-optional field is
    /// missing or null and `SchemaError::TypeMismatch` when a value does not
    /// have the declared type.
    pub fn bind(schema: &'s RecordSchema, document: &Document) -> Result<Self, SchemaError> {
        let mut values = Vec::with_capacity(schema.fields.len());

        for field in &schema.fields {
            let bound = match (&field.field_type, &field.inline) {
                (FieldType::Inline, Some(inner)) => Bound::Inline(Self::bind(inner, document)?),
                (FieldType::Inline, None) => {
                    return Err(SchemaError::Invalid(format!(
                        "inline field '{}' has no layout",
                        field.name
                    )));
                }
                (FieldType::Any, _) => {
                    Bound::Any(document.get(field.key()).cloned().unwrap_or(Json::Null))
                }
                (FieldType::Leaf(classification), _) => Bound::Leaf(
                    *classification,
                    bind_leaf(schema, field, *classification, document.get(field.key()))?,
                ),
            };
            values.push(bound);
        }

        Ok(DynamicRecord { schema, values })
    }

    pub fn schema(&self) -> &'s RecordSchema {
        self.schema
    }
}

impl Validate for DynamicRecord<'_> {
    fn record_name(&self) -> &str {
        &self.schema.name
    }

    fn fields(&self) -> Vec<Field<'_>> {
        self.schema
            .fields
            .iter()
            .zip(&self.values)
            .map(|(schema, bound)| {
                let field = match bound {
                    Bound::Leaf(classification, value) => {
                        Field::leaf(&schema.name, *classification, value)
                    }
                    Bound::Inline(record) => Field::inline(&schema.name, record),
                    Bound::Any(value) => Field::opaque(&schema.name, value),
                };
                let field = field.with_rules(&schema.rules);
                match &schema.rename {
                    Some(rename) => field.serialized_as(rename),
                    None => field,
                }
            })
            .collect()
    }
}

fn bind_leaf(
    record: &RecordSchema,
    field: &FieldSchema,
    classification: Classification,
    value: Option<&Json>,
) -> Result<Option<FieldValue>, SchemaError> {
    let value = match value {
        None | Some(Json::Null) if classification.optional => return Ok(None),
        None | Some(Json::Null) => {
            return Err(SchemaError::MissingValue {
                record: record.name.clone(),
                field: field.key().to_string(),
            });
        }
        Some(value) => value,
    };

    convert(classification.category, value)
        .map(Some)
        .ok_or_else(|| SchemaError::TypeMismatch {
            record: record.name.clone(),
            field: field.key().to_string(),
            expected: classification.category.to_string(),
            found: json_kind(value).to_string(),
        })
}

fn convert(category: ValueCategory, value: &Json) -> Option<FieldValue> {
    match category {
        ValueCategory::String => value.as_str().map(|s| FieldValue::String(s.to_string())),
        ValueCategory::Signed => value.as_i64().map(FieldValue::Signed),
        ValueCategory::Unsigned => value.as_u64().map(FieldValue::Unsigned),
        ValueCategory::Float => value.as_f64().map(FieldValue::Float),
        ValueCategory::StringList => {
            convert_list(value, |v| v.as_str().map(str::to_string)).map(FieldValue::StringList)
        }
        ValueCategory::SignedList => convert_list(value, Json::as_i64).map(FieldValue::SignedList),
        ValueCategory::UnsignedList => {
            convert_list(value, Json::as_u64).map(FieldValue::UnsignedList)
        }
        ValueCategory::FloatList => convert_list(value, Json::as_f64).map(FieldValue::FloatList),
    }
}

fn convert_list<T>(value: &Json, element: impl Fn(&Json) -> Option<T>) -> Option<Vec<T>> {
    value.as_array()?.iter().map(element).collect()
}

fn json_kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(n) if n.is_u64() => "unsigned integer",
        Json::Number(n) if n.is_i64() => "signed integer",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
