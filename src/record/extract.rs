#![forbid(unsafe_code)]

//! Runtime value extraction
//!
//! [`Extract`] reads a field's value in the shape of its category. Plain types
//! always produce a value; `Option` wrappers produce `None` when empty, which
//! the engine treats as an absent field.
//!
//! `f32` fields keep their width: their values and rule parameters are
//! compared as `f32`, so `max=0.1` holds for a field storing `0.1f32`.

use crate::rules::Target;
use crate::types::ValueCategory;
use serde::Serialize;
use std::fmt;

/// A field value borrowed from the record being validated
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Str(&'a str),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Float32(f32),
    StrList(Vec<&'a str>),
    SignedList(Vec<i64>),
    UnsignedList(Vec<u64>),
    FloatList(Vec<f64>),
    Float32List(Vec<f32>),
}

impl Value<'_> {
    /// The category this value belongs to
    pub fn category(&self) -> ValueCategory {
        match self {
            Value::Str(_) => ValueCategory::String,
            Value::Signed(_) => ValueCategory::Signed,
            Value::Unsigned(_) => ValueCategory::Unsigned,
            Value::Float(_) | Value::Float32(_) => ValueCategory::Float,
            Value::StrList(_) => ValueCategory::StringList,
            Value::SignedList(_) => ValueCategory::SignedList,
            Value::UnsignedList(_) => ValueCategory::UnsignedList,
            Value::FloatList(_) | Value::Float32List(_) => ValueCategory::FloatList,
        }
    }

    /// What rule parameters are coerced to for this value
    pub fn target(&self) -> Target {
        Target {
            category: self.category(),
            single_precision: matches!(self, Value::Float32(_) | Value::Float32List(_)),
        }
    }

    /// Detaches the value from the record so it can be kept in a report
    pub fn to_field_value(&self) -> FieldValue {
        match self {
            Value::Str(s) => FieldValue::String((*s).to_string()),
            Value::Signed(v) => FieldValue::Signed(*v),
            Value::Unsigned(v) => FieldValue::Unsigned(*v),
            Value::Float(v) => FieldValue::Float(*v),
            Value::Float32(v) => FieldValue::Float32(*v),
            Value::StrList(items) => {
                FieldValue::StringList(items.iter().map(|s| (*s).to_string()).collect())
            }
            Value::SignedList(items) => FieldValue::SignedList(items.clone()),
            Value::UnsignedList(items) => FieldValue::UnsignedList(items.clone()),
            Value::FloatList(items) => FieldValue::FloatList(items.clone()),
            Value::Float32List(items) => FieldValue::Float32List(items.clone()),
        }
    }
}

/// An owned field value as it appears in a report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Float32(f32),
    StringList(Vec<String>),
    SignedList(Vec<i64>),
    UnsignedList(Vec<u64>),
    FloatList(Vec<f64>),
    Float32List(Vec<f32>),
}

impl FieldValue {
    /// Borrows the value in its extracted shape
    pub fn as_value(&self) -> Value<'_> {
        match self {
            FieldValue::String(s) => Value::Str(s),
            FieldValue::Signed(v) => Value::Signed(*v),
            FieldValue::Unsigned(v) => Value::Unsigned(*v),
            FieldValue::Float(v) => Value::Float(*v),
            FieldValue::Float32(v) => Value::Float32(*v),
            FieldValue::StringList(items) => {
                Value::StrList(items.iter().map(String::as_str).collect())
            }
            FieldValue::SignedList(items) => Value::SignedList(items.clone()),
            FieldValue::UnsignedList(items) => Value::UnsignedList(items.clone()),
            FieldValue::FloatList(items) => Value::FloatList(items.clone()),
            FieldValue::Float32List(items) => Value::Float32List(items.clone()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => f.write_str(s),
            FieldValue::Signed(v) => write!(f, "{}", v),
            FieldValue::Unsigned(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Float32(v) => write!(f, "{}", v),
            FieldValue::StringList(items) => write_list(f, items),
            FieldValue::SignedList(items) => write_list(f, items),
            FieldValue::UnsignedList(items) => write_list(f, items),
            FieldValue::FloatList(items) => write_list(f, items),
            FieldValue::Float32List(items) => write_list(f, items),
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str("]")
}

/// Reads a field's value, or `None` if an optional field is empty
pub trait Extract {
    fn extract(&self) -> Option<Value<'_>>;
}

impl Extract for String {
    fn extract(&self) -> Option<Value<'_>> {
        Some(Value::Str(self.as_str()))
    }
}

impl Extract for &str {
    fn extract(&self) -> Option<Value<'_>> {
        Some(Value::Str(self))
    }
}

macro_rules! extract_scalar {
    ($variant:ident as $target:ty => $($ty:ty),+) => {
        $(
            impl Extract for $ty {
                fn extract(&self) -> Option<Value<'_>> {
                    Some(Value::$variant(*self as $target))
                }
            }
        )+
    };
}

extract_scalar!(Signed as i64 => i8, i16, i32, i64, isize);
extract_scalar!(Unsigned as u64 => u8, u16, u32, u64, usize);
extract_scalar!(Float32 as f32 => f32);
extract_scalar!(Float as f64 => f64);

macro_rules! extract_list {
    ($variant:ident as $target:ty => $($ty:ty),+) => {
        $(
            impl Extract for Vec<$ty> {
                fn extract(&self) -> Option<Value<'_>> {
                    Some(Value::$variant(self.iter().map(|v| *v as $target).collect()))
                }
            }
        )+
    };
}

extract_list!(SignedList as i64 => i8, i16, i32, i64, isize);
extract_list!(UnsignedList as u64 => u8, u16, u32, u64, usize);
extract_list!(Float32List as f32 => f32);
extract_list!(FloatList as f64 => f64);

impl Extract for Vec<String> {
    fn extract(&self) -> Option<Value<'_>> {
        Some(Value::StrList(self.iter().map(String::as_str).collect()))
    }
}

impl Extract for Vec<&str> {
    fn extract(&self) -> Option<Value<'_>> {
        Some(Value::StrList(self.clone()))
    }
}

impl Extract for FieldValue {
    fn extract(&self) -> Option<Value<'_>> {
        Some(self.as_value())
    }
}

impl<T: Extract> Extract for Option<T> {
    fn extract(&self) -> Option<Value<'_>> {
        self.as_ref().and_then(Extract::extract)
    }
}
