#![forbid(unsafe_code)]

//! Core domain types for fieldcheck
//!
//! This module defines the value categories fields are classified into and the
//! naming conventions used to present field names in reports.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic category of a field's declared type
///
/// The category decides which rule keywords apply to a field and how rule
/// parameters are coerced. It is derived from the static type of a field and
/// never changes at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueCategory {
    String,
    Signed,
    Unsigned,
    Float,
    StringList,
    SignedList,
    UnsignedList,
    FloatList,
}

impl ValueCategory {
    /// All categories, scalars first
    pub const ALL: [ValueCategory; 8] = [
        ValueCategory::String,
        ValueCategory::Signed,
        ValueCategory::Unsigned,
        ValueCategory::Float,
        ValueCategory::StringList,
        ValueCategory::SignedList,
        ValueCategory::UnsignedList,
        ValueCategory::FloatList,
    ];

    /// Returns true for the homogeneous list categories
    pub fn is_list(self) -> bool {
        matches!(
            self,
            ValueCategory::StringList
                | ValueCategory::SignedList
                | ValueCategory::UnsignedList
                | ValueCategory::FloatList
        )
    }

    /// Returns true for the integer and float categories
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            ValueCategory::Signed | ValueCategory::Unsigned | ValueCategory::Float
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueCategory::String => "string",
            ValueCategory::Signed => "signed integer",
            ValueCategory::Unsigned => "unsigned integer",
            ValueCategory::Float => "float",
            ValueCategory::StringList => "string list",
            ValueCategory::SignedList => "signed integer list",
            ValueCategory::UnsignedList => "unsigned integer list",
            ValueCategory::FloatList => "float list",
        }
    }
}

impl fmt::Display for ValueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of classifying a declared field type
///
/// Optional wrappers keep the category of the wrapped type and only set the
/// `optional` flag, which controls whether extraction can report absence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Classification {
    pub category: ValueCategory,
    pub optional: bool,
}

impl Classification {
    pub const fn required(category: ValueCategory) -> Self {
        Classification {
            category,
            optional: false,
        }
    }

    pub const fn optional(category: ValueCategory) -> Self {
        Classification {
            category,
            optional: true,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "optional {}", self.category)
        } else {
            write!(f, "{}", self.category)
        }
    }
}

/// Presentation transform applied to declared field names in reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NamingConvention {
    /// Use the declared field name as-is
    Verbatim,
    /// Lowercase the leading letter; all-caps names such as `ID` become `id`
    /// and snake_case names are joined into lowerCamel
    #[default]
    LowerCamel,
    /// Use the field's serialized name when it declares one, lowerCamel otherwise
    Serialized,
}

impl NamingConvention {
    /// Resolves the name a field is reported under
    pub fn resolve(self, declared: &str, serialized: Option<&str>) -> String {
        match self {
            NamingConvention::Verbatim => declared.to_string(),
            NamingConvention::LowerCamel => lower_camel(declared),
            NamingConvention::Serialized => match serialized {
                Some(name) => name.to_string(),
                None => lower_camel(declared),
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NamingConvention::Verbatim => "verbatim",
            NamingConvention::LowerCamel => "lowerCamel",
            NamingConvention::Serialized => "serialized",
        }
    }
}

impl fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn lower_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());

    for (i, word) in name.split('_').filter(|w| !w.is_empty()).enumerate() {
        let all_caps = !word.chars().any(char::is_lowercase);
        let mut chars = word.chars();
        let Some(first) = chars.next() else {
            continue;
        };

        if i == 0 {
            if all_caps {
                out.push_str(&word.to_lowercase());
            } else {
                out.extend(first.to_lowercase());
                out.push_str(chars.as_str());
            }
        } else {
            out.extend(first.to_uppercase());
            if all_caps {
                out.push_str(&chars.as_str().to_lowercase());
            } else {
                out.push_str(chars.as_str());
            }
        }
    }

    out
}
