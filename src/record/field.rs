#![forbid(unsafe_code)]

//! Record and field descriptions
//!
//! A record exposes its fields through [`Validate::fields`]. Each field pairs
//! a declared name and an optional rule tag with one of three slots: a leaf
//! value that rules are evaluated against, an inline sub-record whose fields
//! are validated as if they were declared on the parent, or an opaque value
//! that no rule can apply to.

use crate::record::category::Classify;
use crate::record::extract::Extract;
use crate::types::Classification;
use std::fmt;

/// A record whose fields can be validated
pub trait Validate {
    /// Name of the record type, reported alongside each field
    fn record_name(&self) -> &str;

    /// The record's fields in declaration order
    fn fields(&self) -> Vec<Field<'_>>;
}

impl<T: Validate + ?Sized> Validate for &T {
    fn record_name(&self) -> &str {
        (**self).record_name()
    }

    fn fields(&self) -> Vec<Field<'_>> {
        (**self).fields()
    }
}

impl<T: Validate + ?Sized> Validate for Box<T> {
    fn record_name(&self) -> &str {
        (**self).record_name()
    }

    fn fields(&self) -> Vec<Field<'_>> {
        (**self).fields()
    }
}

/// What a field holds
pub enum Slot<'a> {
    /// A classifiable value
    Leaf {
        classification: Classification,
        value: &'a dyn Extract,
    },
    /// A sub-record whose fields are spliced into the parent's report
    Inline(&'a dyn Validate),
    /// A value of a type rules cannot be evaluated against
    Opaque { type_name: &'static str },
}

impl fmt::Debug for Slot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Leaf { classification, .. } => f
                .debug_struct("Leaf")
                .field("classification", classification)
                .finish_non_exhaustive(),
            Slot::Inline(record) => f
                .debug_tuple("Inline")
                .field(&record.record_name())
                .finish(),
            Slot::Opaque { type_name } => f
                .debug_struct("Opaque")
                .field("type_name", type_name)
                .finish(),
        }
    }
}

/// One declared field of a record
#[derive(Debug)]
pub struct Field<'a> {
    name: &'a str,
    serialized_name: Option<&'a str>,
    rules: &'a str,
    slot: Slot<'a>,
}

impl<'a> Field<'a> {
    /// A leaf field holding a classifiable value
    pub fn new<T: Classify + Extract>(name: &'a str, value: &'a T) -> Self {
        Self::leaf(name, T::CLASSIFICATION, value)
    }

    /// A leaf field whose classification is only known at runtime
    pub fn leaf(name: &'a str, classification: Classification, value: &'a dyn Extract) -> Self {
        Field {
            name,
            serialized_name: None,
            rules: "",
            slot: Slot::Leaf {
                classification,
                value,
            },
        }
    }

    /// An inline sub-record, validated recursively
    pub fn inline<R: Validate>(name: &'a str, record: &'a R) -> Self {
        Field {
            name,
            serialized_name: None,
            rules: "",
            slot: Slot::Inline(record),
        }
    }

    /// A field whose type cannot be validated
    ///
    /// Untagged opaque fields are skipped; giving one rules is a
    /// configuration error.
    pub fn opaque<T: ?Sized>(name: &'a str, _value: &'a T) -> Self {
        Field {
            name,
            serialized_name: None,
            rules: "",
            slot: Slot::Opaque {
                type_name: std::any::type_name::<T>(),
            },
        }
    }

    /// Attaches a rule tag such as `required;minLength=3`
    pub fn with_rules(mut self, rules: &'a str) -> Self {
        self.rules = rules;
        self
    }

    /// Records the name this field is serialized under
    pub fn serialized_as(mut self, name: &'a str) -> Self {
        self.serialized_name = Some(name);
        self
    }

    /// The declared field name
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn serialized_name(&self) -> Option<&'a str> {
        self.serialized_name
    }

    /// The raw rule tag; empty when the field is not validated
    pub fn rules(&self) -> &'a str {
        self.rules
    }

    pub fn slot(&self) -> &Slot<'a> {
        &self.slot
    }
}

/// Implements [`Validate`] for a struct from a compact field listing
///
/// Each entry is one of:
///
/// - `name`: a leaf field without rules
/// - `name => "rules"`: a leaf field with a rule tag
/// - `name as "serialized" => "rules"`: a leaf field with a serialized name
/// - `inline name`: a sub-record validated in place
/// - `opaque name`: a field of a type rules cannot apply to
///
/// ```
/// use fieldcheck::validate_record;
///
/// struct Account {
///     name: String,
///     age: u32,
///     nickname: Option<String>,
/// }
///
/// validate_record! {
///     Account {
///         name => "minLength=3;alpha",
///         age => "min=17;max=35",
///         nickname as "nick" => "maxLength=12",
///     }
/// }
///
/// let account = Account { name: "cc".into(), age: 18, nickname: None };
/// let report = fieldcheck::validate(&account).unwrap().unwrap();
/// assert_eq!(report.fields_errors().len(), 1);
/// ```
#[macro_export]
macro_rules! validate_record {
    ($record:ident { $($body:tt)* }) => {
        impl $crate::Validate for $record {
            fn record_name(&self) -> &str {
                stringify!($record)
            }

            fn fields(&self) -> ::std::vec::Vec<$crate::Field<'_>> {
                let mut fields = ::std::vec::Vec::new();
                $crate::validate_record!(@field self, fields; $($body)*);
                fields
            }
        }
    };
    (@field $this:ident, $fields:ident;) => {};
    (@field $this:ident, $fields:ident; inline $name:ident $(, $($rest:tt)*)?) => {
        $fields.push($crate::Field::inline(stringify!($name), &$this.$name));
        $crate::validate_record!(@field $this, $fields; $($($rest)*)?);
    };
    (@field $this:ident, $fields:ident; opaque $name:ident $(=> $rules:expr)? $(, $($rest:tt)*)?) => {
        $fields.push(
            $crate::Field::opaque(stringify!($name), &$this.$name)$(.with_rules($rules))?
        );
        $crate::validate_record!(@field $this, $fields; $($($rest)*)?);
    };
    (@field $this:ident, $fields:ident; $name:ident $(as $serialized:literal)? $(=> $rules:expr)? $(, $($rest:tt)*)?) => {
        $fields.push(
            $crate::Field::new(stringify!($name), &$this.$name)
                $(.serialized_as($serialized))?
                $(.with_rules($rules))?
        );
        $crate::validate_record!(@field $this, $fields; $($($rest)*)?);
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValueCategory;

    struct Base {
        id: String,
    }

    struct Profile {
        base: Base,
        name: String,
        tags: Vec<String>,
        score: Option<f64>,
        meta: std::collections::HashMap<String, String>,
    }

    crate::validate_record! {
        Base {
            id as "id" => "minLength=10",
        }
    }

    crate::validate_record! {
        Profile {
            inline base,
            name => "required;alpha",
            tags,
            score => "max=1",
            opaque meta,
        }
    }

    fn profile() -> Profile {
        Profile {
            base: Base { id: "abc".into() },
            name: "Ada".into(),
            tags: vec![],
            score: None,
            meta: Default::default(),
        }
    }

    #[test]
    fn test_macro_lists_fields_in_order() {
        let profile = profile();
        let fields = profile.fields();
        let names: Vec<_> = fields.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["base", "name", "tags", "score", "meta"]);
        assert_eq!(profile.record_name(), "Profile");
    }

    #[test]
    fn test_macro_builds_slots() {
        let profile = profile();
        let fields = profile.fields();

        assert!(matches!(fields[0].slot(), Slot::Inline(r) if r.record_name() == "Base"));
        assert_eq!(fields[1].rules(), "required;alpha");
        assert!(matches!(
            fields[2].slot(),
            Slot::Leaf { classification, .. } if classification.category == ValueCategory::StringList
        ));
        assert_eq!(fields[2].rules(), "");
        assert!(matches!(
            fields[3].slot(),
            Slot::Leaf { classification, .. } if classification.optional
        ));
        assert!(matches!(fields[4].slot(), Slot::Opaque { type_name } if type_name.contains("HashMap")));
    }

    #[test]
    fn test_serialized_name() {
        let base = Base { id: "x".into() };
        let fields = base.fields();
        assert_eq!(fields[0].serialized_name(), Some("id"));
        assert_eq!(fields[0].rules(), "minLength=10");
    }

    #[test]
    fn test_pointer_like_records_delegate() {
        let boxed: Box<Profile> = Box::new(profile());
        assert_eq!(boxed.record_name(), "Profile");
        assert_eq!((&boxed).fields().len(), 5);
    }
}
