#![forbid(unsafe_code)]

//! Rule tag grammar
//!
//! A tag is a `;`-separated list of rules. Each rule is a bare keyword or a
//! `keyword=parameter` pair, split on the first `=`:
//!
//! ```text
//! rule := keyword | keyword '=' parameter
//! tag  := rule (';' rule)*
//! ```
//!
//! Parameters stay raw strings until a rule is evaluated against a field, at
//! which point they are coerced for that field's category. Parsed tags are
//! shared through [`cached_rules`](crate::rules::cached_rules), so a coerced
//! parameter is reused by every later check of the same tag.

use crate::error::RuleError;
use crate::rules::param::{Param, ParamKind, Target, coerce};
use crate::types::ValueCategory;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::OnceLock;

/// Named string formats backed by the preset pattern registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Alpha,
    AlphaNumeric,
    Numeric,
    Hexadecimal,
    HexColor,
    Rgb,
    Rgba,
    Hsl,
    Hsla,
    Email,
    Cron,
}

impl Format {
    /// All formats, in registry order
    pub const ALL: [Format; 11] = [
        Format::Alpha,
        Format::AlphaNumeric,
        Format::Numeric,
        Format::Hexadecimal,
        Format::HexColor,
        Format::Rgb,
        Format::Rgba,
        Format::Hsl,
        Format::Hsla,
        Format::Email,
        Format::Cron,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Format::Alpha => "alpha",
            Format::AlphaNumeric => "alphaNumeric",
            Format::Numeric => "numeric",
            Format::Hexadecimal => "hexadecimal",
            Format::HexColor => "hexColor",
            Format::Rgb => "rgb",
            Format::Rgba => "rgba",
            Format::Hsl => "hsl",
            Format::Hsla => "hsla",
            Format::Email => "email",
            Format::Cron => "cron",
        }
    }
}

/// The closed set of rule kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Required,
    Format(Format),
    Min,
    Max,
    Length,
    MinLength,
    MaxLength,
    MatchPattern,
    OneOf,
    MemberOf,
    ExcludedFrom,
    MustContainAll,
    MustContainNone,
}

impl ConstraintKind {
    /// Every rule kind, in catalogue order
    pub const ALL: [ConstraintKind; 23] = [
        ConstraintKind::Required,
        ConstraintKind::Format(Format::Alpha),
        ConstraintKind::Format(Format::AlphaNumeric),
        ConstraintKind::Format(Format::Numeric),
        ConstraintKind::Format(Format::Hexadecimal),
        ConstraintKind::Format(Format::HexColor),
        ConstraintKind::Format(Format::Rgb),
        ConstraintKind::Format(Format::Rgba),
        ConstraintKind::Format(Format::Hsl),
        ConstraintKind::Format(Format::Hsla),
        ConstraintKind::Format(Format::Email),
        ConstraintKind::Format(Format::Cron),
        ConstraintKind::Min,
        ConstraintKind::Max,
        ConstraintKind::Length,
        ConstraintKind::MinLength,
        ConstraintKind::MaxLength,
        ConstraintKind::MatchPattern,
        ConstraintKind::OneOf,
        ConstraintKind::MemberOf,
        ConstraintKind::ExcludedFrom,
        ConstraintKind::MustContainAll,
        ConstraintKind::MustContainNone,
    ];

    /// Looks up a kind by its tag keyword (case-sensitive)
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            ConstraintKind::Required => "required",
            ConstraintKind::Format(format) => format.keyword(),
            ConstraintKind::Min => "min",
            ConstraintKind::Max => "max",
            ConstraintKind::Length => "length",
            ConstraintKind::MinLength => "minLength",
            ConstraintKind::MaxLength => "maxLength",
            ConstraintKind::MatchPattern => "matchPattern",
            ConstraintKind::OneOf => "oneOf",
            ConstraintKind::MemberOf => "memberOf",
            ConstraintKind::ExcludedFrom => "excludedFrom",
            ConstraintKind::MustContainAll => "mustContainAll",
            ConstraintKind::MustContainNone => "mustContainNone",
        }
    }

    /// One-line description used by the rule catalogue
    pub fn description(self) -> &'static str {
        match self {
            ConstraintKind::Required => "value must be present",
            ConstraintKind::Format(Format::Alpha) => "ASCII letters only",
            ConstraintKind::Format(Format::AlphaNumeric) => "ASCII letters and digits only",
            ConstraintKind::Format(Format::Numeric) => "signed decimal number",
            ConstraintKind::Format(Format::Hexadecimal) => "hexadecimal number, optional 0x prefix",
            ConstraintKind::Format(Format::HexColor) => "#rgb, #rgba, #rrggbb or #rrggbbaa color",
            ConstraintKind::Format(Format::Rgb) => "rgb(r, g, b) color",
            ConstraintKind::Format(Format::Rgba) => "rgba(r, g, b, a) color",
            ConstraintKind::Format(Format::Hsl) => "hsl(h, s%, l%) color",
            ConstraintKind::Format(Format::Hsla) => "hsla(h, s%, l%, a) color",
            ConstraintKind::Format(Format::Email) => "email address",
            ConstraintKind::Format(Format::Cron) => "cron expression",
            ConstraintKind::Min => "value must be strictly greater than the bound",
            ConstraintKind::Max => "value must not exceed the bound",
            ConstraintKind::Length => "character count must equal the parameter",
            ConstraintKind::MinLength => "character count must be at least the parameter",
            ConstraintKind::MaxLength => "character count must be at most the parameter",
            ConstraintKind::MatchPattern => "value must match the regular expression",
            ConstraintKind::OneOf => "value must be one of the listed strings",
            ConstraintKind::MemberOf => "every element must appear in the listed set",
            ConstraintKind::ExcludedFrom => "no element may appear in the listed set",
            ConstraintKind::MustContainAll => "list must contain every listed element",
            ConstraintKind::MustContainNone => "list must contain none of the listed elements",
        }
    }

    /// Shape of the parameter this kind expects
    pub fn param_kind(self) -> ParamKind {
        match self {
            ConstraintKind::Required | ConstraintKind::Format(_) => ParamKind::None,
            ConstraintKind::Min | ConstraintKind::Max => ParamKind::Bound,
            ConstraintKind::Length | ConstraintKind::MinLength | ConstraintKind::MaxLength => {
                ParamKind::Length
            }
            ConstraintKind::MatchPattern => ParamKind::Pattern,
            ConstraintKind::OneOf => ParamKind::StringSet,
            ConstraintKind::MemberOf
            | ConstraintKind::ExcludedFrom
            | ConstraintKind::MustContainAll
            | ConstraintKind::MustContainNone => ParamKind::ElementSet,
        }
    }

    /// Whether this kind can be evaluated against a field of `category`
    pub fn applies_to(self, category: ValueCategory) -> bool {
        match self {
            ConstraintKind::Required => true,
            ConstraintKind::Format(_)
            | ConstraintKind::Length
            | ConstraintKind::MinLength
            | ConstraintKind::MaxLength
            | ConstraintKind::MatchPattern
            | ConstraintKind::OneOf => category == ValueCategory::String,
            ConstraintKind::Min | ConstraintKind::Max => category.is_numeric(),
            ConstraintKind::MemberOf
            | ConstraintKind::ExcludedFrom
            | ConstraintKind::MustContainAll
            | ConstraintKind::MustContainNone => category.is_list(),
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl Serialize for ConstraintKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.keyword())
    }
}

/// A raw rule parameter with its first coerced value cached
#[derive(Debug, Clone)]
pub struct Parameter {
    raw: String,
    typed: OnceLock<(Target, Param)>,
}

impl Parameter {
    pub fn new(raw: impl Into<String>) -> Self {
        Parameter {
            raw: raw.into(),
            typed: OnceLock::new(),
        }
    }

    /// The parameter text exactly as written in the tag
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Coerces the parameter for `kind` on a field of `target`
    ///
    /// The first successful coercion is cached. A later request for a
    /// different target is coerced again without replacing the cache.
    pub fn typed(
        &self,
        kind: ConstraintKind,
        target: impl Into<Target>,
    ) -> Result<Param, RuleError> {
        let target = target.into();
        if let Some((cached, param)) = self.typed.get()
            && *cached == target
        {
            return Ok(param.clone());
        }

        let param = coerce(kind, target, &self.raw)?;
        let _ = self.typed.set((target, param.clone()));
        Ok(param)
    }

    /// Whether a coerced value is cached
    pub fn is_coerced(&self) -> bool {
        self.typed.get().is_some()
    }
}

/// One parsed rule
#[derive(Debug, Clone)]
pub struct Constraint {
    /// The rule kind
    pub kind: ConstraintKind,

    /// Present if and only if the rule text contained `=`
    pub parameter: Option<Parameter>,

    /// The rule text as written, for diagnostics
    pub rule: String,
}

impl Constraint {
    /// Parses a single rule such as `minLength=3` or `email`
    ///
    /// # Errors
    ///
    /// Returns `RuleError::UnknownKeyword` if the keyword is not part of the
    /// rule vocabulary. Parameters are never inspected here.
    pub fn parse(rule: &str) -> Result<Self, RuleError> {
        let (keyword, parameter) = match rule.split_once('=') {
            Some((keyword, parameter)) => (keyword, Some(parameter)),
            None => (rule, None),
        };
        let keyword = keyword.trim();

        let kind = ConstraintKind::from_keyword(keyword)
            .ok_or_else(|| RuleError::UnknownKeyword(keyword.to_string()))?;

        Ok(Constraint {
            kind,
            parameter: parameter.map(Parameter::new),
            rule: rule.to_string(),
        })
    }

    /// Resolves this rule's parameter for a field of `target`'s category
    ///
    /// Returns `Ok(None)` for parameterless kinds. The coerced value is
    /// computed once and reused on later calls.
    ///
    /// # Errors
    ///
    /// Returns `RuleError` if the kind does not apply to `category`, if a
    /// parameter is missing or unexpected, or if it cannot be coerced.
    pub fn resolve(&self, target: impl Into<Target>) -> Result<Option<Param>, RuleError> {
        let target = target.into();
        let category = target.category;
        if !self.kind.applies_to(category) {
            return Err(RuleError::Inapplicable {
                keyword: self.kind.keyword().to_string(),
                category,
            });
        }

        let takes_parameter = self.kind.param_kind() != ParamKind::None;
        match (&self.parameter, takes_parameter) {
            (None, false) => Ok(None),
            (None, true) => Err(RuleError::MissingParameter {
                keyword: self.kind.keyword().to_string(),
            }),
            (Some(parameter), false) => Err(RuleError::UnexpectedParameter {
                keyword: self.kind.keyword().to_string(),
                value: parameter.raw().to_string(),
            }),
            (Some(parameter), true) => parameter.typed(self.kind, target).map(Some),
        }
    }
}

/// Parses a rule tag into its rules, in declaration order
///
/// Empty segments (for example from a trailing `;`) are ignored.
///
/// # Errors
///
/// Returns the first `RuleError::UnknownKeyword` encountered.
pub fn parse_rules(tag: &str) -> Result<Vec<Constraint>, RuleError> {
    tag.split(';')
        .filter(|rule| !rule.trim().is_empty())
        .map(Constraint::parse)
        .collect()
}
