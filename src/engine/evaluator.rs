#![forbid(unsafe_code)]

//! Constraint evaluation against a present value
//!
//! Each rule is resolved for the value's category (which validates and
//! coerces its parameter) and then checked with the predicate for that
//! category. Every rule is evaluated; violations are returned in rule order.
//! `f32` values are compared against `f32` parameters.

use crate::error::RuleError;
use crate::record::Value;
use crate::report::Violation;
use crate::rules::{Constraint, ConstraintKind, Param, registry};

/// Evaluates `constraints` against a present `value`
///
/// `required` never fails here: absence is handled by the caller before a
/// value exists.
///
/// # Errors
///
/// Returns the first `RuleError` raised while resolving a rule. Rules after
/// it are not evaluated.
pub fn evaluate(constraints: &[Constraint], value: &Value<'_>) -> Result<Vec<Violation>, RuleError> {
    let target = value.target();
    let mut violations = Vec::new();

    for constraint in constraints {
        let parameter = constraint.resolve(target)?;
        if violates(constraint.kind, parameter.as_ref(), value) {
            violations.push(Violation::new(constraint.kind, parameter));
        }
    }

    Ok(violations)
}

fn violates(kind: ConstraintKind, parameter: Option<&Param>, value: &Value<'_>) -> bool {
    use ConstraintKind as K;

    match (kind, parameter, value) {
        (K::Required, _, _) => false,

        (K::Format(format), None, Value::Str(s)) => !registry().is_match(format, s),
        (K::Length, Some(Param::Length(n)), Value::Str(s)) => s.chars().count() != *n,
        (K::MinLength, Some(Param::Length(n)), Value::Str(s)) => s.chars().count() < *n,
        (K::MaxLength, Some(Param::Length(n)), Value::Str(s)) => s.chars().count() > *n,
        (K::MatchPattern, Some(Param::Pattern(re)), Value::Str(s)) => !re.is_match(s),
        (K::OneOf, Some(Param::Strings(set)), Value::Str(s)) => !is_member(set, s),

        (K::Min, Some(Param::Signed(min)), Value::Signed(v)) => v <= min,
        (K::Min, Some(Param::Unsigned(min)), Value::Unsigned(v)) => v <= min,
        (K::Min, Some(Param::Float(min)), Value::Float(v)) => v <= min,
        (K::Min, Some(Param::Float32(min)), Value::Float32(v)) => v <= min,
        (K::Max, Some(Param::Signed(max)), Value::Signed(v)) => v > max,
        (K::Max, Some(Param::Unsigned(max)), Value::Unsigned(v)) => v > max,
        (K::Max, Some(Param::Float(max)), Value::Float(v)) => v > max,
        (K::Max, Some(Param::Float32(max)), Value::Float32(v)) => v > max,

        (_, Some(Param::Strings(set)), Value::StrList(items)) => list_violates(kind, items, set),
        (_, Some(Param::SignedSet(set)), Value::SignedList(items)) => list_violates(kind, items, set),
        (_, Some(Param::UnsignedSet(set)), Value::UnsignedList(items)) => {
            list_violates(kind, items, set)
        }
        (_, Some(Param::FloatSet(set)), Value::FloatList(items)) => list_violates(kind, items, set),
        (_, Some(Param::Float32Set(set)), Value::Float32List(items)) => {
            list_violates(kind, items, set)
        }

        // Unreachable after a successful resolve: parameters are coerced for
        // the value's own category.
        _ => false,
    }
}

fn list_violates<E, P>(kind: ConstraintKind, elements: &[E], set: &[P]) -> bool
where
    E: PartialEq<P>,
    P: PartialEq<E>,
{
    match kind {
        ConstraintKind::MemberOf => !elements.iter().all(|e| is_member(set, e)),
        ConstraintKind::ExcludedFrom => elements.iter().any(|e| is_member(set, e)),
        ConstraintKind::MustContainAll => !set.iter().all(|p| is_member(elements, p)),
        ConstraintKind::MustContainNone => set.iter().any(|p| is_member(elements, p)),
        _ => false,
    }
}

fn is_member<A: PartialEq<B>, B: ?Sized>(set: &[A], item: &B) -> bool {
    set.iter().any(|candidate| candidate == item)
}
