#![forbid(unsafe_code)]

//! Process-wide cache of parsed rule tags
//!
//! Tags are static per field, so each distinct tag is parsed once and its
//! [`Constraint`]s are shared by every later validation. Coerced parameters
//! live inside the shared constraints and are reused the same way. Tags that
//! fail to parse are not cached.

use crate::error::RuleError;
use crate::rules::grammar::{Constraint, parse_rules};
use dashmap::DashMap;
use std::sync::{Arc, LazyLock};
use tracing::trace;

static CACHE: LazyLock<DashMap<String, Arc<[Constraint]>>> = LazyLock::new(DashMap::new);

/// Parses `tag`, or returns the constraints parsed for it earlier
///
/// # Errors
///
/// Returns the `RuleError` from [`parse_rules`] for a malformed tag.
pub fn cached_rules(tag: &str) -> Result<Arc<[Constraint]>, RuleError> {
    if let Some(constraints) = CACHE.get(tag) {
        return Ok(Arc::clone(constraints.value()));
    }

    let parsed: Arc<[Constraint]> = parse_rules(tag)?.into();
    trace!(tag, rules = parsed.len(), "caching rule tag");
    let entry = CACHE.entry(tag.to_string()).or_insert(parsed);
    Ok(Arc::clone(entry.value()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{ConstraintKind, Param};
    use crate::types::ValueCategory;

    #[test]
    fn test_same_tag_shares_constraints() {
        let first = cached_rules("minLength=2;matchPattern=^cache-[0-9]+$").unwrap();
        let second = cached_rules("minLength=2;matchPattern=^cache-[0-9]+$").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first[1].kind, ConstraintKind::MatchPattern);
    }

    #[test]
    fn test_coerced_parameter_outlives_the_call() {
        let tag = "matchPattern=^outlives-[a-z]+$";
        let resolved = cached_rules(tag).unwrap()[0]
            .resolve(ValueCategory::String)
            .unwrap();
        assert!(matches!(resolved, Some(Param::Pattern(_))));

        let again = cached_rules(tag).unwrap();
        let parameter = again[0].parameter.as_ref().unwrap();
        assert!(parameter.is_coerced());
    }

    #[test]
    fn test_bad_tag_is_not_cached() {
        assert!(cached_rules("cacheless").is_err());
        assert!(!CACHE.contains_key("cacheless"));
    }
}
