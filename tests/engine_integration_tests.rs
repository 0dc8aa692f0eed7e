//! Integration tests for the validation engine
//!
//! This test suite verifies the complete validation pipeline on compiled
//! records:
//! - Rule parsing and per-category evaluation
//! - Absence handling for optional fields
//! - Inline record splicing
//! - Naming conventions
//! - Configuration errors
//! - Report rendering

mod common;

use common::{TestResult, pairs};
use fieldcheck::rules::{ConstraintKind, Param, cached_rules};
use fieldcheck::{
    ConfigError, Field, FieldValue, NamingConvention, RuleError, Validate, ValidationReport,
    Validator, validate, validate_record,
};
use std::collections::HashMap;
use std::sync::Arc;

struct Member {
    name: String,
    status: String,
}

validate_record! {
    Member {
        name => "minLength=3",
        status => "oneOf=active,away",
    }
}

struct Applicant {
    age: i32,
}

validate_record! {
    Applicant {
        age => "min=17;max=35",
    }
}

#[test]
fn test_name_status_scenario() {
    let member = Member {
        name: "cc".to_string(),
        status: "away".to_string(),
    };

    let report = assert_some!(assert_ok!(validate(&member)));
    assert_eq!(report.len(), 1);

    let name = &report.fields_errors()[0];
    assert_eq!(name.field, "name");
    assert_eq!(name.record, "Member");
    assert_eq!(name.violations.len(), 1);
    assert_eq!(name.violations[0].kind, ConstraintKind::MinLength);
    assert_eq!(name.violations[0].parameter, Some(Param::Length(3)));
}

#[test]
fn test_age_within_bounds() {
    assert!(assert_ok!(validate(&Applicant { age: 18 })).is_none());
}

#[test]
fn test_age_bounds() {
    let kinds = |age| -> Vec<ConstraintKind> {
        match assert_ok!(validate(&Applicant { age })) {
            Some(report) => report.fields_errors()[0]
                .violations
                .iter()
                .map(|v| v.kind)
                .collect(),
            None => vec![],
        }
    };

    assert_eq!(kinds(17), vec![ConstraintKind::Min]);
    assert_eq!(kinds(18), vec![]);
    assert_eq!(kinds(35), vec![]);
    assert_eq!(kinds(36), vec![ConstraintKind::Max]);
}

struct Untagged {
    name: String,
    count: u64,
    tags: Vec<String>,
    nickname: Option<String>,
    meta: HashMap<String, String>,
}

validate_record! {
    Untagged {
        name,
        count,
        tags,
        nickname,
        opaque meta,
    }
}

#[test]
fn test_untagged_record_is_valid() {
    let record = Untagged {
        name: String::new(),
        count: 0,
        tags: vec![],
        nickname: None,
        meta: HashMap::new(),
    };
    assert!(assert_ok!(validate(&record)).is_none());
}

struct Bounded {
    code: String,
}

validate_record! {
    Bounded {
        code => "minLength=4;maxLength=4",
    }
}

#[test]
fn test_length_boundaries() {
    let violations = |code: &str| -> Vec<String> {
        let record = Bounded {
            code: code.to_string(),
        };
        assert_ok!(validate(&record))
            .map(|r| r.pairs().into_iter().map(|(_, k)| k).collect())
            .unwrap_or_default()
    };

    assert!(violations("abcd").is_empty());
    assert_eq!(violations("abc"), vec!["minLength"]);
    assert_eq!(violations("abcde"), vec!["maxLength"]);
}

#[test]
fn test_one_of_requires_exact_match() {
    for status in ["active", "away"] {
        let member = Member {
            name: "alice".into(),
            status: status.into(),
        };
        assert!(assert_ok!(validate(&member)).is_none());
    }

    for status in ["Active", "away ", "idle", ""] {
        let member = Member {
            name: "alice".into(),
            status: status.into(),
        };
        let report = assert_some!(assert_ok!(validate(&member)));
        assert_eq!(report.fields_errors()[0].violations[0].kind, ConstraintKind::OneOf);
    }
}

struct Contact {
    email: Option<String>,
    phone: Option<String>,
}

validate_record! {
    Contact {
        email => "required;email;maxLength=64",
        phone => "numeric;minLength=7",
    }
}

#[test]
fn test_absent_required_yields_single_violation() {
    let contact = Contact {
        email: None,
        phone: None,
    };
    let report = assert_some!(assert_ok!(validate(&contact)));

    assert_eq!(report.len(), 1);
    let email = assert_some!(report.field("email"));
    assert_eq!(email.violations.len(), 1);
    assert_eq!(email.violations[0].kind, ConstraintKind::Required);
    assert!(email.value.is_none());
}

#[test]
fn test_present_optional_is_evaluated() {
    let contact = Contact {
        email: Some("not-an-email".into()),
        phone: Some("12".into()),
    };
    let report = assert_some!(assert_ok!(validate(&contact)));
    assert_eq!(
        report.pairs(),
        pairs(&[("email", "email"), ("phone", "minLength")])
    );
}

struct Geo {
    lat: f64,
}

validate_record! {
    Geo {
        lat => "min=-90;max=90",
    }
}

struct Address {
    geo: Geo,
    zip: String,
}

validate_record! {
    Address {
        inline geo,
        zip => "numeric;length=5",
    }
}

struct Customer {
    id: String,
    address: Address,
    tier: String,
}

validate_record! {
    Customer {
        id => "hexadecimal",
        inline address,
        tier => "oneOf=gold,silver",
    }
}

#[test]
fn test_inline_reports_spliced_in_order() {
    let customer = Customer {
        id: "zz".into(),
        address: Address {
            geo: Geo { lat: 91.5 },
            zip: "1234".into(),
        },
        tier: "bronze".into(),
    };

    let report = assert_some!(assert_ok!(validate(&customer)));
    let fields: Vec<(&str, &str)> = report
        .iter()
        .map(|f| (f.field.as_str(), f.record.as_str()))
        .collect();
    assert_eq!(
        fields,
        vec![
            ("id", "Customer"),
            ("lat", "Geo"),
            ("zip", "Address"),
            ("tier", "Customer"),
        ]
    );
}

#[test]
fn test_two_level_violation_reaches_top() {
    let customer = Customer {
        id: "ff".into(),
        address: Address {
            geo: Geo { lat: -90.0 },
            zip: "12345".into(),
        },
        tier: "gold".into(),
    };

    let report = assert_some!(assert_ok!(validate(&customer)));
    assert_eq!(report.len(), 1);
    assert_eq!(report.fields_errors()[0].field, "lat");
    assert_eq!(report.fields_errors()[0].violations[0].kind, ConstraintKind::Min);
}

struct Account {
    user_name: String,
    roles: Vec<String>,
}

impl Validate for Account {
    fn record_name(&self) -> &str {
        "Account"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![
            Field::new("UserName", &self.user_name)
                .serialized_as("user")
                .with_rules("alpha"),
            Field::new("roles", &self.roles).with_rules("mustContainAll=viewer"),
        ]
    }
}

#[test]
fn test_naming_conventions() -> TestResult {
    let account = Account {
        user_name: "bob1".into(),
        roles: vec!["admin".into()],
    };

    let names = |naming| -> Result<Vec<String>, ConfigError> {
        let report = Validator::new(naming).validate(&account)?;
        Ok(report
            .map(|r| r.iter().map(|f| f.field.clone()).collect())
            .unwrap_or_default())
    };

    assert_eq!(names(NamingConvention::Verbatim)?, vec!["UserName", "roles"]);
    assert_eq!(names(NamingConvention::LowerCamel)?, vec!["userName", "roles"]);
    assert_eq!(names(NamingConvention::Serialized)?, vec!["user", "roles"]);
    Ok(())
}

#[test]
fn test_pointer_inputs() {
    let member = Box::new(Member {
        name: "cc".into(),
        status: "active".into(),
    });
    assert!(assert_ok!(validate(&member)).is_some());
    assert!(assert_ok!(validate(&&*member)).is_some());

    let missing: Option<&Member> = None;
    assert!(matches!(
        Validator::default().validate_optional(missing),
        Err(ConfigError::MissingRecord)
    ));
}

struct Misconfigured {
    name: String,
    score: u8,
}

validate_record! {
    Misconfigured {
        name => "alpha",
        score => "minLength=2",
    }
}

#[test]
fn test_config_error_aborts_call() {
    let record = Misconfigured {
        name: "123".into(),
        score: 1,
    };
    match validate(&record) {
        Err(ConfigError::InvalidRule {
            record,
            field,
            source: RuleError::Inapplicable { keyword, .. },
        }) => {
            assert_eq!(record, "Misconfigured");
            assert_eq!(field, "score");
            assert_eq!(keyword, "minLength");
        }
        other => panic!("expected inapplicable rule error, got {:?}", other),
    }
}

struct Tagged<'a> {
    value: i64,
    tag: &'a str,
}

impl Validate for Tagged<'_> {
    fn record_name(&self) -> &str {
        "Tagged"
    }

    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new("value", &self.value).with_rules(self.tag)]
    }
}

#[test]
fn test_config_errors_for_bad_tags() {
    let cases = [
        ("lengthy=3", "UnknownKeyword"),
        ("min", "MissingParameter"),
        ("required=1", "UnexpectedParameter"),
        ("max=ten", "InvalidParameter"),
        ("oneOf=a,b", "Inapplicable"),
    ];

    for (tag, expected) in cases {
        let err = match validate(&Tagged { value: 5, tag }) {
            Err(ConfigError::InvalidRule { source, .. }) => source,
            other => panic!("{tag}: expected rule error, got {:?}", other),
        };
        let name = match err {
            RuleError::UnknownKeyword(_) => "UnknownKeyword",
            RuleError::MissingParameter { .. } => "MissingParameter",
            RuleError::UnexpectedParameter { .. } => "UnexpectedParameter",
            RuleError::InvalidParameter { .. } => "InvalidParameter",
            RuleError::InvalidPattern { .. } => "InvalidPattern",
            RuleError::Inapplicable { .. } => "Inapplicable",
        };
        assert_eq!(name, expected, "tag {tag}");
    }
}

#[test]
fn test_tagged_opaque_field_is_config_error() {
    struct Settings {
        values: HashMap<String, i32>,
    }

    validate_record! {
        Settings {
            opaque values => "required",
        }
    }

    let settings = Settings {
        values: HashMap::new(),
    };
    match validate(&settings) {
        Err(ConfigError::UnsupportedType { field, type_name, .. }) => {
            assert_eq!(field, "values");
            assert!(type_name.contains("HashMap"));
        }
        other => panic!("expected unsupported type, got {:?}", other),
    }
}

#[test]
fn test_rendered_report_round_trip() {
    let customer = Customer {
        id: "xyz".into(),
        address: Address {
            geo: Geo { lat: 120.0 },
            zip: "abc".into(),
        },
        tier: "bronze".into(),
    };

    let report = assert_some!(assert_ok!(validate(&customer)));
    let rendered = report.render();
    assert_eq!(rendered, report.to_string());

    let mut recovered = ValidationReport::parse_rendered(&rendered);
    let mut original = report.pairs();
    recovered.sort();
    original.sort();
    assert_eq!(recovered, original);
    assert!(original.contains(&("zip".to_string(), "length".to_string())));
}

struct Memo {
    body: String,
    code: String,
}

validate_record! {
    Memo {
        body => "maxLength=8",
        code => "matchPattern=^x | kind: alpha$",
    }
}

#[test]
fn test_rendered_report_survives_hostile_text() {
    let memo = Memo {
        body: "long\nfield: ghost\nviolations: kind: email".into(),
        code: "zzz".into(),
    };

    let report = assert_some!(assert_ok!(validate(&memo)));
    let rendered = report.render();
    assert_eq!(rendered.lines().count(), 9);

    let recovered = ValidationReport::parse_rendered(&rendered);
    assert_eq!(recovered, pairs(&[("body", "maxLength"), ("code", "matchPattern")]));
    assert_eq!(recovered, report.pairs());
}

struct Scores {
    weights: Vec<f32>,
    ratio: f32,
}

validate_record! {
    Scores {
        weights => "memberOf=0.1,0.2",
        ratio => "max=0.1",
    }
}

#[test]
fn test_f32_fields_match_their_own_literals() -> TestResult {
    let exact = Scores {
        weights: vec![0.1, 0.2],
        ratio: 0.1,
    };
    assert!(validate(&exact)?.is_none());

    let off = Scores {
        weights: vec![0.1, 0.3],
        ratio: 0.2,
    };
    let report = assert_some!(validate(&off)?);
    assert_eq!(report.pairs(), pairs(&[("weights", "memberOf"), ("ratio", "max")]));

    let ratio = assert_some!(report.field("ratio"));
    assert_eq!(ratio.value, Some(FieldValue::Float32(0.2)));
    assert_eq!(ratio.violations[0].parameter, Some(Param::Float32(0.1)));
    Ok(())
}

#[test]
fn test_rule_tags_parsed_once_across_calls() -> TestResult {
    let member = Member {
        name: "cc".into(),
        status: "away".into(),
    };
    validate(&member)?;
    let first = cached_rules("minLength=3")?;
    validate(&member)?;
    let second = cached_rules("minLength=3")?;

    assert!(Arc::ptr_eq(&first, &second));
    let parameter = assert_some!(first[0].parameter.as_ref());
    assert!(parameter.is_coerced());
    Ok(())
}

#[test]
fn test_report_accessors() {
    assert!(ValidationReport::from_fields(vec![]).is_none());

    let member = Member {
        name: "cc".into(),
        status: "away".into(),
    };
    let report = assert_some!(assert_ok!(validate(&member)));
    assert!(!report.is_empty());
    assert_eq!(report.fields_errors().len(), 1);
    assert_eq!(report.fields_errors()[0].field, "name");
}

#[test]
fn test_check_folds_both_channels() {
    let member = Member {
        name: "cc".into(),
        status: "away".into(),
    };
    let err = Validator::default().check(&member).unwrap_err();
    assert!(err.report().is_some());
    assert!(err.to_string().contains("kind: minLength, param: 3"));

    let record = Misconfigured {
        name: "a".into(),
        score: 1,
    };
    let err = Validator::default().check(&record).unwrap_err();
    assert!(err.report().is_none());
}

#[test]
fn test_serialized_report_shape() {
    let member = Member {
        name: "cc".into(),
        status: "away".into(),
    };
    let report = assert_some!(assert_ok!(validate(&member)));
    let json = assert_ok!(serde_json::to_value(&report));
    assert_eq!(
        json,
        serde_json::json!({
            "fieldsErrors": [{
                "field": "name",
                "value": "cc",
                "record": "Member",
                "violations": [{"kind": "minLength", "parameter": 3}]
            }]
        })
    );
}

#[test]
fn test_validate_all_parallel_batch() {
    let members: Vec<Member> = (0..500)
        .map(|i| Member {
            name: if i % 5 == 0 { "x".into() } else { "valid".into() },
            status: "active".into(),
        })
        .collect();

    let results = Validator::default().validate_all(&members);
    assert_eq!(results.len(), 500);
    let invalid = results
        .iter()
        .enumerate()
        .filter(|(_, r)| matches!(r, Ok(Some(_))))
        .map(|(i, _)| i)
        .collect::<Vec<_>>();
    assert_eq!(invalid.len(), 100);
    assert!(invalid.iter().all(|i| i % 5 == 0));
}
