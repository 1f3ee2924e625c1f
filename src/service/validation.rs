//! Request validation from per-field rules.

use crate::error::{AppError, FieldViolation};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// JSON type a field must carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
}

#[derive(Clone, Debug, Default)]
pub struct ValidationRule {
    pub required: bool,
    pub kind: Option<FieldKind>,
    /// Lengths are counted in characters after trimming surrounding whitespace.
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub format: Option<&'static str>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate body against per-field rules. Every violation is reported, in rule order.
    pub fn validate(body: &Map<String, Value>, rules: &[(&str, ValidationRule)]) -> Result<(), AppError> {
        let mut violations = Vec::new();
        for (field, rule) in rules {
            match body.get(*field) {
                None | Some(Value::Null) => {
                    if rule.required {
                        violations.push(FieldViolation::new(
                            *field,
                            "missing_field",
                            format!("{} is required", field),
                        ));
                    }
                }
                Some(v) => {
                    if let Some(violation) = validate_field(field, v, rule) {
                        violations.push(violation);
                    }
                }
            }
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(violations))
        }
    }
}

/// Integer value of `v`. Floats with no fractional part count, so `25.0` reads as 25.
pub fn as_integer(v: &Value) -> Option<i64> {
    if let Some(n) = v.as_i64() {
        return Some(n);
    }
    let f = v.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// First rule broken by `v`, if any.
fn validate_field(field: &str, v: &Value, rule: &ValidationRule) -> Option<FieldViolation> {
    let fail = |code: &'static str, message: String| Some(FieldViolation::new(field, code, message));

    match rule.kind {
        Some(FieldKind::String) if !v.is_string() => {
            return fail("invalid_type", format!("{} must be a string", field));
        }
        Some(FieldKind::Integer) if as_integer(v).is_none() => {
            return fail("invalid_type", format!("{} must be an integer", field));
        }
        _ => {}
    }
    if let Some(s) = v.as_str() {
        let len = s.trim().chars().count();
        if let Some(min) = rule.min_length {
            if len < min {
                let message = if min == 1 {
                    format!("{} must not be empty", field)
                } else {
                    format!("{} must be at least {} characters", field, min)
                };
                return fail("too_short", message);
            }
        }
        if let Some(max) = rule.max_length {
            if len > max {
                return fail("too_long", format!("{} must be at most {} characters", field, max));
            }
        }
        if let Some(format) = rule.format {
            if !matches_format(s, format) {
                return fail("invalid_format", format!("{} must be a valid {} address", field, format));
            }
        }
    }
    if let Some(n) = v.as_f64() {
        if let Some(min) = rule.minimum {
            if n < min {
                return fail("out_of_range", format!("{} must be at least {}", field, min));
            }
        }
        if let Some(max) = rule.maximum {
            if n > max {
                return fail("out_of_range", format!("{} must be at most {}", field, max));
            }
        }
    }
    None
}

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| {
            Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$").ok()
        })
        .as_ref()
}

fn matches_format(s: &str, format: &str) -> bool {
    match format {
        "email" => {
            email_regex().is_some_and(|re| re.is_match(s)) && !s.starts_with('.') && !s.contains("..")
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rules() -> Vec<(&'static str, ValidationRule)> {
        vec![
            (
                "name",
                ValidationRule {
                    required: true,
                    kind: Some(FieldKind::String),
                    min_length: Some(1),
                    max_length: Some(5),
                    ..Default::default()
                },
            ),
            (
                "email",
                ValidationRule {
                    required: true,
                    kind: Some(FieldKind::String),
                    format: Some("email"),
                    ..Default::default()
                },
            ),
            (
                "age",
                ValidationRule {
                    required: false,
                    kind: Some(FieldKind::Integer),
                    minimum: Some(1.0),
                    maximum: Some(150.0),
                    ..Default::default()
                },
            ),
        ]
    }

    fn violations(body: Value) -> Vec<FieldViolation> {
        let map = body.as_object().cloned().unwrap();
        match RequestValidator::validate(&map, &rules()) {
            Ok(()) => Vec::new(),
            Err(AppError::Validation(v)) => v,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn accepts_valid_body() {
        assert!(violations(json!({"name": "Ann", "email": "ann@example.com", "age": 30})).is_empty());
    }

    #[test]
    fn optional_fields_may_be_absent_or_null() {
        assert!(violations(json!({"name": "Ann", "email": "ann@example.com", "age": null})).is_empty());
    }

    #[test]
    fn reports_all_missing_fields() {
        let v = violations(json!({}));
        let fields: Vec<_> = v.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email"]);
        assert!(v.iter().all(|v| v.code == "missing_field"));
    }

    #[test]
    fn whitespace_only_string_is_too_short() {
        let v = violations(json!({"name": "   ", "email": "ann@example.com"}));
        assert_eq!(v[0].code, "too_short");
        assert_eq!(v[0].message, "name must not be empty");
    }

    #[test]
    fn length_counts_characters() {
        assert!(violations(json!({"name": "Zoë", "email": "z@example.com"})).is_empty());
        let v = violations(json!({"name": "abcdef", "email": "z@example.com"}));
        assert_eq!(v[0].code, "too_long");
    }

    #[test]
    fn type_mismatch_is_reported_before_other_rules() {
        let v = violations(json!({"name": 12, "email": "ann@example.com", "age": "old"}));
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].code, "invalid_type");
        assert_eq!(v[1].field, "age");
        assert_eq!(v[1].message, "age must be an integer");
    }

    #[test]
    fn fractional_numbers_are_not_integers() {
        let v = violations(json!({"name": "Ann", "email": "ann@example.com", "age": 25.5}));
        assert_eq!(v[0].code, "invalid_type");
    }

    #[test]
    fn range_is_inclusive() {
        assert!(violations(json!({"name": "Ann", "email": "a@example.com", "age": 1})).is_empty());
        assert!(violations(json!({"name": "Ann", "email": "a@example.com", "age": 150})).is_empty());
        assert_eq!(violations(json!({"name": "Ann", "email": "a@example.com", "age": 0}))[0].code, "out_of_range");
        assert_eq!(violations(json!({"name": "Ann", "email": "a@example.com", "age": 151}))[0].code, "out_of_range");
    }

    #[test]
    fn whole_floats_count_as_integers() {
        assert!(violations(json!({"name": "Ann", "email": "a@example.com", "age": 25.0})).is_empty());
        assert_eq!(as_integer(&json!(25.0)), Some(25));
        assert_eq!(as_integer(&json!(25.5)), None);
        assert_eq!(as_integer(&json!("25")), None);
        assert_eq!(as_integer(&json!(1e300)), None);
    }

    #[test]
    fn email_format() {
        for ok in ["john@example.com", "first.last+tag@sub.example.co.uk", "a_b@x-y.io"] {
            assert!(matches_format(ok, "email"), "{ok} should be accepted");
        }
        for bad in [
            "not-an-email",
            "invalid-email",
            "@example.com",
            "john@",
            "john@example",
            "john doe@example.com",
            "john@@example.com",
            "john..doe@example.com",
            ".john@example.com",
            "john@-example.com",
        ] {
            assert!(!matches_format(bad, "email"), "{bad} should be rejected");
        }
    }
}
