//! The user record and the validated input used to create or replace one.

use crate::error::AppError;
use crate::service::{as_integer, FieldKind, RequestValidator, ValidationRule};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

pub const NAME_MAX_LENGTH: usize = 100;
pub const EMAIL_MAX_LENGTH: usize = 254;
pub const AGE_MIN: i64 = 1;
pub const AGE_MAX: i64 = 150;

/// A stored user row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i64,
    pub created_at: DateTime<Utc>,
}

/// Body of a create or full-replace request, after validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserInput {
    #[schema(min_length = 1, max_length = 100)]
    pub name: String,
    #[schema(max_length = 254)]
    pub email: String,
    #[schema(minimum = 1, maximum = 150)]
    pub age: i64,
}

impl UserInput {
    pub fn rules() -> Vec<(&'static str, ValidationRule)> {
        vec![
            (
                "name",
                ValidationRule {
                    required: true,
                    kind: Some(FieldKind::String),
                    min_length: Some(1),
                    max_length: Some(NAME_MAX_LENGTH),
                    ..Default::default()
                },
            ),
            (
                "email",
                ValidationRule {
                    required: true,
                    kind: Some(FieldKind::String),
                    max_length: Some(EMAIL_MAX_LENGTH),
                    format: Some("email"),
                    ..Default::default()
                },
            ),
            (
                "age",
                ValidationRule {
                    required: true,
                    kind: Some(FieldKind::Integer),
                    minimum: Some(AGE_MIN as f64),
                    maximum: Some(AGE_MAX as f64),
                    ..Default::default()
                },
            ),
        ]
    }

    /// Validate a raw JSON body and build the input. Unknown keys are ignored.
    pub fn from_body(body: Value) -> Result<Self, AppError> {
        let Value::Object(map) = body else {
            return Err(AppError::invalid_field("body", "invalid_type", "body must be a JSON object"));
        };
        RequestValidator::validate(&map, &Self::rules())?;
        // Types are guaranteed by the rules above.
        let text = |key: &str| map.get(key).and_then(Value::as_str).unwrap_or_default();
        Ok(UserInput {
            name: text("name").trim().to_string(),
            email: text("email").to_string(),
            age: map.get("age").and_then(as_integer).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(err: AppError) -> Vec<String> {
        match err {
            AppError::Validation(v) => v.into_iter().map(|v| v.field).collect(),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn builds_input_from_valid_body() {
        let input = UserInput::from_body(json!({
            "name": "  John Doe ",
            "email": "john@example.com",
            "age": 25,
            "nickname": "JD"
        }))
        .unwrap();
        assert_eq!(
            input,
            UserInput {
                name: "John Doe".into(),
                email: "john@example.com".into(),
                age: 25,
            }
        );
    }

    #[test]
    fn missing_age_and_bad_email() {
        let err = UserInput::from_body(json!({"name": "John", "email": "invalid-email"})).unwrap_err();
        assert_eq!(fields(err), vec!["email", "age"]);
    }

    #[test]
    fn rejects_implausible_age() {
        for age in [0, -3, 151, 1000] {
            let err = UserInput::from_body(json!({"name": "A", "email": "a@example.com", "age": age})).unwrap_err();
            assert_eq!(fields(err), vec!["age"]);
        }
    }

    #[test]
    fn rejects_overlong_name() {
        let name = "x".repeat(NAME_MAX_LENGTH + 1);
        let err = UserInput::from_body(json!({"name": name, "email": "a@example.com", "age": 20})).unwrap_err();
        assert_eq!(fields(err), vec!["name"]);
    }

    #[test]
    fn non_object_body_is_a_validation_error() {
        let err = UserInput::from_body(json!([1, 2, 3])).unwrap_err();
        assert_eq!(fields(err), vec!["body"]);
    }

    #[test]
    fn whole_float_age_is_accepted() {
        let input = UserInput::from_body(json!({"name": "A", "email": "a@example.com", "age": 25.0})).unwrap();
        assert_eq!(input.age, 25);
    }

    #[test]
    fn user_serializes_flat() {
        let created_at = DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z").unwrap().with_timezone(&Utc);
        let user = User {
            id: 1,
            name: "John Doe".into(),
            email: "john@example.com".into(),
            age: 25,
            created_at,
        };
        let v = serde_json::to_value(&user).unwrap();
        assert_eq!(v["id"], 1);
        assert_eq!(v["name"], "John Doe");
        assert_eq!(v["created_at"], "2024-01-02T03:04:05Z");
    }
}
