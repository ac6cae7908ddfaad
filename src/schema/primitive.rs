//! Boolean, literal, and enum schemas.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Issues};
use crate::path::IssuePath;

use super::traits::{value_type_name, SchemaLike};

/// A schema accepting only `true` or `false`.
#[derive(Clone, Default)]
pub struct BooleanSchema {
    type_error_message: Option<String>,
}

impl BooleanSchema {
    /// Creates a new boolean schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom type error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Validates a value against this schema.
    pub fn validate(&self, value: Option<&Value>, path: &IssuePath) -> Validation<bool, Issues> {
        match value {
            Some(Value::Bool(b)) => Validation::Success(*b),
            _ => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| "Expected boolean".to_string());
                Validation::Failure(Issues::single(
                    Issue::new(path.clone(), message)
                        .with_code("invalid_type")
                        .with_expected("boolean")
                        .with_got(value_type_name(value)),
                ))
            }
        }
    }
}

impl SchemaLike for BooleanSchema {
    type Output = bool;

    fn validate(&self, value: Option<&Value>, path: &IssuePath) -> Validation<bool, Issues> {
        self.validate(value, path)
    }

    fn validate_to_value(
        &self,
        value: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Value, Issues> {
        self.validate(value, path).map(Value::Bool)
    }
}

/// A schema accepting exactly one value.
///
/// Numbers compare by numeric value, so `Schema::literal(1)` accepts both
/// `1` and `1.0`. On success the literal itself is returned.
///
/// # Example
///
/// ```rust
/// use brm_validate::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::literal(1);
/// assert!(schema.safe_parse(&json!(1)).is_success());
///
/// let issues = schema.safe_parse(&json!(2)).into_result().unwrap_err();
/// assert_eq!(issues.first().message, "Expected 1");
/// ```
#[derive(Clone)]
pub struct LiteralSchema {
    expected: Value,
}

impl LiteralSchema {
    /// Creates a schema that accepts only `expected`.
    pub fn new(expected: impl Into<Value>) -> Self {
        Self {
            expected: expected.into(),
        }
    }

    /// Validates a value against this schema.
    pub fn validate(&self, value: Option<&Value>, path: &IssuePath) -> Validation<Value, Issues> {
        match value {
            Some(v) if literal_eq(v, &self.expected) => Validation::Success(self.expected.clone()),
            _ => {
                let rendered = render_literal(&self.expected);
                Validation::Failure(Issues::single(
                    Issue::new(path.clone(), format!("Expected {}", rendered))
                        .with_code("invalid_literal")
                        .with_expected(rendered)
                        .with_got(value.map_or_else(|| "undefined".to_string(), render_literal)),
                ))
            }
        }
    }
}

impl SchemaLike for LiteralSchema {
    type Output = Value;

    fn validate(&self, value: Option<&Value>, path: &IssuePath) -> Validation<Value, Issues> {
        self.validate(value, path)
    }

    fn validate_to_value(
        &self,
        value: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Value, Issues> {
        self.validate(value, path)
    }
}

fn literal_eq(value: &Value, expected: &Value) -> bool {
    match (value, expected) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => value == expected,
    }
}

/// Strings render bare; everything else renders as JSON.
fn render_literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A schema accepting one string out of a fixed set.
///
/// # Example
///
/// ```rust
/// use brm_validate::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let band = Schema::enum_(["lt_250k", "250k_500k", "500k_1m"]);
///
/// assert!(band.safe_parse(&json!("lt_250k")).is_success());
///
/// let issues = band.safe_parse(&json!("10m_plus")).into_result().unwrap_err();
/// assert_eq!(issues.first().message, "Invalid enum value");
/// ```
#[derive(Clone)]
pub struct EnumSchema {
    values: Vec<String>,
    message: Option<String>,
}

impl EnumSchema {
    /// Creates an enum schema over the given allowed values.
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            message: None,
        }
    }

    /// Sets a custom error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Returns the allowed values in declaration order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Validates a value against this schema.
    pub fn validate(&self, value: Option<&Value>, path: &IssuePath) -> Validation<String, Issues> {
        match value {
            Some(Value::String(s)) if self.values.iter().any(|v| v == s) => {
                Validation::Success(s.clone())
            }
            _ => {
                let message = self
                    .message
                    .clone()
                    .unwrap_or_else(|| "Invalid enum value".to_string());
                let got = match value {
                    Some(Value::String(s)) => format!("'{}'", s),
                    other => value_type_name(other).to_string(),
                };
                Validation::Failure(Issues::single(
                    Issue::new(path.clone(), message)
                        .with_code("invalid_enum_value")
                        .with_expected(format!("one of {}", self.values.join(" | ")))
                        .with_got(got),
                ))
            }
        }
    }
}

impl SchemaLike for EnumSchema {
    type Output = String;

    fn validate(&self, value: Option<&Value>, path: &IssuePath) -> Validation<String, Issues> {
        self.validate(value, path)
    }

    fn validate_to_value(
        &self,
        value: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Value, Issues> {
        self.validate(value, path).map(Value::String)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_boolean_is_strict() {
        let schema = BooleanSchema::new();
        assert!(schema.validate(Some(&json!(false)), &IssuePath::root()).is_success());
        assert!(schema.validate(Some(&json!(0)), &IssuePath::root()).is_failure());
        assert!(schema.validate(Some(&json!("true")), &IssuePath::root()).is_failure());
    }

    #[test]
    fn test_literal_numeric_equality() {
        let schema = LiteralSchema::new(1);
        let value = schema
            .validate(Some(&json!(1.0)), &IssuePath::root())
            .into_result()
            .unwrap();
        assert_eq!(value, json!(1));
    }

    #[test]
    fn test_literal_null_message() {
        let schema = LiteralSchema::new(Value::Null);
        let errors = schema
            .validate(Some(&json!("x")), &IssuePath::root())
            .into_result()
            .unwrap_err();
        assert_eq!(errors.first().message, "Expected null");
    }

    #[test]
    fn test_literal_string_renders_bare() {
        let schema = LiteralSchema::new("mentor");
        let errors = schema
            .validate(None, &IssuePath::root())
            .into_result()
            .unwrap_err();
        assert_eq!(errors.first().message, "Expected mentor");
        assert_eq!(errors.first().got, Some("undefined".to_string()));
    }

    #[test]
    fn test_enum_rejects_non_strings() {
        let schema = EnumSchema::new(["a", "b"]);
        let errors = schema
            .validate(Some(&json!(1)), &IssuePath::root())
            .into_result()
            .unwrap_err();
        assert_eq!(errors.first().code, "invalid_enum_value");
        assert_eq!(errors.first().got, Some("number".to_string()));
    }
}
