//! String schema validation.
//!
//! This module provides [`StringSchema`] for validating string values with
//! length and regex constraints.

use regex::Regex;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Issues};
use crate::path::IssuePath;

use super::traits::{value_type_name, SchemaLike};

/// A constraint applied to string values.
#[derive(Clone)]
enum StringConstraint {
    MinLength {
        min: usize,
        message: Option<String>,
    },
    MaxLength {
        max: usize,
        message: Option<String>,
    },
    Pattern {
        regex: Regex,
        message: Option<String>,
    },
}

/// A schema for validating string values.
///
/// Constraints run in declaration order after the type check, and the first
/// violated constraint is the one reported, so a string schema yields at most
/// one issue per value.
///
/// # Example
///
/// ```rust
/// use brm_validate::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::string()
///     .min_len(1)
///     .error("Core promise is required")
///     .max_len(120)
///     .error("Core promise must be 120 characters or fewer");
///
/// let result = schema.safe_parse(&json!(""));
/// let issues = result.into_result().unwrap_err();
/// assert_eq!(issues.first().message, "Core promise is required");
/// ```
#[derive(Clone)]
pub struct StringSchema {
    constraints: Vec<StringConstraint>,
    type_error_message: Option<String>,
}

impl StringSchema {
    /// Creates a new string schema with no constraints.
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    /// Adds a minimum length constraint, counted in Unicode scalar values.
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints
            .push(StringConstraint::MinLength { min, message: None });
        self
    }

    /// Adds a maximum length constraint, counted in Unicode scalar values.
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints
            .push(StringConstraint::MaxLength { max, message: None });
        self
    }

    /// Adds a regex pattern constraint.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brm_validate::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::string().pattern(r"^\d{5}$").unwrap();
    ///
    /// assert!(schema.safe_parse(&json!("90210")).is_success());
    /// assert!(schema.safe_parse(&json!("9021")).is_failure());
    /// ```
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        self.constraints.push(StringConstraint::Pattern {
            regex,
            message: None,
        });
        Ok(self)
    }

    /// Sets a custom error message for the most recent constraint.
    ///
    /// If no constraints have been added yet, this sets the type error message
    /// (used when the value is not a string).
    pub fn error(mut self, message: impl Into<String>) -> Self {
        match self.constraints.last_mut() {
            Some(StringConstraint::MinLength { message: m, .. })
            | Some(StringConstraint::MaxLength { message: m, .. })
            | Some(StringConstraint::Pattern { message: m, .. }) => *m = Some(message.into()),
            None => self.type_error_message = Some(message.into()),
        }
        self
    }

    /// Validates a value against this schema.
    pub fn validate(&self, value: Option<&Value>, path: &IssuePath) -> Validation<String, Issues> {
        let s = match value {
            Some(Value::String(s)) => s,
            _ => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| "Expected string".to_string());
                return Validation::Failure(Issues::single(
                    Issue::new(path.clone(), message)
                        .with_code("invalid_type")
                        .with_expected("string")
                        .with_got(value_type_name(value)),
                ));
            }
        };

        match self
            .constraints
            .iter()
            .find_map(|c| check_constraint(c, s, path))
        {
            Some(issue) => Validation::Failure(Issues::single(issue)),
            None => Validation::Success(s.clone()),
        }
    }
}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for StringSchema {
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

/// Checks a single constraint and returns an issue if it fails.
fn check_constraint(constraint: &StringConstraint, value: &str, path: &IssuePath) -> Option<Issue> {
    match constraint {
        StringConstraint::MinLength { min, message } => {
            let len = value.chars().count();
            if len >= *min {
                return None;
            }
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("String must contain at least {} character(s)", min));
            Some(
                Issue::new(path.clone(), msg)
                    .with_code("too_small")
                    .with_expected(format!("at least {} characters", min))
                    .with_got(format!("{} characters", len)),
            )
        }
        StringConstraint::MaxLength { max, message } => {
            let len = value.chars().count();
            if len <= *max {
                return None;
            }
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("String must contain at most {} character(s)", max));
            Some(
                Issue::new(path.clone(), msg)
                    .with_code("too_big")
                    .with_expected(format!("at most {} characters", max))
                    .with_got(format!("{} characters", len)),
            )
        }
        StringConstraint::Pattern { regex, message } => {
            if regex.is_match(value) {
                return None;
            }
            let msg = message
                .clone()
                .unwrap_or_else(|| format!("String must match pattern '{}'", regex.as_str()));
            Some(
                Issue::new(path.clone(), msg)
                    .with_code("invalid_string")
                    .with_expected(format!("string matching '{}'", regex.as_str()))
                    .with_got(value.to_string()),
            )
        }
    }
}
