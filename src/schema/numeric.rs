//! Numeric schema validation.
//!
//! This module provides [`NumberSchema`] for validating finite JSON numbers
//! with bound and sign constraints.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Issues};
use crate::path::IssuePath;

use super::traits::{value_type_name, SchemaLike};

/// A constraint applied to numeric values.
#[derive(Clone)]
enum NumberConstraint {
    Min { value: f64, message: Option<String> },
    Max { value: f64, message: Option<String> },
    Positive { message: Option<String> },
    NonNegative { message: Option<String> },
}

/// A schema for validating numbers.
///
/// Integers and floats are both accepted; the output is an `f64`. As with
/// strings, the first violated constraint is the one reported.
///
/// # Example
///
/// ```rust
/// use brm_validate::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::number()
///     .non_negative()
///     .error("Average transaction value must be a nonnegative number");
///
/// assert!(schema.safe_parse(&json!(250)).is_success());
/// assert!(schema.safe_parse(&json!(-5)).is_failure());
/// ```
#[derive(Clone)]
pub struct NumberSchema {
    constraints: Vec<NumberConstraint>,
    type_error_message: Option<String>,
}

impl NumberSchema {
    /// Creates a new number schema with no constraints.
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    /// Adds an inclusive lower bound.
    pub fn min(mut self, value: f64) -> Self {
        self.constraints.push(NumberConstraint::Min {
            value,
            message: None,
        });
        self
    }

    /// Adds an inclusive upper bound.
    pub fn max(mut self, value: f64) -> Self {
        self.constraints.push(NumberConstraint::Max {
            value,
            message: None,
        });
        self
    }

    /// Requires the number to be greater than 0.
    pub fn positive(mut self) -> Self {
        self.constraints
            .push(NumberConstraint::Positive { message: None });
        self
    }

    /// Requires the number to be greater than or equal to 0.
    ///
    /// ```rust
    /// use brm_validate::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::number().non_negative();
    ///
    /// assert!(schema.safe_parse(&json!(0)).is_success());
    /// assert!(schema.safe_parse(&json!(-0.01)).is_failure());
    /// ```
    pub fn non_negative(mut self) -> Self {
        self.constraints
            .push(NumberConstraint::NonNegative { message: None });
        self
    }

    /// Sets a custom error message for the most recent constraint.
    ///
    /// If no constraints have been added yet, this sets the type error message
    /// (used when the value is not a number).
    pub fn error(mut self, message: impl Into<String>) -> Self {
        match self.constraints.last_mut() {
            Some(NumberConstraint::Min { message: m, .. })
            | Some(NumberConstraint::Max { message: m, .. })
            | Some(NumberConstraint::Positive { message: m })
            | Some(NumberConstraint::NonNegative { message: m }) => *m = Some(message.into()),
            None => self.type_error_message = Some(message.into()),
        }
        self
    }

    /// Validates a value against this schema.
    pub fn validate(&self, value: Option<&Value>, path: &IssuePath) -> Validation<f64, Issues> {
        let n = match value.and_then(Value::as_f64).filter(|n| n.is_finite()) {
            Some(n) => n,
            None => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| "Expected number".to_string());
                return Validation::Failure(Issues::single(
                    Issue::new(path.clone(), message)
                        .with_code("invalid_type")
                        .with_expected("number")
                        .with_got(value_type_name(value)),
                ));
            }
        };

        match self
            .constraints
            .iter()
            .find_map(|c| check_constraint(c, n, path))
        {
            Some(issue) => Validation::Failure(Issues::single(issue)),
            None => Validation::Success(n),
        }
    }
}

impl Default for NumberSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for NumberSchema {
    type Output = f64;

    fn validate(&self, value: Option<&Value>, path: &IssuePath) -> Validation<f64, Issues> {
        self.validate(value, path)
    }

    // The input number is passed through as-is so integers stay integers.
    fn validate_to_value(
        &self,
        value: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Value, Issues> {
        self.validate(value, path)
            .map(|n| value.cloned().unwrap_or_else(|| Value::from(n)))
    }
}

fn check_constraint(constraint: &NumberConstraint, n: f64, path: &IssuePath) -> Option<Issue> {
    let (ok, message, default_message, code, expected) = match constraint {
        NumberConstraint::Min { value, message } => (
            n >= *value,
            message,
            format!("Number must be greater than or equal to {}", value),
            "too_small",
            format!("value >= {}", value),
        ),
        NumberConstraint::Max { value, message } => (
            n <= *value,
            message,
            format!("Number must be less than or equal to {}", value),
            "too_big",
            format!("value <= {}", value),
        ),
        NumberConstraint::Positive { message } => (
            n > 0.0,
            message,
            "Number must be greater than 0".to_string(),
            "too_small",
            "value > 0".to_string(),
        ),
        NumberConstraint::NonNegative { message } => (
            n >= 0.0,
            message,
            "Number must be greater than or equal to 0".to_string(),
            "too_small",
            "value >= 0".to_string(),
        ),
    };

    if ok {
        return None;
    }
    Some(
        Issue::new(path.clone(), message.clone().unwrap_or(default_message))
            .with_code(code)
            .with_expected(expected)
            .with_got(n.to_string()),
    )
}
