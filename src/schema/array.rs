//! Array schema validation.
//!
//! This module provides [`ArraySchema`] for validating arrays element by
//! element, with length constraints checked once every element is valid.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Issues};
use crate::path::IssuePath;

use super::traits::{finish, value_type_name, SchemaLike};

/// A constraint applied to the array as a whole.
enum ArrayConstraint {
    Length { len: usize, message: Option<String> },
    MinLength { min: usize, message: Option<String> },
    MaxLength { max: usize, message: Option<String> },
}

/// A schema for validating arrays.
///
/// Each element is validated at its index-extended path and all element
/// issues are collected. Length constraints are only checked when every
/// element succeeded, and then report a single issue at the array's own path.
///
/// # Example
///
/// ```rust
/// use brm_validate::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::array(Schema::number().non_negative())
///     .length(3)
///     .error("Exactly three offers are required");
///
/// assert!(schema.safe_parse(&json!([1, 2, 3])).is_success());
///
/// // Two bad elements, two issues; the length check is skipped
/// let issues = schema.safe_parse(&json!([-1, 2, -3, 4])).into_result().unwrap_err();
/// let paths: Vec<_> = issues.iter().map(|i| i.path.to_string()).collect();
/// assert_eq!(paths, vec!["0", "2"]);
/// ```
pub struct ArraySchema<S> {
    item_schema: S,
    constraints: Vec<ArrayConstraint>,
    type_error_message: Option<String>,
}

impl<S: SchemaLike> ArraySchema<S> {
    /// Creates a new array schema with the given item schema.
    pub fn new(item_schema: S) -> Self {
        Self {
            item_schema,
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    /// Requires exactly `len` elements.
    pub fn length(mut self, len: usize) -> Self {
        self.constraints
            .push(ArrayConstraint::Length { len, message: None });
        self
    }

    /// Requires at least `min` elements.
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints
            .push(ArrayConstraint::MinLength { min, message: None });
        self
    }

    /// Requires at most `max` elements.
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints
            .push(ArrayConstraint::MaxLength { max, message: None });
        self
    }

    /// Requires at least one element.
    pub fn non_empty(self) -> Self {
        self.min_len(1)
    }

    /// Sets a custom error message for the most recent constraint.
    ///
    /// If no constraints have been added yet, this sets the type error message
    /// (used when the value is not an array).
    pub fn error(mut self, message: impl Into<String>) -> Self {
        match self.constraints.last_mut() {
            Some(ArrayConstraint::Length { message: m, .. })
            | Some(ArrayConstraint::MinLength { message: m, .. })
            | Some(ArrayConstraint::MaxLength { message: m, .. }) => *m = Some(message.into()),
            None => self.type_error_message = Some(message.into()),
        }
        self
    }

    /// Validates a value against this schema.
    pub fn validate(
        &self,
        value: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Vec<S::Output>, Issues> {
        self.validate_items(value, path, |schema, item, item_path| {
            schema.validate(item, item_path)
        })
    }

    /// Shared walk for typed and JSON output: type check, every element,
    /// then the length constraints.
    fn validate_items<T, F>(
        &self,
        value: Option<&Value>,
        path: &IssuePath,
        validate_item: F,
    ) -> Validation<Vec<T>, Issues>
    where
        F: Fn(&S, Option<&Value>, &IssuePath) -> Validation<T, Issues>,
    {
        let arr = match value {
            Some(Value::Array(a)) => a,
            _ => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| "Expected array".to_string());
                return Validation::Failure(Issues::single(
                    Issue::new(path.clone(), message)
                        .with_code("invalid_type")
                        .with_expected("array")
                        .with_got(value_type_name(value)),
                ));
            }
        };

        let mut issues = Vec::new();
        let mut validated_items = Vec::with_capacity(arr.len());
        for (index, item) in arr.iter().enumerate() {
            let item_path = path.push_index(index);
            match validate_item(&self.item_schema, Some(item), &item_path) {
                Validation::Success(v) => validated_items.push(v),
                Validation::Failure(e) => issues.extend(e),
            }
        }

        if issues.is_empty() {
            if let Some(issue) = self
                .constraints
                .iter()
                .find_map(|c| check_length(c, validated_items.len(), path))
            {
                issues.push(issue);
            }
        }

        finish(validated_items, issues)
    }
}

impl<S: SchemaLike> SchemaLike for ArraySchema<S> {
    type Output = Vec<S::Output>;

    fn validate(
        &self,
        value: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Self::Output, Issues> {
        self.validate(value, path)
    }

    fn validate_to_value(
        &self,
        value: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Value, Issues> {
        self.validate_items(value, path, |schema, item, item_path| {
            schema.validate_to_value(item, item_path)
        })
        .map(Value::Array)
    }
}

fn check_length(constraint: &ArrayConstraint, len: usize, path: &IssuePath) -> Option<Issue> {
    let (ok, message, default_message, code, expected) = match constraint {
        ArrayConstraint::Length { len: want, message } => (
            len == *want,
            message,
            format!("Array must contain exactly {} element(s)", want),
            if len < *want { "too_small" } else { "too_big" },
            format!("exactly {} items", want),
        ),
        ArrayConstraint::MinLength { min, message } => (
            len >= *min,
            message,
            format!("Array must contain at least {} element(s)", min),
            "too_small",
            format!("at least {} items", min),
        ),
        ArrayConstraint::MaxLength { max, message } => (
            len <= *max,
            message,
            format!("Array must contain at most {} element(s)", max),
            "too_big",
            format!("at most {} items", max),
        ),
    };

    if ok {
        return None;
    }
    Some(
        Issue::new(path.clone(), message.clone().unwrap_or(default_message))
            .with_code(code)
            .with_expected(expected)
            .with_got(format!("{} items", len)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{NumberSchema, StringSchema};
    use serde_json::json;

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_typed_output() {
        let schema = ArraySchema::new(StringSchema::new());
        let items = schema
            .validate(Some(&json!(["a", "b"])), &IssuePath::root())
            .into_result()
            .unwrap();
        assert_eq!(items, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_rejects_non_arrays() {
        let schema = ArraySchema::new(StringSchema::new());
        let errors = unwrap_failure(schema.validate(Some(&json!({"0": "a"})), &IssuePath::root()));
        assert_eq!(errors.first().message, "Expected array");
        assert_eq!(errors.first().got, Some("object".to_string()));
    }

    #[test]
    fn test_length_issue_sits_at_array_path() {
        let schema = ArraySchema::new(NumberSchema::new()).length(3);
        let path = IssuePath::root().push_key("offers");

        let errors = unwrap_failure(schema.validate(Some(&json!([1, 2])), &path));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().path, path);
        assert_eq!(errors.first().message, "Array must contain exactly 3 element(s)");
        assert_eq!(errors.first().code, "too_small");
    }

    #[test]
    fn test_min_max_len() {
        let schema = ArraySchema::new(NumberSchema::new()).min_len(1).max_len(2);

        assert!(schema.validate(Some(&json!([1])), &IssuePath::root()).is_success());
        assert!(schema.validate(Some(&json!([])), &IssuePath::root()).is_failure());
        assert!(schema.validate(Some(&json!([1, 2, 3])), &IssuePath::root()).is_failure());
    }

    #[test]
    fn test_non_empty() {
        let schema = ArraySchema::new(NumberSchema::new()).non_empty().error("add at least one");
        let errors = unwrap_failure(schema.validate(Some(&json!([])), &IssuePath::root()));
        assert_eq!(errors.first().message, "add at least one");
    }
}
