//! Schema combinators for composing validation logic.
//!
//! - [`UnionSchema`]: the first matching branch wins (`union`, `or`)
//! - [`Nullable`]: an explicit `null` is accepted
//! - [`Decode`]: the validated JSON is deserialized into a typed record
//!
//! # Example
//!
//! ```rust
//! use brm_validate::{Schema, SchemaExt, SchemaLike};
//! use serde_json::json;
//!
//! // A price that may be left blank
//! let price = Schema::number().non_negative().or(Schema::literal(serde_json::Value::Null));
//!
//! assert!(price.safe_parse(&json!(5)).is_success());
//! assert!(price.safe_parse(&json!(null)).is_success());
//!
//! // Both branches explain why "x" was rejected
//! let issues = price.safe_parse(&json!("x")).into_result().unwrap_err();
//! assert_eq!(issues.len(), 2);
//! ```

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Issues};
use crate::path::IssuePath;

use super::traits::{finish, SchemaLike, ValueValidator};

/// Tries each branch in order and returns the first success.
///
/// When every branch fails, the result carries the concatenation of all
/// branches' issues in branch order, all at the union's path or below it.
pub struct UnionSchema {
    branches: Vec<Box<dyn ValueValidator>>,
}

impl UnionSchema {
    /// Creates a union over the given branches.
    pub fn new(branches: Vec<Box<dyn ValueValidator>>) -> Self {
        Self { branches }
    }

    /// Appends another branch, keeping the union flat.
    pub fn or<O>(mut self, other: O) -> Self
    where
        O: SchemaLike + 'static,
    {
        self.branches.push(Box::new(other));
        self
    }

    /// Returns the number of branches.
    pub fn len(&self) -> usize {
        self.branches.len()
    }

    /// Returns true if the union has no branches.
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Validates a value against the branches in order.
    pub fn validate(&self, value: Option<&Value>, path: &IssuePath) -> Validation<Value, Issues> {
        let mut issues = Vec::new();
        for branch in &self.branches {
            match branch.validate_value(value, path) {
                Validation::Success(v) => return Validation::Success(v),
                Validation::Failure(e) => issues.extend(e),
            }
        }

        if issues.is_empty() {
            // Only reachable with zero branches.
            issues.push(
                Issue::new(path.clone(), "Invalid input")
                    .with_code("invalid_union")
                    .with_expected("at least one union branch"),
            );
        }
        finish(Value::Null, issues)
    }
}

impl SchemaLike for UnionSchema {
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

/// Accepts an explicit `null`; anything else goes to the wrapped schema.
///
/// An absent value is not `null` and still reaches the wrapped schema.
pub struct Nullable<S> {
    inner: S,
}

impl<S: SchemaLike> Nullable<S> {
    /// Wraps `inner` so that `null` short-circuits to `None`.
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: SchemaLike> SchemaLike for Nullable<S> {
    type Output = Option<S::Output>;

    fn validate(
        &self,
        value: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Self::Output, Issues> {
        match value {
            Some(Value::Null) => Validation::Success(None),
            _ => self.inner.validate(value, path).map(Some),
        }
    }

    fn validate_to_value(
        &self,
        value: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Value, Issues> {
        match value {
            Some(Value::Null) => Validation::Success(Value::Null),
            _ => self.inner.validate_to_value(value, path),
        }
    }
}

/// Deserializes the wrapped schema's JSON output into `T`.
///
/// `T` should mirror the wrapped shape; a mismatch surfaces as one
/// `invalid_shape` issue at the current path rather than a panic.
pub struct Decode<S, T> {
    inner: S,
    target: PhantomData<fn() -> T>,
}

impl<S, T> Decode<S, T>
where
    S: SchemaLike,
    T: DeserializeOwned + Serialize,
{
    /// Wraps `inner` with a typed decoding step.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            target: PhantomData,
        }
    }
}

impl<S, T> SchemaLike for Decode<S, T>
where
    S: SchemaLike,
    T: DeserializeOwned + Serialize,
{
    type Output = T;

    fn validate(&self, value: Option<&Value>, path: &IssuePath) -> Validation<T, Issues> {
        match self.inner.validate_to_value(value, path) {
            Validation::Success(json) => match serde_json::from_value::<T>(json) {
                Ok(typed) => Validation::Success(typed),
                Err(err) => Validation::Failure(Issues::single(
                    Issue::new(path.clone(), format!("Failed to decode value: {}", err))
                        .with_code("invalid_shape")
                        .with_expected(std::any::type_name::<T>()),
                )),
            },
            Validation::Failure(e) => Validation::Failure(e),
        }
    }

    fn validate_to_value(
        &self,
        value: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Value, Issues> {
        match self.validate(value, path) {
            Validation::Success(typed) => encode_output(&typed, path),
            Validation::Failure(e) => Validation::Failure(e),
        }
    }
}

/// Serializes a typed output back to JSON for type-erased callers.
pub(crate) fn encode_output<T: Serialize>(
    output: &T,
    path: &IssuePath,
) -> Validation<Value, Issues> {
    match serde_json::to_value(output) {
        Ok(json) => Validation::Success(json),
        Err(err) => Validation::Failure(Issues::single(
            Issue::new(path.clone(), format!("Failed to encode value: {}", err))
                .with_code("invalid_shape"),
        )),
    }
}
