//! Traits for schema polymorphism.
//!
//! [`SchemaLike`] is the single contract every schema implements.
//! [`ValueValidator`] erases the output type so heterogeneous schemas can sit
//! side by side in objects and unions, and [`SchemaExt`] adds the wrapping
//! combinators (`nullable`, `or`, `super_refine`, `decode`) to every schema.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use stillwater::Validation;

use crate::error::Issues;
use crate::path::IssuePath;
use crate::ParseResult;

use super::combinators::{Decode, Nullable, UnionSchema};
use super::refine::{RefinementCtx, SuperRefine};

/// A schema that validates JSON input into a typed output.
///
/// The input is `Option<&Value>`: `None` is an absent value (a missing object
/// key), `Some(&Value::Null)` is an explicit `null`. Absent input fails every
/// built-in schema, including nullable ones.
///
/// The `Send + Sync` bounds let one schema be shared by any number of
/// concurrent validations.
///
/// # Example
///
/// ```rust
/// use brm_validate::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::string().min_len(1);
///
/// let result = schema.safe_parse(&json!("coaching"));
/// assert!(result.is_success());
///
/// let result = schema.safe_parse(&json!(42));
/// assert!(result.is_failure());
/// ```
pub trait SchemaLike: Send + Sync {
    /// The output type produced by successful validation.
    type Output;

    /// Validates a value found at `path`.
    fn validate(&self, value: Option<&Value>, path: &IssuePath)
        -> Validation<Self::Output, Issues>;

    /// Validates a value and returns the output as a `serde_json::Value`.
    fn validate_to_value(&self, value: Option<&Value>, path: &IssuePath)
        -> Validation<Value, Issues>;

    /// Validates a complete input from the root path.
    fn safe_parse(&self, value: &Value) -> ParseResult<Self::Output> {
        self.validate(Some(value), &IssuePath::root())
    }
}

/// A type-erased schema producing `serde_json::Value` output.
///
/// Object fields and union branches are stored as `Box<dyn ValueValidator>`.
/// Every `SchemaLike` is a `ValueValidator` through the blanket impl below.
pub trait ValueValidator: Send + Sync {
    /// Validates a value and returns the output as a `serde_json::Value`.
    fn validate_value(&self, value: Option<&Value>, path: &IssuePath) -> Validation<Value, Issues>;
}

impl<S: SchemaLike> ValueValidator for S {
    fn validate_value(&self, value: Option<&Value>, path: &IssuePath) -> Validation<Value, Issues> {
        self.validate_to_value(value, path)
    }
}

/// Wrapping combinators available on every schema.
pub trait SchemaExt: SchemaLike + Sized {
    /// Accepts an explicit `null` in addition to whatever this schema accepts.
    ///
    /// ```rust
    /// use brm_validate::{Schema, SchemaExt, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::string().nullable();
    /// assert!(schema.safe_parse(&json!(null)).is_success());
    /// assert!(schema.safe_parse(&json!("Signature offer")).is_success());
    /// assert!(schema.safe_parse(&json!(3)).is_failure());
    /// ```
    fn nullable(self) -> Nullable<Self> {
        Nullable::new(self)
    }

    /// Tries this schema first, then `other`.
    ///
    /// ```rust
    /// use brm_validate::{Schema, SchemaExt, SchemaLike};
    /// use serde_json::json;
    ///
    /// let slot = Schema::literal(1).or(Schema::literal(2)).or(Schema::literal(3));
    /// assert!(slot.safe_parse(&json!(2)).is_success());
    /// assert!(slot.safe_parse(&json!(4)).is_failure());
    /// ```
    fn or<O>(self, other: O) -> UnionSchema
    where
        Self: 'static,
        O: SchemaLike + 'static,
    {
        UnionSchema::new(vec![
            Box::new(self) as Box<dyn ValueValidator>,
            Box::new(other) as Box<dyn ValueValidator>,
        ])
    }

    /// Runs a cross-field check after this schema succeeds.
    ///
    /// The check receives the validated output and a [`RefinementCtx`] for
    /// reporting issues relative to the current path.
    fn super_refine<F>(self, check: F) -> SuperRefine<Self>
    where
        F: Fn(&Self::Output, &mut RefinementCtx) + Send + Sync + 'static,
        Self::Output: Serialize,
    {
        SuperRefine::new(self, check)
    }

    /// Deserializes the validated JSON output into a typed record.
    fn decode<T>(self) -> Decode<Self, T>
    where
        T: DeserializeOwned + Serialize,
    {
        Decode::new(self)
    }
}

impl<S: SchemaLike> SchemaExt for S {}

/// Returns the JSON type name for a possibly absent value.
pub(crate) fn value_type_name(value: Option<&Value>) -> &'static str {
    match value {
        None => "undefined",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}

/// Turns collected issues into a result, succeeding with `value` when empty.
pub(crate) fn finish<T>(value: T, issues: Vec<crate::Issue>) -> Validation<T, Issues> {
    match Issues::from_vec(issues) {
        Some(issues) => Validation::Failure(issues),
        None => Validation::Success(value),
    }
}
