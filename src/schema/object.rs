//! Object schema validation.
//!
//! This module provides [`ObjectSchema`] for validating JSON objects against a
//! declared, ordered list of fields.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::Validation;

use crate::error::{Issue, Issues};
use crate::path::IssuePath;

use super::traits::{finish, value_type_name, SchemaLike, ValueValidator};

/// A schema for validating JSON objects.
///
/// Every declared field is validated, even after an earlier field fails, so
/// one call reports every broken field. A key missing from the input is
/// validated as an absent value and therefore fails its field schema. Keys not
/// declared in the schema are ignored and left out of the output.
///
/// # Example
///
/// ```rust
/// use brm_validate::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("core_promise", Schema::string().min_len(1))
///     .field("has_upsell", Schema::boolean());
///
/// let result = schema.safe_parse(&json!({
///     "core_promise": "We help coaches scale",
///     "has_upsell": true,
///     "ignored": 1
/// }));
/// let output = result.into_result().unwrap();
/// assert_eq!(output.len(), 2);
///
/// // Both fields broken: both reported
/// let result = schema.safe_parse(&json!({"core_promise": "", "has_upsell": "yes"}));
/// assert_eq!(result.into_result().unwrap_err().len(), 2);
/// ```
pub struct ObjectSchema {
    fields: IndexMap<String, Box<dyn ValueValidator>>,
    type_error_message: Option<String>,
}

impl ObjectSchema {
    /// Creates a new object schema with no fields.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
            type_error_message: None,
        }
    }

    /// Declares a field. Redeclaring a name replaces the earlier schema but
    /// keeps its original position.
    pub fn field<S>(mut self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike + 'static,
    {
        self.fields.insert(name.into(), Box::new(schema));
        self
    }

    /// Sets a custom error message used when the input is not an object.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }

    /// Returns the declared field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Validates a value against this schema.
    ///
    /// Returns the validated fields as a new `Map` on success, or every
    /// field issue on failure.
    pub fn validate(
        &self,
        value: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Map<String, Value>, Issues> {
        let obj = match value {
            Some(Value::Object(o)) => o,
            _ => {
                let message = self
                    .type_error_message
                    .clone()
                    .unwrap_or_else(|| "Expected object".to_string());
                return Validation::Failure(Issues::single(
                    Issue::new(path.clone(), message)
                        .with_code("invalid_type")
                        .with_expected("object")
                        .with_got(value_type_name(value)),
                ));
            }
        };

        let mut issues = Vec::new();
        let mut validated = Map::new();

        for (name, schema) in &self.fields {
            let field_path = path.push_key(name);
            match schema.validate_value(obj.get(name), &field_path) {
                Validation::Success(v) => {
                    validated.insert(name.clone(), v);
                }
                Validation::Failure(e) => issues.extend(e),
            }
        }

        finish(validated, issues)
    }
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for ObjectSchema {
    type Output = Map<String, Value>;

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
        self.validate(value, path).map(Value::Object)
    }
}
