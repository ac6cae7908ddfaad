//! Submission of the business-information form.
//!
//! A payload is validated first. Only a valid profile is wrapped under the
//! payload key and sent to the upsert procedure; an invalid one comes back as
//! a field-to-message map for display next to the inputs.

use std::sync::Arc;

use serde_json::{Map, Value};
use stillwater::Validation;
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::{FieldErrors, Issues, StoreError};
use crate::schema::SchemaLike;
use crate::ParseResult;

use super::business_info::{business_info, BusinessProfile};

/// Procedure called when none is configured.
pub const DEFAULT_PROCEDURE: &str = "upsert_brm_profile";

/// Parameter name the profile is passed under when none is configured.
pub const DEFAULT_PAYLOAD_KEY: &str = "p_profile";

/// The hosted database, as seen by the form.
pub trait ProfileStore: Send + Sync {
    /// Calls a stored procedure with named parameters and returns its result.
    fn call_procedure(&self, procedure: &str, params: &Value) -> Result<Value, StoreError>;
}

impl<T: ProfileStore + ?Sized> ProfileStore for &T {
    fn call_procedure(&self, procedure: &str, params: &Value) -> Result<Value, StoreError> {
        (**self).call_procedure(procedure, params)
    }
}

impl<T: ProfileStore + ?Sized> ProfileStore for Arc<T> {
    fn call_procedure(&self, procedure: &str, params: &Value) -> Result<Value, StoreError> {
        (**self).call_procedure(procedure, params)
    }
}

/// Why a submission did not reach or pass the store.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The payload failed validation; the store was not called.
    #[error("business profile failed validation with {} issue(s)", .issues.len())]
    Invalid {
        /// Every issue found, in schema order.
        issues: Issues,
        /// First message per field path, for inline display.
        field_errors: FieldErrors,
    },

    /// The validated profile could not be serialized.
    #[error("failed to encode business profile: {0}")]
    Encode(#[from] serde_json::Error),

    /// The store refused the upsert or could not be reached.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SubmitError {
    fn invalid(issues: Issues) -> Self {
        let field_errors = issues.field_errors();
        SubmitError::Invalid {
            issues,
            field_errors,
        }
    }

    /// Field errors when the failure was a validation failure.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            SubmitError::Invalid { field_errors, .. } => Some(field_errors),
            _ => None,
        }
    }

    /// True when the store was never called.
    pub fn is_invalid(&self) -> bool {
        matches!(self, SubmitError::Invalid { .. })
    }
}

/// Validates the business-information form and upserts it.
///
/// # Example
///
/// ```rust
/// use brm_validate::forms::{BusinessInfoForm, ProfileStore};
/// use brm_validate::StoreError;
/// use serde_json::{json, Value};
///
/// struct Offline;
///
/// impl ProfileStore for Offline {
///     fn call_procedure(&self, _: &str, _: &Value) -> Result<Value, StoreError> {
///         Err(StoreError::Unavailable("offline".to_string()))
///     }
/// }
///
/// let form = BusinessInfoForm::new(Offline);
/// let err = form.submit(&json!({"core_promise": ""})).unwrap_err();
/// assert!(err.is_invalid());
/// assert_eq!(
///     err.field_errors().unwrap()["core_promise"],
///     "Core promise is required"
/// );
/// ```
pub struct BusinessInfoForm<S> {
    store: S,
    procedure: String,
    payload_key: String,
}

impl<S: ProfileStore> BusinessInfoForm<S> {
    /// Creates a form that submits to `store` with the default procedure.
    pub fn new(store: S) -> Self {
        Self {
            store,
            procedure: DEFAULT_PROCEDURE.to_string(),
            payload_key: DEFAULT_PAYLOAD_KEY.to_string(),
        }
    }

    /// Sets the upsert procedure name.
    pub fn with_procedure(mut self, procedure: impl Into<String>) -> Self {
        self.procedure = procedure.into();
        self
    }

    /// Sets the parameter name the profile is passed under.
    pub fn with_payload_key(mut self, key: impl Into<String>) -> Self {
        self.payload_key = key.into();
        self
    }

    /// The upsert procedure name.
    pub fn procedure(&self) -> &str {
        &self.procedure
    }

    /// The parameter name the profile is passed under.
    pub fn payload_key(&self) -> &str {
        &self.payload_key
    }

    /// The store submissions go to.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validates without submitting.
    pub fn validate(&self, input: &Value) -> ParseResult<BusinessProfile> {
        business_info().safe_parse(input)
    }

    /// Validates `input` and, when valid, upserts it.
    ///
    /// Returns the typed profile that was stored.
    pub fn submit(&self, input: &Value) -> Result<BusinessProfile, SubmitError> {
        let profile = match self.validate(input) {
            Validation::Success(profile) => profile,
            Validation::Failure(issues) => {
                debug!(issue_count = issues.len(), "business profile failed validation");
                return Err(SubmitError::invalid(issues));
            }
        };

        let mut params = Map::new();
        params.insert(self.payload_key.clone(), serde_json::to_value(&profile)?);

        debug!(procedure = %self.procedure, "submitting business profile");
        match self.store.call_procedure(&self.procedure, &Value::Object(params)) {
            Ok(_) => Ok(profile),
            Err(err) => {
                warn!(procedure = %self.procedure, error = %err, "business profile upsert failed");
                Err(err.into())
            }
        }
    }
}
