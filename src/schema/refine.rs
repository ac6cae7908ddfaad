//! Cross-field refinements.
//!
//! [`SuperRefine`] runs a check over a schema's validated output and lets it
//! report issues anywhere below the current path through [`RefinementCtx`].

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{Issue, Issues};
use crate::path::IssuePath;

use super::combinators::encode_output;
use super::traits::{finish, SchemaLike};

type RefineFn<T> = Arc<dyn Fn(&T, &mut RefinementCtx) + Send + Sync>;

/// Collects the issues a refinement reports.
///
/// Issue paths are relative to the path of the refined value.
pub struct RefinementCtx {
    path: IssuePath,
    issues: Vec<Issue>,
}

impl RefinementCtx {
    fn new(path: &IssuePath) -> Self {
        Self {
            path: path.clone(),
            issues: Vec::new(),
        }
    }

    /// The path of the value being refined.
    pub fn path(&self) -> &IssuePath {
        &self.path
    }

    /// Reports an issue at the refined value itself.
    pub fn add_issue(&mut self, message: impl Into<String>) {
        self.issues.push(Issue::new(self.path.clone(), message));
    }

    /// Reports an issue at `relative`, appended to the refined value's path.
    pub fn add_issue_at(&mut self, relative: &IssuePath, message: impl Into<String>) {
        self.issues
            .push(Issue::new(self.path.join(relative), message));
    }

    /// Number of issues reported so far.
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }
}

/// Runs a check after the wrapped schema succeeds.
///
/// Structural failures are returned untouched and the check never sees them.
/// If the check reports anything, the result fails with exactly the reported
/// issues and the otherwise valid output is discarded.
///
/// # Example
///
/// ```rust
/// use brm_validate::{IssuePath, Schema, SchemaExt, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("min", Schema::number())
///     .field("max", Schema::number())
///     .super_refine(|range, ctx| {
///         let min = range.get("min").and_then(|v| v.as_f64()).unwrap_or_default();
///         let max = range.get("max").and_then(|v| v.as_f64()).unwrap_or_default();
///         if min > max {
///             ctx.add_issue_at(&IssuePath::root().push_key("max"), "max must not be below min");
///         }
///     });
///
/// let issues = schema.safe_parse(&json!({"min": 5, "max": 1})).into_result().unwrap_err();
/// assert_eq!(issues.first().path.to_string(), "max");
/// ```
pub struct SuperRefine<S: SchemaLike> {
    inner: S,
    check: RefineFn<S::Output>,
}

impl<S: SchemaLike> SuperRefine<S> {
    /// Wraps `inner` with the refinement `check`.
    pub fn new<F>(inner: S, check: F) -> Self
    where
        F: Fn(&S::Output, &mut RefinementCtx) + Send + Sync + 'static,
    {
        Self {
            inner,
            check: Arc::new(check),
        }
    }
}

impl<S> SchemaLike for SuperRefine<S>
where
    S: SchemaLike,
    S::Output: Serialize,
{
    type Output = S::Output;

    fn validate(&self, value: Option<&Value>, path: &IssuePath) -> Validation<S::Output, Issues> {
        match self.inner.validate(value, path) {
            Validation::Success(output) => {
                let mut ctx = RefinementCtx::new(path);
                (self.check)(&output, &mut ctx);
                finish(output, ctx.issues)
            }
            Validation::Failure(e) => Validation::Failure(e),
        }
    }

    fn validate_to_value(
        &self,
        value: Option<&Value>,
        path: &IssuePath,
    ) -> Validation<Value, Issues> {
        match self.validate(value, path) {
            Validation::Success(output) => encode_output(&output, path),
            Validation::Failure(e) => Validation::Failure(e),
        }
    }
}
