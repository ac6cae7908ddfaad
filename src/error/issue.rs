//! Validation issue types.
//!
//! This module provides [`Issue`] for single validation failures and
//! [`Issues`] for accumulating every failure found in one pass.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use stillwater::prelude::*;

use crate::path::IssuePath;

/// Per-field error messages keyed by dotted path (`offers.0.name`).
pub type FieldErrors = IndexMap<String, String>;

/// A single validation failure.
///
/// `Issue` records where the failure happened and why:
/// - **path**: location of the offending value within the input
/// - **message**: human-readable description shown next to the form field
/// - **code**: machine-readable kind (`invalid_type`, `too_small`, `custom`, ...)
/// - **expected** / **got**: optional context for diagnostics
///
/// # Example
///
/// ```rust
/// use brm_validate::{Issue, IssuePath};
///
/// let issue = Issue::new(
///     IssuePath::root().push_key("core_promise"),
///     "Core promise is required",
/// )
/// .with_code("too_small")
/// .with_expected("at least 1 character");
///
/// assert_eq!(issue.code, "too_small");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// The path to the value that failed validation.
    pub path: IssuePath,
    /// Human-readable error message.
    pub message: String,
    /// Machine-readable error code.
    pub code: String,
    /// Description of what was expected.
    pub expected: Option<String>,
    /// The kind or rendering of the value that was received.
    pub got: Option<String>,
}

impl Issue {
    /// Creates a new issue with the given path and message.
    ///
    /// The code defaults to `custom`, which is what refinements report.
    pub fn new(path: IssuePath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            code: "custom".to_string(),
            expected: None,
            got: None,
        }
    }

    /// Sets the error code and returns self for chaining.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the "expected" field and returns self for chaining.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Sets the "got" field and returns self for chaining.
    pub fn with_got(mut self, got: impl Into<String>) -> Self {
        self.got = Some(got.into());
        self
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)?;
        } else {
            write!(f, "{}: {}", self.path, self.message)?;
        }

        if let Some(ref expected) = self.expected {
            write!(f, " (expected: {})", expected)?;
        }
        if let Some(ref got) = self.got {
            write!(f, " (got: {})", got)?;
        }

        Ok(())
    }
}

impl std::error::Error for Issue {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issue>();
    assert_sync::<Issue>();
};

/// A non-empty list of validation issues.
///
/// A failed parse always carries at least one issue; wrapping
/// `NonEmptyVec<Issue>` makes that a property of the type. Issues from
/// independent fields combine through [`Semigroup`]:
///
/// ```rust
/// use brm_validate::{Issue, Issues, IssuePath};
/// use stillwater::prelude::*;
///
/// let a = Issues::single(Issue::new(IssuePath::root().push_key("name"), "required"));
/// let b = Issues::single(Issue::new(IssuePath::root().push_key("notes"), "too long"));
///
/// assert_eq!(a.combine(b).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Issues(NonEmptyVec<Issue>);

impl Issues {
    /// Creates an `Issues` containing a single issue.
    pub fn single(issue: Issue) -> Self {
        Self(NonEmptyVec::singleton(issue))
    }

    /// Creates an `Issues` from a `Vec`, or `None` when the vec is empty.
    pub fn from_vec(issues: Vec<Issue>) -> Option<Self> {
        NonEmptyVec::from_vec(issues).map(Self)
    }

    /// Returns the number of issues.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained issues.
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.0.iter()
    }

    /// Returns the first issue.
    pub fn first(&self) -> &Issue {
        self.0.head()
    }

    /// Returns all issues at the specified path.
    pub fn at_path(&self, path: &IssuePath) -> Vec<&Issue> {
        self.0.iter().filter(|i| &i.path == path).collect()
    }

    /// Returns all issues with the specified code.
    pub fn with_code(&self, code: &str) -> Vec<&Issue> {
        self.0.iter().filter(|i| i.code == code).collect()
    }

    /// Flattens the issues into one message per dotted path.
    ///
    /// When several issues share a path the first one wins, which is the one
    /// a form shows inline. Root-level issues are keyed by the empty string.
    ///
    /// ```rust
    /// use brm_validate::{Issue, Issues, IssuePath};
    ///
    /// let name = IssuePath::root().push_key("offers").push_index(0).push_key("name");
    /// let issues = Issues::from_vec(vec![
    ///     Issue::new(name.clone(), "Offer 1 name is required"),
    ///     Issue::new(name, "ignored"),
    /// ])
    /// .unwrap();
    ///
    /// let fields = issues.field_errors();
    /// assert_eq!(fields.len(), 1);
    /// assert_eq!(fields["offers.0.name"], "Offer 1 name is required");
    /// ```
    pub fn field_errors(&self) -> FieldErrors {
        let mut fields = FieldErrors::new();
        for issue in self.0.iter() {
            fields
                .entry(issue.path.to_string())
                .or_insert_with(|| issue.message.clone());
        }
        fields
    }

    /// Converts this collection into a `Vec<Issue>`.
    pub fn into_vec(self) -> Vec<Issue> {
        self.0.into_vec()
    }
}

impl Semigroup for Issues {
    fn combine(self, other: Self) -> Self {
        Issues(self.0.combine(other.0))
    }
}

impl Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} issue(s):", self.len())?;
        for (i, issue) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for Issues {}

impl IntoIterator for Issues {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a Issues {
    type Item = &'a Issue;
    type IntoIter = Box<dyn Iterator<Item = &'a Issue> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Issues>();
    assert_sync::<Issues>();
};
