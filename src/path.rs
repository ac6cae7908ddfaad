//! Issue paths for locating values in nested structures.
//!
//! This module provides [`IssuePath`] and [`PathSegment`] for building and
//! displaying the location of a validation failure, e.g. `offers.0.name`.

use std::fmt::{self, Display};

/// A segment of an issue path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object key (e.g., `offers`, `name`)
    Key(String),
    /// An array index (e.g., `0`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new key segment.
    pub fn key(name: impl Into<String>) -> Self {
        PathSegment::Key(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(name) => write!(f, "{}", name),
            PathSegment::Index(idx) => write!(f, "{}", idx),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Key(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Key(name)
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// The location of a value inside a nested input.
///
/// Paths are immutable: the `push_*` methods return a new path and leave the
/// original untouched, so one base path can be extended for every child.
///
/// # Example
///
/// ```rust
/// use brm_validate::IssuePath;
///
/// let path = IssuePath::root()
///     .push_key("offers")
///     .push_index(0)
///     .push_key("name");
///
/// assert_eq!(path.to_string(), "offers.0.name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct IssuePath {
    segments: Vec<PathSegment>,
}

impl IssuePath {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from any sequence of segments.
    ///
    /// ```rust
    /// use brm_validate::{IssuePath, PathSegment};
    ///
    /// let path = IssuePath::from_segments([
    ///     PathSegment::from("offers"),
    ///     PathSegment::from(2),
    /// ]);
    /// assert_eq!(path.to_string(), "offers.2");
    /// ```
    pub fn from_segments<I>(segments: I) -> Self
    where
        I: IntoIterator<Item = PathSegment>,
    {
        Self {
            segments: segments.into_iter().collect(),
        }
    }

    /// Returns a new path with a key segment appended.
    pub fn push_key(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns a new path with every segment of `relative` appended.
    pub fn join(&self, relative: &IssuePath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(relative.segments.iter().cloned());
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }
}

/// Paths display as dot-joined segments; indices are not bracketed so the
/// string matches the form field names (`offers.0.name`).
impl Display for IssuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
