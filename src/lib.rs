//! # brm-validate
//!
//! Validation for the business-profile intake form of a coaching dashboard.
//! Untrusted form payloads are parsed into typed records, and every problem
//! is reported at once with the exact field path it belongs to, rather than
//! stopping at the first failure.
//!
//! ## Core Types
//!
//! - [`IssuePath`]: location of a value in nested input (e.g., `offers.0.name`)
//! - [`Issue`]: a single failure with its path and message
//! - [`Issues`]: the non-empty list a failed parse carries
//! - [`Schema`]: entry point for building schemas
//! - [`forms::BusinessInfoForm`]: validates the intake form and forwards it
//!   to the profile store
//! - [`roles::resolve_workspace`]: routes a signed-in user to their workspace
//!
//! ## Example
//!
//! ```rust
//! use brm_validate::{Schema, SchemaExt, SchemaLike};
//! use serde_json::json;
//!
//! let schema = Schema::object()
//!     .field("core_promise", Schema::string().min_len(1).max_len(120))
//!     .field("avg_txn_value", Schema::number().non_negative().nullable());
//!
//! let result = schema.safe_parse(&json!({
//!     "core_promise": "We help coaches scale",
//!     "avg_txn_value": -5
//! }));
//!
//! let issues = result.into_result().unwrap_err();
//! assert_eq!(issues.len(), 1);
//! assert_eq!(issues.first().path.to_string(), "avg_txn_value");
//! ```

pub mod error;
pub mod forms;
pub mod path;
pub mod roles;
pub mod schema;

pub use error::{FieldErrors, Issue, Issues, StoreError};
pub use path::{IssuePath, PathSegment};
pub use schema::{
    ArraySchema, BooleanSchema, Decode, EnumSchema, LiteralSchema, Nullable, NumberSchema,
    ObjectSchema, RefinementCtx, Schema, SchemaExt, SchemaLike, StringSchema, SuperRefine,
    UnionSchema, ValueValidator,
};

/// Result of [`SchemaLike::safe_parse`]: `Success(data)` or `Failure(issues)`.
pub type ParseResult<T> = stillwater::Validation<T, Issues>;
