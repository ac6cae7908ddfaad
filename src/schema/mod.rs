//! Schema definitions for validation.
//!
//! Primitive schemas check one atomic type; combinators build objects,
//! arrays, unions, nullable values, and refinements out of them. Object and
//! array schemas validate every child before reporting, so a single call
//! returns the full set of issues.
//!
//! # Example
//!
//! ```rust
//! use brm_validate::{Schema, SchemaExt, SchemaLike};
//! use serde_json::json;
//!
//! let offer = Schema::object()
//!     .field("slot", Schema::literal(1).or(Schema::literal(2)).or(Schema::literal(3)))
//!     .field("name", Schema::string().nullable());
//!
//! let offers = Schema::array(offer).length(3);
//!
//! let result = offers.safe_parse(&json!([
//!     {"slot": 1, "name": "Mastermind"},
//!     {"slot": 2, "name": null},
//!     {"slot": 3, "name": null}
//! ]));
//! assert!(result.is_success());
//! ```

mod array;
mod combinators;
mod numeric;
mod object;
mod primitive;
mod refine;
mod string;
mod traits;

pub use array::ArraySchema;
pub use combinators::{Decode, Nullable, UnionSchema};
pub use numeric::NumberSchema;
pub use object::ObjectSchema;
pub use primitive::{BooleanSchema, EnumSchema, LiteralSchema};
pub use refine::{RefinementCtx, SuperRefine};
pub use string::StringSchema;
pub use traits::{SchemaExt, SchemaLike, ValueValidator};

use serde_json::Value;

/// Entry point for creating validation schemas.
///
/// Each factory returns a concrete schema type whose builder methods add
/// constraints; wrapping combinators come from [`SchemaExt`].
pub struct Schema;

impl Schema {
    /// Creates a schema accepting any string.
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// Creates a schema accepting any finite number.
    pub fn number() -> NumberSchema {
        NumberSchema::new()
    }

    /// Creates a schema accepting `true` or `false`.
    pub fn boolean() -> BooleanSchema {
        BooleanSchema::new()
    }

    /// Creates a schema accepting exactly `value`.
    pub fn literal(value: impl Into<Value>) -> LiteralSchema {
        LiteralSchema::new(value)
    }

    /// Creates a schema accepting one string from `values`.
    ///
    /// Named with a trailing underscore because `enum` is a keyword.
    pub fn enum_<I, V>(values: I) -> EnumSchema
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        EnumSchema::new(values)
    }

    /// Creates an object schema with no fields; add them with `.field`.
    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }

    /// Creates a schema for arrays whose elements match `item_schema`.
    pub fn array<S: SchemaLike>(item_schema: S) -> ArraySchema<S> {
        ArraySchema::new(item_schema)
    }

    /// Creates a union that tries each branch in order.
    ///
    /// ```rust
    /// use brm_validate::{Schema, SchemaLike, ValueValidator};
    /// use serde_json::json;
    ///
    /// let id = Schema::union(vec![
    ///     Box::new(Schema::string().min_len(1)) as Box<dyn ValueValidator>,
    ///     Box::new(Schema::number().positive()) as Box<dyn ValueValidator>,
    /// ]);
    ///
    /// assert!(id.safe_parse(&json!("usr_42")).is_success());
    /// assert!(id.safe_parse(&json!(42)).is_success());
    /// assert!(id.safe_parse(&json!(false)).is_failure());
    /// ```
    pub fn union(branches: Vec<Box<dyn ValueValidator>>) -> UnionSchema {
        UnionSchema::new(branches)
    }
}
