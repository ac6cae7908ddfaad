//! Error types.
//!
//! [`Issue`] and [`Issues`] describe validation failures and are returned as
//! values, never raised. [`StoreError`] is what the data-store seams report.

mod issue;
mod store;

pub use issue::{FieldErrors, Issue, Issues};
pub use store::StoreError;
