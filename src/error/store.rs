//! Errors reported by the hosted data store.

use thiserror::Error;

/// A failed call against the hosted database.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The database ran the call and refused it (constraint, permission, ...).
    #[error("procedure '{procedure}' rejected the call: {message}")]
    Rejected {
        /// Name of the procedure or table that was called.
        procedure: String,
        /// Message returned by the database.
        message: String,
    },

    /// The database could not be reached.
    #[error("data store unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = StoreError::Rejected {
            procedure: "upsert_brm_profile".to_string(),
            message: "permission denied".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "procedure 'upsert_brm_profile' rejected the call: permission denied"
        );
        assert_eq!(
            StoreError::Unavailable("timeout".to_string()).to_string(),
            "data store unavailable: timeout"
        );
    }
}
