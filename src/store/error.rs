//! Store error types
//!
//! Defines all errors that can occur in the persistence layer.

use thiserror::Error;

use crate::store::types::Id;

/// Errors that can occur in the market store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Requested record does not exist
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: Id },

    /// Snapshot I/O failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Shorthand for a missing record in a named collection
    pub fn not_found(entity: &'static str, id: Id) -> Self {
        StoreError::NotFound { entity, id }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::not_found("category", 7);
        assert_eq!(err.to_string(), "category with id 7 not found");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let store_err: StoreError = io_err.into();
        assert!(matches!(store_err, StoreError::Io(_)));
    }
}
