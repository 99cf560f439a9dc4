//! Error taxonomy for vector store operations.
//!
//! Every fallible operation returns [`VectorError`]. The variants are the
//! domain-level failure modes; the wire encoding lives in [`crate::wire`]
//! and maps each variant to a frozen string code.
//!
//! Mutation failures are transactional at single-record granularity: a
//! rejected insert leaves the collection exactly as it was.

use thiserror::Error;

/// All vector store errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VectorError {
    /// Lookup on a missing record id.
    #[error("vector not found: {id}")]
    NotFound {
        /// The id that was not found.
        id: String,
    },

    /// Operation on a missing collection.
    #[error("collection not found: {name}")]
    CollectionNotFound {
        /// The collection name that was not found.
        name: String,
    },

    /// Vector length disagrees with the collection's established dimensionality.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Dimensionality the collection enforces.
        expected: usize,
        /// Dimensionality of the rejected vector.
        actual: usize,
    },

    /// Vector is empty or contains non-finite elements.
    #[error("invalid vector: {reason}")]
    InvalidVector {
        /// Why the vector was rejected.
        reason: String,
    },

    /// Malformed request parameter (empty id, non-positive limit, bad name).
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Why the argument was rejected.
        reason: String,
    },

    /// Bug or invariant violation. No partial state is left visible.
    #[error("internal error: {message}")]
    Internal {
        /// What went wrong.
        message: String,
    },
}

/// Result type for vector store operations.
pub type VectorResult<T> = Result<T, VectorError>;

impl VectorError {
    /// Shorthand for an [`VectorError::InvalidArgument`] error.
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        VectorError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Shorthand for an [`VectorError::InvalidVector`] error.
    pub fn invalid_vector(reason: impl Into<String>) -> Self {
        VectorError::InvalidVector {
            reason: reason.into(),
        }
    }

    /// Check if this is a not-found error (record or collection).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            VectorError::NotFound { .. } | VectorError::CollectionNotFound { .. }
        )
    }

    /// Check if this error indicates a rejected request rather than a bug.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, VectorError::Internal { .. })
    }
}
