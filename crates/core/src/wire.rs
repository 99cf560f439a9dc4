//! Wire encoding of errors.
//!
//! Domain errors cross the protocol boundary as a stable
//! `{code, message}` pair:
//!
//! ```json
//! {
//!   "code": "DIMENSION_MISMATCH",
//!   "message": "dimension mismatch: expected 3, got 5"
//! }
//! ```
//!
//! ## Error Codes (Canonical)
//!
//! These codes are frozen and must not change:
//!
//! | Code | Description |
//! |------|-------------|
//! | NOT_FOUND | Record or collection not found |
//! | DIMENSION_MISMATCH | Vector length disagrees with the collection |
//! | INVALID_VECTOR | Empty vector or non-finite elements |
//! | INVALID_ARGUMENT | Malformed request parameter |
//! | INTERNAL | Bug or invariant violation |
//!
//! A missing collection degrades to `NOT_FOUND` on the wire; the richer
//! variant only exists internally.

use crate::error::VectorError;
use serde::{Deserialize, Serialize};

/// Wire error representation.
///
/// This is the only error shape visible to protocol clients. It never
/// leaks internal representation beyond the human-readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireError {
    /// Canonical error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl WireError {
    /// Create a new wire error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl VectorError {
    /// The canonical wire code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            VectorError::NotFound { .. } => "NOT_FOUND",
            VectorError::CollectionNotFound { .. } => "NOT_FOUND",
            VectorError::DimensionMismatch { .. } => "DIMENSION_MISMATCH",
            VectorError::InvalidVector { .. } => "INVALID_VECTOR",
            VectorError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            VectorError::Internal { .. } => "INTERNAL",
        }
    }

    /// Encode this error for the wire.
    pub fn to_wire(&self) -> WireError {
        WireError::new(self.code(), self.to_string())
    }
}

impl From<VectorError> for WireError {
    fn from(err: VectorError) -> Self {
        err.to_wire()
    }
}
