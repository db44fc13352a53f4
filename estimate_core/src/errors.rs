//! # Error Types
//!
//! Structured error types for estimate_core. Nothing in the engine is fatal:
//! malformed numeric input coerces to zero rather than erroring, so these
//! errors only arise from rejected mutations (invalid payment drafts,
//! out-of-range indices), never from computing a report.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::errors::{EstimateError, EstimateResult};
//!
//! fn validate_amount(amount: f64) -> EstimateResult<()> {
//!     if amount <= 0.0 {
//!         return Err(EstimateError::InvalidInput {
//!             field: "amount".to_string(),
//!             value: amount.to_string(),
//!             reason: "Payment amount must be greater than zero".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for estimate_core operations
pub type EstimateResult<T> = Result<T, EstimateError>;

/// Structured error type for estimate operations.
///
/// Each variant provides field-level context so callers can attach the
/// message to the specific form input that caused the rejection.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum EstimateError {
    /// An input value is invalid (out of range, unparsable, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// An index-addressed record does not exist
    #[error("No {collection} record at index {index} (len {len})")]
    IndexOutOfRange {
        collection: String,
        index: usize,
        len: usize,
    },
}

impl EstimateError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        EstimateError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        EstimateError::MissingField {
            field: field.into(),
        }
    }

    /// Create an IndexOutOfRange error
    pub fn index_out_of_range(collection: impl Into<String>, index: usize, len: usize) -> Self {
        EstimateError::IndexOutOfRange {
            collection: collection.into(),
            index,
            len,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EstimateError::InvalidInput { .. } => "INVALID_INPUT",
            EstimateError::MissingField { .. } => "MISSING_FIELD",
            EstimateError::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
        }
    }

    /// The field this error is scoped to, if any.
    ///
    /// Lets UI layers highlight the offending form input.
    pub fn field(&self) -> Option<&str> {
        match self {
            EstimateError::InvalidInput { field, .. } => Some(field),
            EstimateError::MissingField { field } => Some(field),
            EstimateError::IndexOutOfRange { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = EstimateError::invalid_input("amount", "0", "Payment amount must be greater than zero");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: EstimateError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(EstimateError::missing_field("date").error_code(), "MISSING_FIELD");
        assert_eq!(
            EstimateError::index_out_of_range("payments", 3, 2).error_code(),
            "INDEX_OUT_OF_RANGE"
        );
    }

    #[test]
    fn test_field_scoping() {
        assert_eq!(EstimateError::missing_field("date").field(), Some("date"));
        assert_eq!(EstimateError::index_out_of_range("payments", 0, 0).field(), None);
    }
}
