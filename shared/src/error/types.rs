//! Error types

use super::codes::ErrorCode;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type for the commission engine, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a snapshot-unavailable error (source could not be read)
    pub fn snapshot_unavailable(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::SnapshotUnavailable, msg)
    }

    /// Create a snapshot-invalid error (source could not be parsed)
    pub fn snapshot_invalid(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::SnapshotInvalid, msg)
    }

    /// Create an invalid status transition error
    pub fn invalid_transition(from: impl Into<String>, to: impl Into<String>) -> Self {
        let (from, to) = (from.into(), to.into());
        Self::with_message(
            ErrorCode::CommissionInvalidTransition,
            format!("Cannot move commission from {} to {}", from, to),
        )
        .with_detail("from", from)
        .with_detail("to", to)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_message(ErrorCode::InvalidFormat, err.to_string())
            .with_detail("line", err.line())
            .with_detail("column", err.column())
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_message() {
        let err = AppError::new(ErrorCode::SaleInvalidAmount);
        assert_eq!(err.message, "Sale amount must be a positive number");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_with_detail_accumulates() {
        let err = AppError::validation("bad")
            .with_detail("field", "commission_value")
            .with_detail("value", -1.0);
        let details = err.details.unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details["field"], "commission_value");
    }

    #[test]
    fn test_invalid_transition_details() {
        let err = AppError::invalid_transition("paid", "pending");
        assert_eq!(err.code, ErrorCode::CommissionInvalidTransition);
        assert_eq!(err.to_string(), "Cannot move commission from paid to pending");
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse: Result<Vec<u8>, _> = serde_json::from_str("[1,");
        let err: AppError = parse.unwrap_err().into();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert!(err.details.unwrap().contains_key("line"));
    }
}
