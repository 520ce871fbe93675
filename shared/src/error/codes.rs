//! Unified error codes for the commission engine
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Rule snapshot errors
//! - 2xxx: Commission record errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Rule snapshot ====================
    /// Rule snapshot source could not be read
    SnapshotUnavailable = 1001,
    /// Rule snapshot content could not be parsed
    SnapshotInvalid = 1002,

    // ==================== 2xxx: Commission record ====================
    /// Commission status transition is not allowed
    CommissionInvalidTransition = 2001,
    /// Commission value is invalid
    CommissionInvalidValue = 2002,
    /// Sale amount is invalid
    SaleInvalidAmount = 2003,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",

            // Rule snapshot
            ErrorCode::SnapshotUnavailable => "Commission rule snapshot is unavailable",
            ErrorCode::SnapshotInvalid => "Commission rule snapshot is invalid",

            // Commission record
            ErrorCode::CommissionInvalidTransition => "Commission status transition not allowed",
            ErrorCode::CommissionInvalidValue => "Commission value is invalid",
            ErrorCode::SaleInvalidAmount => "Sale amount must be a positive number",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),

            // Rule snapshot
            1001 => Ok(ErrorCode::SnapshotUnavailable),
            1002 => Ok(ErrorCode::SnapshotInvalid),

            // Commission record
            2001 => Ok(ErrorCode::CommissionInvalidTransition),
            2002 => Ok(ErrorCode::CommissionInvalidValue),
            2003 => Ok(ErrorCode::SaleInvalidAmount),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
