//! Unified error system for the commission engine
//!
//! - [`ErrorCode`]: numeric codes, stable across releases
//! - [`ErrorCategory`]: which area an error belongs to (derived from the code)
//! - [`AppError`]: code + message + optional structured details
//!
//! "No applicable rule" is not an error; the resolver reports it as `None`.
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Rule snapshot errors
//! - 2xxx: Commission record errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::CommissionInvalidTransition);
//! assert_eq!(err.code.code(), 2001);
//!
//! let err = AppError::validation("Commission value must not be negative")
//!     .with_detail("field", "commission_value");
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
