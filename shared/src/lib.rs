//! Shared types for the commission engine
//!
//! Common types used across crates: commission rule models, sale
//! descriptors, persisted commission records and the unified error system.

pub mod error;
pub mod models;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
