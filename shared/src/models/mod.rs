//! Data models
//!
//! Shared between the commission engine and its callers.

pub mod commission;
pub mod commission_rule;
pub mod sale;

// Re-exports
pub use commission::*;
pub use commission_rule::*;
pub use sale::*;
