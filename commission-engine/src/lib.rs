//! Commission Engine - commission resolution for loan/credit brokers
//!
//! # Overview
//!
//! Given a sale (product, amount, optional payment period) the engine selects
//! the applicable commission rule from an account's rule snapshot and computes
//! the payout and effective percentage.
//!
//! # Module structure
//!
//! ```text
//! commission-engine/src/
//! ├── commission/    # normalizer, matcher, calculator, resolver, records, aggregation
//! ├── snapshot/      # rule sources and immutable rule snapshots
//! ├── core/          # configuration
//! ├── utils/         # logging, validation
//! └── money.rs       # Decimal helpers
//! ```

pub mod commission;
pub mod core;
pub mod money;
pub mod snapshot;
pub mod utils;

// Re-export public types
pub use commission::{CommissionResolver, CommissionSummary, ProductNormalizer};
pub use core::Config;
pub use snapshot::{JsonFileSource, RuleSnapshot, RuleSource, StaticSource};

// Re-export unified error types from shared
pub use shared::{AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};
