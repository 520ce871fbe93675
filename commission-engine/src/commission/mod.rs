//! Commission Engine Module
//!
//! Rule matching, payout calculation and record keeping for sales.
//! Rules are resolved once, when a commission record is written.

mod aggregation;
mod calculator;
pub mod matcher;
mod normalizer;
mod records;
mod resolver;

pub use aggregation::*;
pub use calculator::*;
pub use normalizer::*;
pub use records::*;
pub use resolver::*;
