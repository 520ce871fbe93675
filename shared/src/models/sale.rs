//! Sale Model

use serde::{Deserialize, Serialize};

use super::commission_rule::CommissionRule;

/// Sale descriptor handed to the resolver
///
/// Built from a lead/sale record; the resolver never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleInput {
    /// Free-text product label (normalized before lookup)
    pub product: String,
    /// Sale amount in currency units
    pub amount: f64,
    /// Installment count
    #[serde(default)]
    pub payment_period: Option<u32>,
}

impl SaleInput {
    pub fn new(product: impl Into<String>, amount: f64) -> Self {
        Self {
            product: product.into(),
            amount,
            payment_period: None,
        }
    }

    pub fn with_period(mut self, payment_period: u32) -> Self {
        self.payment_period = Some(payment_period);
        self
    }
}

/// Outcome of a successful resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionCalculationResult {
    /// The rule that produced the payout
    pub rule: CommissionRule,
    /// Payout in currency units (2 decimal places)
    pub payout: f64,
    /// Effective percentage of the sale amount; back-derived for fixed rules
    pub effective_percentage: f64,
}
