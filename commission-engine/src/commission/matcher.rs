//! Commission Rule Matcher
//!
//! Logic for matching rules to products and checking range membership.
//! All ranges are inclusive on both ends; a missing upper bound is unbounded.

use shared::models::CommissionRule;

/// Check if a rule applies to a canonical product key
pub fn matches_product(rule: &CommissionRule, product: &str) -> bool {
    match rule.product() {
        Some(key) => key == product,
        // Tiers without a product apply to every product
        None => true,
    }
}

/// Check if `amount` lies in a value tier's range
///
/// Non-value-tier rules never match.
pub fn amount_in_range(rule: &CommissionRule, amount: f64) -> bool {
    match rule {
        CommissionRule::ValueTier {
            min_amount,
            max_amount,
            ..
        } => amount >= *min_amount && max_amount.is_none_or(|max| amount <= max),
        _ => false,
    }
}

/// Check if `period` lies in a period tier's range
///
/// Non-period-tier rules never match.
pub fn period_in_range(rule: &CommissionRule, period: u32) -> bool {
    match rule {
        CommissionRule::PeriodTier {
            min_period,
            max_period,
            ..
        } => period >= *min_period && max_period.is_none_or(|max| period <= max),
        _ => false,
    }
}

/// A rule that may take part in resolution at all
pub fn is_usable(rule: &CommissionRule) -> bool {
    rule.is_active() && rule.is_well_formed()
}
