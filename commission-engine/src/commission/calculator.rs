//! Commission Calculator
//!
//! Computes the payout and effective percentage for an already matched rule.
//! Uses rust_decimal for precise calculations, stores as f64.

use rust_decimal::prelude::*;
use shared::models::{CommissionCalculationResult, CommissionRule, CommissionType};

use super::matcher::{amount_in_range, period_in_range};
use crate::money::{is_valid_amount, to_decimal, to_f64, to_rate};

/// Calculate the commission a rule pays for a sale.
///
/// The rule's range is checked again here so that callers handing in a rule
/// from elsewhere cannot get a payout outside it. Returns `None` for an
/// invalid amount, a malformed rate, or an out-of-range sale.
pub fn calculate_commission(
    rule: &CommissionRule,
    amount: f64,
    payment_period: Option<u32>,
) -> Option<CommissionCalculationResult> {
    if !is_valid_amount(amount) {
        return None;
    }

    match rule {
        CommissionRule::ValueTier { .. } if !amount_in_range(rule, amount) => {
            tracing::debug!(rule_id = rule.id(), amount, "Amount outside value tier");
            return None;
        }
        CommissionRule::PeriodTier { .. } => {
            let in_range = payment_period.is_some_and(|p| period_in_range(rule, p));
            if !in_range {
                tracing::debug!(
                    rule_id = rule.id(),
                    ?payment_period,
                    "Payment period outside period tier"
                );
                return None;
            }
        }
        _ => {}
    }

    let rate = rule.rate();
    let value = to_decimal(rate.value()?)?;
    let amount = to_decimal(amount)?;

    let Some((payout, percentage)) = payout_and_percentage(rate.commission_type, value, amount)
    else {
        tracing::debug!(rule_id = rule.id(), "Commission arithmetic out of range");
        return None;
    };

    Some(CommissionCalculationResult {
        rule: rule.clone(),
        payout: to_f64(payout),
        effective_percentage: to_rate(percentage),
    })
}

/// `(payout, effective percentage)`; `None` on overflow or a zero amount
fn payout_and_percentage(
    commission_type: CommissionType,
    value: Decimal,
    amount: Decimal,
) -> Option<(Decimal, Decimal)> {
    match commission_type {
        CommissionType::Fixed => {
            let percentage = value
                .checked_div(amount)?
                .checked_mul(Decimal::ONE_HUNDRED)?;
            Some((value, percentage))
        }
        CommissionType::Percentage => {
            let payout = amount
                .checked_mul(value)?
                .checked_div(Decimal::ONE_HUNDRED)?;
            Some((payout, value))
        }
    }
}
