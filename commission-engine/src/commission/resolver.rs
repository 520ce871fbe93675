//! Commission Resolver
//!
//! Selects the applicable rule for a sale and computes its payout.
//!
//! Precedence ("find best option"):
//! 1. period tiers, ascending `min_period`, when a payment period is given
//! 2. value tiers, ascending `min_amount`
//! 3. the first fixed rate configured for the product
//!
//! A step that finds nothing falls through to the next one. Absence of a
//! rule is a normal outcome and is reported as `None`, never as an error.

use std::sync::Arc;

use shared::models::{CommissionCalculationResult, CommissionRule, SaleInput};

use super::calculator::calculate_commission;
use super::matcher::{amount_in_range, is_usable, matches_product, period_in_range};
use crate::money::{MAX_SALE_AMOUNT, is_valid_amount};
use crate::snapshot::RuleSnapshot;

/// Resolves sales against one immutable rule snapshot
///
/// Cheap to clone; every clone reads the same snapshot.
#[derive(Debug, Clone)]
pub struct CommissionResolver {
    snapshot: Arc<RuleSnapshot>,
    /// Indices into `snapshot.rules()`, sorted by `min_period` (stable)
    period_tiers: Vec<usize>,
    /// Indices into `snapshot.rules()`, sorted by `min_amount` (stable)
    value_tiers: Vec<usize>,
    /// Indices into `snapshot.rules()`, configuration order
    fixed_rates: Vec<usize>,
}

impl CommissionResolver {
    pub fn new(snapshot: impl Into<Arc<RuleSnapshot>>) -> Self {
        let snapshot = snapshot.into();
        let mut period_tiers = Vec::new();
        let mut value_tiers = Vec::new();
        let mut fixed_rates = Vec::new();

        for (idx, rule) in snapshot.rules().iter().enumerate() {
            if !is_usable(rule) {
                tracing::debug!(rule_id = rule.id(), "Skipping inactive or malformed rule");
                continue;
            }
            match rule {
                CommissionRule::PeriodTier { .. } => period_tiers.push(idx),
                CommissionRule::ValueTier { .. } => value_tiers.push(idx),
                CommissionRule::FixedRate { .. } => fixed_rates.push(idx),
            }
        }

        let rules = snapshot.rules();
        period_tiers.sort_by_key(|&i| match &rules[i] {
            CommissionRule::PeriodTier { min_period, .. } => *min_period,
            _ => u32::MAX,
        });
        value_tiers.sort_by(|&a, &b| min_amount(&rules[a]).total_cmp(&min_amount(&rules[b])));

        Self {
            snapshot,
            period_tiers,
            value_tiers,
            fixed_rates,
        }
    }

    pub fn snapshot(&self) -> &RuleSnapshot {
        &self.snapshot
    }

    /// Pick the rule that applies to `sale`, if any.
    pub fn find_best_option(&self, sale: &SaleInput) -> Option<&CommissionRule> {
        if !is_valid_amount(sale.amount) {
            tracing::debug!(
                amount = sale.amount,
                max = MAX_SALE_AMOUNT,
                "Sale amount outside accepted range"
            );
            return None;
        }
        let product = self.snapshot.normalizer().normalize(&sale.product)?;
        if let Some(period) = sale.payment_period
            && let Some(rule) = self
                .candidates(&self.period_tiers, &product)
                .find(|rule| period_in_range(rule, period))
        {
            return Some(rule);
        }

        if let Some(rule) = self
            .candidates(&self.value_tiers, &product)
            .find(|rule| amount_in_range(rule, sale.amount))
        {
            return Some(rule);
        }

        self.candidates(&self.fixed_rates, &product).next()
    }

    /// Rules at `indices` that apply to `product`, in index order
    fn candidates<'a, 'p>(
        &'a self,
        indices: &'a [usize],
        product: &'p str,
    ) -> impl Iterator<Item = &'a CommissionRule> + 'p
    where
        'a: 'p,
    {
        let rules = self.snapshot.rules();
        indices
            .iter()
            .map(move |&i| &rules[i])
            .filter(move |rule| matches_product(rule, product))
    }

    /// Compute the commission `rule` pays for `sale`.
    pub fn calculate(
        &self,
        rule: &CommissionRule,
        sale: &SaleInput,
    ) -> Option<CommissionCalculationResult> {
        calculate_commission(rule, sale.amount, sale.payment_period)
    }

    /// [`find_best_option`](Self::find_best_option) followed by
    /// [`calculate`](Self::calculate).
    pub fn resolve(&self, sale: &SaleInput) -> Option<CommissionCalculationResult> {
        let result = self
            .find_best_option(sale)
            .and_then(|rule| self.calculate(rule, sale));

        match &result {
            Some(r) => tracing::debug!(
                product = %sale.product,
                amount = sale.amount,
                rule_id = r.rule.id(),
                payout = r.payout,
                "Commission resolved"
            ),
            None => tracing::debug!(
                product = %sale.product,
                amount = sale.amount,
                "No applicable commission rule"
            ),
        }
        result
    }

    /// Resolve every sale independently; output order matches input order.
    pub fn resolve_batch(&self, sales: &[SaleInput]) -> Vec<Option<CommissionCalculationResult>> {
        sales.iter().map(|sale| self.resolve(sale)).collect()
    }
}

fn min_amount(rule: &CommissionRule) -> f64 {
    match rule {
        CommissionRule::ValueTier { min_amount, .. } => *min_amount,
        _ => f64::INFINITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::CommissionRate;

    fn value_tier(id: &str, min: f64, max: Option<f64>, pct: f64) -> CommissionRule {
        CommissionRule::ValueTier {
            id: id.to_string(),
            product: None,
            name: id.to_string(),
            min_amount: min,
            max_amount: max,
            rate: CommissionRate::percentage(pct),
            active: true,
        }
    }

    fn resolver(rules: Vec<CommissionRule>) -> CommissionResolver {
        CommissionResolver::new(RuleSnapshot::from_rules(rules))
    }

    #[test]
    fn test_value_tiers_scanned_by_min_amount_not_config_order() {
        let r = resolver(vec![
            value_tier("wide", 100.0, None, 5.0),
            value_tier("low", 0.0, Some(1000.0), 8.0),
        ]);
        let rule = r.find_best_option(&SaleInput::new("X", 500.0)).unwrap();
        assert_eq!(rule.id(), "low");
    }

    #[test]
    fn test_equal_bounds_keep_configuration_order() {
        let r = resolver(vec![
            value_tier("first", 0.0, None, 5.0),
            value_tier("second", 0.0, None, 8.0),
        ]);
        let rule = r.find_best_option(&SaleInput::new("X", 10.0)).unwrap();
        assert_eq!(rule.id(), "first");
    }

    #[test]
    fn test_blank_product_short_circuits() {
        let r = resolver(vec![value_tier("any", 0.0, None, 5.0)]);
        assert!(r.resolve(&SaleInput::new("   ", 10.0)).is_none());
    }

    #[test]
    fn test_batch_preserves_order() {
        let r = resolver(vec![value_tier("low", 0.0, Some(100.0), 10.0)]);
        let out = r.resolve_batch(&[
            SaleInput::new("X", 50.0),
            SaleInput::new("X", 500.0),
            SaleInput::new("X", -1.0),
        ]);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].as_ref().map(|r| r.payout), Some(5.0));
        assert!(out[1].is_none());
        assert!(out[2].is_none());
    }
}
