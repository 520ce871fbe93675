//! Commission Rule Model

use serde::{Deserialize, Serialize};

/// Upper bound for percentage rates
pub const MAX_PERCENTAGE: f64 = 100.0;

/// Upper bound for fixed commission values (currency units)
pub const MAX_FIXED_VALUE: f64 = 100_000_000.0;

/// How a rule pays out
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommissionType {
    /// `value` percent of the sale amount
    Percentage,
    /// `value` currency units regardless of the sale amount
    Fixed,
}

/// Payout definition shared by every rule variant
///
/// Only the field selected by `commission_type` is meaningful; the other
/// one is ignored even when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionRate {
    pub commission_type: CommissionType,
    /// Percentage in [0, 100] (percentage rules)
    #[serde(default)]
    pub percentage: Option<f64>,
    /// Currency amount in [0, MAX_FIXED_VALUE] (fixed rules)
    #[serde(default)]
    pub fixed_value: Option<f64>,
}

impl CommissionRate {
    pub fn percentage(value: f64) -> Self {
        Self {
            commission_type: CommissionType::Percentage,
            percentage: Some(value),
            fixed_value: None,
        }
    }

    pub fn fixed(value: f64) -> Self {
        Self {
            commission_type: CommissionType::Fixed,
            percentage: None,
            fixed_value: Some(value),
        }
    }

    /// The active value, or `None` when the rule is malformed
    /// (missing, not finite, negative, a percentage above 100 or a fixed
    /// value above [`MAX_FIXED_VALUE`]).
    pub fn value(&self) -> Option<f64> {
        let value = match self.commission_type {
            CommissionType::Percentage => self.percentage?,
            CommissionType::Fixed => self.fixed_value?,
        };
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        let max = match self.commission_type {
            CommissionType::Percentage => MAX_PERCENTAGE,
            CommissionType::Fixed => MAX_FIXED_VALUE,
        };
        (value <= max).then_some(value)
    }
}

/// A configured commission policy
///
/// One closed sum type covers the three rule tables so that the fields
/// meaningful to each variant are explicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommissionRule {
    /// Default rate for a canonical product
    FixedRate {
        id: String,
        product: String,
        name: String,
        #[serde(flatten)]
        rate: CommissionRate,
        active: bool,
    },
    /// Applies when the sale amount lies in `[min_amount, max_amount]`
    ValueTier {
        id: String,
        /// `None` applies to every product
        #[serde(default)]
        product: Option<String>,
        name: String,
        min_amount: f64,
        /// `None` = unbounded
        #[serde(default)]
        max_amount: Option<f64>,
        #[serde(flatten)]
        rate: CommissionRate,
        active: bool,
    },
    /// Applies when the installment count lies in `[min_period, max_period]`
    PeriodTier {
        id: String,
        /// `None` applies to every product
        #[serde(default)]
        product: Option<String>,
        name: String,
        min_period: u32,
        /// `None` = unbounded
        #[serde(default)]
        max_period: Option<u32>,
        #[serde(flatten)]
        rate: CommissionRate,
        active: bool,
    },
}

impl CommissionRule {
    pub fn id(&self) -> &str {
        match self {
            Self::FixedRate { id, .. } | Self::ValueTier { id, .. } | Self::PeriodTier { id, .. } => {
                id
            }
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::FixedRate { name, .. }
            | Self::ValueTier { name, .. }
            | Self::PeriodTier { name, .. } => name,
        }
    }

    pub fn rate(&self) -> &CommissionRate {
        match self {
            Self::FixedRate { rate, .. }
            | Self::ValueTier { rate, .. }
            | Self::PeriodTier { rate, .. } => rate,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Self::FixedRate { active, .. }
            | Self::ValueTier { active, .. }
            | Self::PeriodTier { active, .. } => *active,
        }
    }

    /// Product key this rule is scoped to (`None` = any product)
    pub fn product(&self) -> Option<&str> {
        match self {
            Self::FixedRate { product, .. } => Some(product),
            Self::ValueTier { product, .. } | Self::PeriodTier { product, .. } => {
                product.as_deref()
            }
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Self::FixedRate { .. } => RuleKind::FixedRate,
            Self::ValueTier { .. } => RuleKind::ValueTier,
            Self::PeriodTier { .. } => RuleKind::PeriodTier,
        }
    }

    /// Structural check: a usable rate and a non-inverted range.
    pub fn is_well_formed(&self) -> bool {
        if self.rate().value().is_none() {
            return false;
        }
        match self {
            Self::FixedRate { product, .. } => !product.trim().is_empty(),
            Self::ValueTier {
                min_amount,
                max_amount,
                ..
            } => {
                min_amount.is_finite()
                    && *min_amount >= 0.0
                    && max_amount.is_none_or(|max| max.is_finite() && max >= *min_amount)
            }
            Self::PeriodTier {
                min_period,
                max_period,
                ..
            } => max_period.is_none_or(|max| max >= *min_period),
        }
    }

    /// Rebuild the rule with its product key mapped through `f`
    pub fn map_product(self, f: impl Fn(&str) -> Option<String>) -> Self {
        match self {
            Self::FixedRate {
                id,
                product,
                name,
                rate,
                active,
            } => Self::FixedRate {
                id,
                product: f(&product).unwrap_or(product),
                name,
                rate,
                active,
            },
            Self::ValueTier {
                id,
                product,
                name,
                min_amount,
                max_amount,
                rate,
                active,
            } => Self::ValueTier {
                id,
                product: product.and_then(|p| f(&p)),
                name,
                min_amount,
                max_amount,
                rate,
                active,
            },
            Self::PeriodTier {
                id,
                product,
                name,
                min_period,
                max_period,
                rate,
                active,
            } => Self::PeriodTier {
                id,
                product: product.and_then(|p| f(&p)),
                name,
                min_period,
                max_period,
                rate,
                active,
            },
        }
    }
}

/// Rule variant discriminant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    FixedRate,
    ValueTier,
    PeriodTier,
}

// ========== Store rows ==========

/// Tier discriminator in the `commission_tiers` table
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TierType {
    Value,
    Period,
}

/// Row of the `commission_rates` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionRateRow {
    pub id: String,
    /// Account the row belongs to
    #[serde(default)]
    pub owner_id: Option<String>,
    pub product: String,
    pub name: String,
    pub commission_type: CommissionType,
    #[serde(default)]
    pub percentage: Option<f64>,
    #[serde(default)]
    pub fixed_value: Option<f64>,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Row of the `commission_tiers` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionTierRow {
    pub id: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    pub name: String,
    pub tier_type: TierType,
    #[serde(default)]
    pub min_amount: Option<f64>,
    #[serde(default)]
    pub max_amount: Option<f64>,
    #[serde(default)]
    pub min_period: Option<u32>,
    #[serde(default)]
    pub max_period: Option<u32>,
    pub commission_type: CommissionType,
    #[serde(default)]
    pub percentage: Option<f64>,
    #[serde(default)]
    pub fixed_value: Option<f64>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl CommissionRule {
    /// Convert a `commission_rates` row; `None` when malformed.
    pub fn from_rate_row(row: CommissionRateRow) -> Option<Self> {
        let rule = Self::FixedRate {
            id: row.id,
            product: row.product,
            name: row.name,
            rate: CommissionRate {
                commission_type: row.commission_type,
                percentage: row.percentage,
                fixed_value: row.fixed_value,
            },
            active: row.active,
        };
        rule.is_well_formed().then_some(rule)
    }

    /// Convert a `commission_tiers` row; `None` when malformed
    /// (e.g. a value tier without `min_amount`).
    pub fn from_tier_row(row: CommissionTierRow) -> Option<Self> {
        let rate = CommissionRate {
            commission_type: row.commission_type,
            percentage: row.percentage,
            fixed_value: row.fixed_value,
        };
        let product = row.product.filter(|p| !p.trim().is_empty());
        let rule = match row.tier_type {
            TierType::Value => Self::ValueTier {
                id: row.id,
                product,
                name: row.name,
                min_amount: row.min_amount?,
                max_amount: row.max_amount,
                rate,
                active: row.active,
            },
            TierType::Period => Self::PeriodTier {
                id: row.id,
                product,
                name: row.name,
                min_period: row.min_period?,
                max_period: row.max_period,
                rate,
                active: row.active,
            },
        };
        rule.is_well_formed().then_some(rule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier_row(tier_type: TierType) -> CommissionTierRow {
        CommissionTierRow {
            id: "t1".to_string(),
            owner_id: None,
            product: None,
            name: "Tier".to_string(),
            tier_type,
            min_amount: None,
            max_amount: None,
            min_period: None,
            max_period: None,
            commission_type: CommissionType::Percentage,
            percentage: Some(10.0),
            fixed_value: None,
            active: true,
        }
    }

    #[test]
    fn test_rate_value_follows_commission_type() {
        let rate = CommissionRate {
            commission_type: CommissionType::Fixed,
            percentage: Some(12.0),
            fixed_value: Some(50.0),
        };
        assert_eq!(rate.value(), Some(50.0));
    }

    #[test]
    fn test_rate_value_rejects_malformed() {
        let missing = CommissionRate {
            commission_type: CommissionType::Percentage,
            percentage: None,
            fixed_value: Some(3.0),
        };
        assert_eq!(missing.value(), None);
        assert_eq!(CommissionRate::percentage(120.0).value(), None);
        assert_eq!(CommissionRate::fixed(-1.0).value(), None);
        assert_eq!(CommissionRate::fixed(f64::NAN).value(), None);
        assert_eq!(CommissionRate::fixed(250.0).value(), Some(250.0));
    }

    #[test]
    fn test_fixed_value_upper_bound() {
        assert_eq!(
            CommissionRate::fixed(MAX_FIXED_VALUE).value(),
            Some(MAX_FIXED_VALUE)
        );
        assert_eq!(CommissionRate::fixed(1e27).value(), None);
        assert_eq!(CommissionRate::fixed(1e30).value(), None);

        let oversized = CommissionRule::FixedRate {
            id: "huge".to_string(),
            product: "FGTS".to_string(),
            name: "huge".to_string(),
            rate: CommissionRate::fixed(1e30),
            active: true,
        };
        assert!(!oversized.is_well_formed());
    }

    #[test]
    fn test_value_tier_row_requires_min_amount() {
        let row = tier_row(TierType::Value);
        assert!(CommissionRule::from_tier_row(row.clone()).is_none());

        let row = CommissionTierRow {
            min_amount: Some(0.0),
            max_amount: Some(250.0),
            ..row
        };
        let rule = CommissionRule::from_tier_row(row).unwrap();
        assert_eq!(rule.kind(), RuleKind::ValueTier);
    }

    #[test]
    fn test_period_tier_row_rejects_inverted_range() {
        let row = CommissionTierRow {
            min_period: Some(48),
            max_period: Some(12),
            ..tier_row(TierType::Period)
        };
        assert!(CommissionRule::from_tier_row(row).is_none());
    }

    #[test]
    fn test_rule_json_is_tagged_by_kind() {
        let json = r#"{
            "kind": "value_tier",
            "id": "v1",
            "name": "Up to 250",
            "min_amount": 0,
            "max_amount": 250,
            "commission_type": "percentage",
            "percentage": 15,
            "active": true
        }"#;
        let rule: CommissionRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.kind(), RuleKind::ValueTier);
        assert_eq!(rule.product(), None);
        assert_eq!(rule.rate().value(), Some(15.0));
    }

    #[test]
    fn test_map_product_keeps_any_product_tiers_open() {
        let rule = CommissionRule::PeriodTier {
            id: "p1".to_string(),
            product: None,
            name: "Long term".to_string(),
            min_period: 24,
            max_period: None,
            rate: CommissionRate::percentage(2.0),
            active: true,
        };
        let mapped = rule.map_product(|p| Some(p.to_uppercase()));
        assert_eq!(mapped.product(), None);
    }
}
