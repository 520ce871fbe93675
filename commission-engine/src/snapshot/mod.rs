//! Rule Snapshot
//!
//! Explicit configuration-loading step: one fetch from a [`RuleSource`]
//! produces an immutable [`RuleSnapshot`] that resolvers read from.
//! Refreshing rules means loading a new snapshot; nothing is mutated in place.

mod source;

pub use source::*;

use serde::Serialize;
use shared::AppResult;
use shared::models::{CommissionRule, RuleKind};

use crate::commission::ProductNormalizer;

/// Counters describing how a snapshot was assembled
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SnapshotStats {
    pub fixed_rates: usize,
    pub value_tiers: usize,
    pub period_tiers: usize,
    /// Rows with `active = false`
    pub skipped_inactive: usize,
    /// Rows that could not be turned into a rule
    pub skipped_malformed: usize,
    /// Rows owned by another account
    pub skipped_foreign: usize,
}

impl SnapshotStats {
    pub fn total_rules(&self) -> usize {
        self.fixed_rates + self.value_tiers + self.period_tiers
    }

    fn count(&mut self, rule: &CommissionRule) {
        match rule.kind() {
            RuleKind::FixedRate => self.fixed_rates += 1,
            RuleKind::ValueTier => self.value_tiers += 1,
            RuleKind::PeriodTier => self.period_tiers += 1,
        }
    }
}

/// Immutable rule set for one account
#[derive(Debug, Clone)]
pub struct RuleSnapshot {
    rules: Vec<CommissionRule>,
    normalizer: ProductNormalizer,
    stats: SnapshotStats,
}

impl RuleSnapshot {
    /// Build from typed rules using the built-in product aliases
    pub fn from_rules(rules: Vec<CommissionRule>) -> Self {
        Self::with_normalizer(rules, ProductNormalizer::new())
    }

    /// Build from typed rules; product keys are normalized with `normalizer`
    pub fn with_normalizer(rules: Vec<CommissionRule>, normalizer: ProductNormalizer) -> Self {
        let mut stats = SnapshotStats::default();
        let rules: Vec<CommissionRule> = rules
            .into_iter()
            .map(|rule| rule.map_product(|p| normalizer.normalize(p)))
            .collect();
        for rule in &rules {
            stats.count(rule);
        }
        Self {
            rules,
            normalizer,
            stats,
        }
    }

    /// Fetch once from `source` and assemble the snapshot.
    ///
    /// Rows owned by another account (when `owner_id` is given), inactive rows
    /// and malformed rows are left out; malformed rows are logged.
    pub fn load(source: &dyn RuleSource, owner_id: Option<&str>) -> AppResult<Self> {
        let export = source.fetch()?;
        let normalizer = ProductNormalizer::with_aliases(&export.product_aliases);
        let mut stats = SnapshotStats::default();
        let mut rules = Vec::new();

        let belongs = |row_owner: &Option<String>| match (owner_id, row_owner) {
            (Some(owner), Some(row_owner)) => owner == row_owner,
            _ => true,
        };

        for row in export.commission_rates {
            if !belongs(&row.owner_id) {
                stats.skipped_foreign += 1;
                continue;
            }
            if !row.active {
                stats.skipped_inactive += 1;
                continue;
            }
            let id = row.id.clone();
            match CommissionRule::from_rate_row(row) {
                Some(rule) => rules.push(rule),
                None => {
                    tracing::warn!(rule_id = %id, table = "commission_rates", "Skipping malformed commission rule");
                    stats.skipped_malformed += 1;
                }
            }
        }

        for row in export.commission_tiers {
            if !belongs(&row.owner_id) {
                stats.skipped_foreign += 1;
                continue;
            }
            if !row.active {
                stats.skipped_inactive += 1;
                continue;
            }
            let id = row.id.clone();
            match CommissionRule::from_tier_row(row) {
                Some(rule) => rules.push(rule),
                None => {
                    tracing::warn!(rule_id = %id, table = "commission_tiers", "Skipping malformed commission rule");
                    stats.skipped_malformed += 1;
                }
            }
        }

        let mut snapshot = Self::with_normalizer(rules, normalizer);
        snapshot.stats.skipped_inactive = stats.skipped_inactive;
        snapshot.stats.skipped_malformed = stats.skipped_malformed;
        snapshot.stats.skipped_foreign = stats.skipped_foreign;

        tracing::info!(
            source = %source.describe(),
            rules = snapshot.stats.total_rules(),
            skipped_malformed = snapshot.stats.skipped_malformed,
            "Commission rule snapshot loaded"
        );
        Ok(snapshot)
    }

    pub fn rules(&self) -> &[CommissionRule] {
        &self.rules
    }

    pub fn normalizer(&self) -> &ProductNormalizer {
        &self.normalizer
    }

    pub fn stats(&self) -> &SnapshotStats {
        &self.stats
    }
}
