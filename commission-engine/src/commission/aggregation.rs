//! Commission Aggregation
//!
//! Totals for reporting views. Only the persisted `commission_value` of each
//! record is summed; rules are never consulted here, so totals stay stable
//! when the rule configuration changes later.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{CommissionRecord, CommissionStatus};

use crate::money::{to_decimal, to_f64};

/// Count and total for one status
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatusTotal {
    pub count: usize,
    pub total: f64,
}

/// Totals grouped by status
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommissionSummary {
    pub pending: StatusTotal,
    pub approved: StatusTotal,
    pub paid: StatusTotal,
    /// Sum over every status
    pub total: f64,
    pub count: usize,
}

#[derive(Default)]
struct Accumulator {
    pending: (usize, Decimal),
    approved: (usize, Decimal),
    paid: (usize, Decimal),
}

impl Accumulator {
    fn add(&mut self, record: &CommissionRecord) {
        let value = to_decimal(record.commission_value).unwrap_or_else(|| {
            tracing::warn!(commission_id = %record.id, "Ignoring unrepresentable commission value");
            Decimal::ZERO
        });
        let slot = match record.status {
            CommissionStatus::Pending => &mut self.pending,
            CommissionStatus::Approved => &mut self.approved,
            CommissionStatus::Paid => &mut self.paid,
        };
        slot.0 += 1;
        slot.1 = slot.1.saturating_add(value);
    }

    fn finish(self) -> CommissionSummary {
        let total = self
            .pending
            .1
            .saturating_add(self.approved.1)
            .saturating_add(self.paid.1);
        let status_total = |(count, sum): (usize, Decimal)| StatusTotal {
            count,
            total: to_f64(sum),
        };
        CommissionSummary {
            count: self.pending.0 + self.approved.0 + self.paid.0,
            total: to_f64(total),
            pending: status_total(self.pending),
            approved: status_total(self.approved),
            paid: status_total(self.paid),
        }
    }
}

impl CommissionSummary {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a CommissionRecord>,
    {
        let mut acc = Accumulator::default();
        for record in records {
            acc.add(record);
        }
        acc.finish()
    }

    pub fn for_status(&self, status: CommissionStatus) -> StatusTotal {
        match status {
            CommissionStatus::Pending => self.pending,
            CommissionStatus::Approved => self.approved,
            CommissionStatus::Paid => self.paid,
        }
    }
}

/// Per-employee summaries, ordered by employee id
pub fn summarize_by_employee<'a, I>(records: I) -> BTreeMap<String, CommissionSummary>
where
    I: IntoIterator<Item = &'a CommissionRecord>,
{
    let mut groups: BTreeMap<String, Accumulator> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.employee_id.clone())
            .or_default()
            .add(record);
    }
    groups
        .into_iter()
        .map(|(employee, acc)| (employee, acc.finish()))
        .collect()
}
