//! Commission Record Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a commission record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum CommissionStatus {
    Pending,
    Approved,
    Paid,
}

impl CommissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Paid => "paid",
        }
    }

    /// Allowed forward moves: pending -> approved -> paid
    pub fn can_transition_to(&self, next: CommissionStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved) | (Self::Approved, Self::Paid)
        )
    }
}

impl fmt::Display for CommissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted commission entry
///
/// `commission_value` is fixed at write time; reporting always reads it
/// back instead of recomputing from the current rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionRecord {
    pub id: String,
    pub lead_id: String,
    pub employee_id: String,
    /// Canonical product key
    pub product: String,
    pub sale_amount: f64,
    #[serde(default)]
    pub payment_period: Option<u32>,
    pub commission_value: f64,
    pub commission_percentage: f64,
    /// Rule that produced the value (`None` for manual entries)
    #[serde(default)]
    pub rule_id: Option<String>,
    pub status: CommissionStatus,
    /// Created at (Unix millis)
    pub created_at: i64,
    /// Last status change (Unix millis)
    #[serde(default)]
    pub updated_at: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions_only() {
        use CommissionStatus::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Approved.can_transition_to(Paid));
        assert!(!Pending.can_transition_to(Paid));
        assert!(!Paid.can_transition_to(Pending));
        assert!(!Approved.can_transition_to(Approved));
    }

    #[test]
    fn test_status_serde_names() {
        let json = serde_json::to_string(&CommissionStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
    }
}
