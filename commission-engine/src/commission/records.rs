//! Commission Records
//!
//! Write-time creation of commission entries and their status lifecycle.
//! The resolver runs once, when the record is created; the stored
//! `commission_value` is never recomputed afterwards.

use shared::models::{CommissionRecord, CommissionStatus, MAX_FIXED_VALUE, SaleInput};
use shared::{AppError, AppResult, ErrorCode};

use super::normalizer::ProductNormalizer;
use super::resolver::CommissionResolver;
use crate::audit_log;
use crate::money::{is_valid_amount, to_decimal, to_f64, to_rate};
use crate::utils::validation::{MAX_ID_LEN, MAX_PRODUCT_LEN, validate_required_text};
use rust_decimal::Decimal;

/// Who earned the commission on which lead
#[derive(Debug, Clone)]
pub struct CommissionOwner<'a> {
    pub lead_id: &'a str,
    pub employee_id: &'a str,
}

impl CommissionOwner<'_> {
    fn validate(&self) -> AppResult<()> {
        validate_required_text(self.lead_id, "lead_id", MAX_ID_LEN)?;
        validate_required_text(self.employee_id, "employee_id", MAX_ID_LEN)
    }
}

/// Create a pending record from the rule that applies to `sale`.
///
/// `Ok(None)` when no rule applies (or the sale amount is not usable); the
/// caller decides whether to fall back to [`manual_commission`].
pub fn record_commission(
    resolver: &CommissionResolver,
    owner: &CommissionOwner<'_>,
    sale: &SaleInput,
    now_millis: i64,
) -> AppResult<Option<CommissionRecord>> {
    owner.validate()?;

    let Some(result) = resolver.resolve(sale) else {
        return Ok(None);
    };
    let product = resolver
        .snapshot()
        .normalizer()
        .normalize(&sale.product)
        .unwrap_or_default();

    let record = CommissionRecord {
        id: uuid::Uuid::new_v4().to_string(),
        lead_id: owner.lead_id.to_string(),
        employee_id: owner.employee_id.to_string(),
        product,
        sale_amount: sale.amount,
        payment_period: sale.payment_period,
        commission_value: result.payout,
        commission_percentage: result.effective_percentage,
        rule_id: Some(result.rule.id().to_string()),
        status: CommissionStatus::Pending,
        created_at: now_millis,
        updated_at: None,
    };

    let resource = format!("commission:{}", record.id);
    let details = format!(
        "lead={} rule={} value={:.2}",
        record.lead_id,
        result.rule.id(),
        record.commission_value
    );
    audit_log!(
        record.employee_id.as_str(),
        "create",
        resource.as_str(),
        details.as_str()
    );
    Ok(Some(record))
}

/// Create a pending record with a caller-entered value.
///
/// Used when no rule applies; the percentage is back-derived from the sale.
pub fn manual_commission(
    owner: &CommissionOwner<'_>,
    sale: &SaleInput,
    commission_value: f64,
    now_millis: i64,
) -> AppResult<CommissionRecord> {
    owner.validate()?;

    if !is_valid_amount(sale.amount) {
        return Err(AppError::new(ErrorCode::SaleInvalidAmount).with_detail("amount", sale.amount));
    }
    if !commission_value.is_finite()
        || commission_value < 0.0
        || commission_value > MAX_FIXED_VALUE
    {
        return Err(AppError::with_message(
            ErrorCode::CommissionInvalidValue,
            format!(
                "commission_value must be between 0 and {MAX_FIXED_VALUE}, got {commission_value}"
            ),
        ));
    }

    let (value, percentage) = to_decimal(commission_value)
        .zip(to_decimal(sale.amount))
        .and_then(|(value, amount)| {
            let percentage = value
                .checked_div(amount)?
                .checked_mul(Decimal::ONE_HUNDRED)?;
            Some((value, percentage))
        })
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::CommissionInvalidValue,
                "commission_value is out of range for this sale amount",
            )
            .with_detail("amount", sale.amount)
        })?;
    validate_required_text(&sale.product, "product", MAX_PRODUCT_LEN)?;
    let product = ProductNormalizer::new()
        .normalize(&sale.product)
        .ok_or_else(|| AppError::with_message(ErrorCode::RequiredField, "product must not be empty"))?;

    let record = CommissionRecord {
        id: uuid::Uuid::new_v4().to_string(),
        lead_id: owner.lead_id.to_string(),
        employee_id: owner.employee_id.to_string(),
        product,
        sale_amount: sale.amount,
        payment_period: sale.payment_period,
        commission_value: to_f64(value),
        commission_percentage: to_rate(percentage),
        rule_id: None,
        status: CommissionStatus::Pending,
        created_at: now_millis,
        updated_at: None,
    };

    let resource = format!("commission:{}", record.id);
    audit_log!(
        record.employee_id.as_str(),
        "create_manual",
        resource.as_str()
    );
    Ok(record)
}

/// Move a record to `next` (pending -> approved -> paid).
pub fn transition_status(
    record: &mut CommissionRecord,
    next: CommissionStatus,
    now_millis: i64,
) -> AppResult<()> {
    if !record.status.can_transition_to(next) {
        return Err(
            AppError::invalid_transition(record.status.as_str(), next.as_str())
                .with_detail("commission_id", record.id.clone()),
        );
    }

    tracing::info!(
        commission_id = %record.id,
        from = %record.status,
        to = %next,
        "Commission status changed"
    );
    record.status = next;
    record.updated_at = Some(now_millis);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::RuleSnapshot;
    use shared::models::{CommissionRate, CommissionRule};

    const NOW: i64 = 1_760_000_000_000;

    fn owner() -> CommissionOwner<'static> {
        CommissionOwner {
            lead_id: "lead-1",
            employee_id: "emp-1",
        }
    }

    fn resolver() -> CommissionResolver {
        CommissionResolver::new(RuleSnapshot::from_rules(vec![CommissionRule::FixedRate {
            id: "pix".to_string(),
            product: "CREDITO PIX/CARTAO".to_string(),
            name: "Pix".to_string(),
            rate: CommissionRate::percentage(1.5),
            active: true,
        }]))
    }

    #[test]
    fn test_record_commission_stores_resolved_value() {
        let sale = SaleInput::new("pix", 1000.0);
        let record = record_commission(&resolver(), &owner(), &sale, NOW)
            .unwrap()
            .unwrap();
        assert_eq!(record.product, "CREDITO PIX/CARTAO");
        assert_eq!(record.commission_value, 15.0);
        assert_eq!(record.commission_percentage, 1.5);
        assert_eq!(record.rule_id.as_deref(), Some("pix"));
        assert_eq!(record.status, CommissionStatus::Pending);
        assert_eq!(record.created_at, NOW);
    }

    #[test]
    fn test_record_commission_without_rule_is_none() {
        let sale = SaleInput::new("FGTS", 1000.0);
        assert!(record_commission(&resolver(), &owner(), &sale, NOW)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_record_commission_validates_owner() {
        let sale = SaleInput::new("pix", 1000.0);
        let bad = CommissionOwner {
            lead_id: " ",
            employee_id: "emp-1",
        };
        let err = record_commission(&resolver(), &bad, &sale, NOW).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_manual_commission() {
        let sale = SaleInput::new("Seguro", 800.0);
        let record = manual_commission(&owner(), &sale, 40.0, NOW).unwrap();
        assert_eq!(record.commission_value, 40.0);
        assert_eq!(record.commission_percentage, 5.0);
        assert!(record.rule_id.is_none());
        assert_eq!(record.product, "SEGURO");

        let err = manual_commission(&owner(), &sale, -1.0, NOW).unwrap_err();
        assert_eq!(err.code, ErrorCode::CommissionInvalidValue);
        let err = manual_commission(&owner(), &SaleInput::new("Seguro", 0.0), 1.0, NOW)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SaleInvalidAmount);
    }

    #[test]
    fn test_manual_commission_rejects_oversized_value() {
        let err = manual_commission(&owner(), &SaleInput::new("Seguro", 0.01), 1e27, NOW)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CommissionInvalidValue);

        // Within the bound, but the back-derived percentage does not fit
        let err = manual_commission(&owner(), &SaleInput::new("Seguro", 1e-20), 1e8, NOW)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CommissionInvalidValue);
    }

    #[test]
    fn test_status_lifecycle() {
        let sale = SaleInput::new("Seguro", 800.0);
        let mut record = manual_commission(&owner(), &sale, 40.0, NOW).unwrap();

        let err = transition_status(&mut record, CommissionStatus::Paid, NOW).unwrap_err();
        assert_eq!(err.code, ErrorCode::CommissionInvalidTransition);
        assert_eq!(record.status, CommissionStatus::Pending);

        transition_status(&mut record, CommissionStatus::Approved, NOW + 1).unwrap();
        transition_status(&mut record, CommissionStatus::Paid, NOW + 2).unwrap();
        assert_eq!(record.status, CommissionStatus::Paid);
        assert_eq!(record.updated_at, Some(NOW + 2));

        assert!(transition_status(&mut record, CommissionStatus::Pending, NOW + 3).is_err());
    }
}
