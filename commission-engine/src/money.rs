//! Money calculation utilities using rust_decimal for precision
//!
//! All commission arithmetic is done using `Decimal` internally, then
//! converted to `f64` for storage/serialization. Callers use the checked
//! `Decimal` operations; an overflow means "no result", never a panic.

use rust_decimal::prelude::*;

/// Rounding for monetary values (2 decimal places, half away from zero)
const DECIMAL_PLACES: u32 = 2;

/// Rounding for effective percentages
const RATE_DECIMAL_PLACES: u32 = 4;

/// Maximum sale amount accepted by the resolver (R$ 100,000,000)
pub const MAX_SALE_AMOUNT: f64 = 100_000_000.0;

/// Convert f64 to Decimal for calculation
///
/// `None` for NaN, infinities and magnitudes `Decimal` cannot hold.
#[inline]
pub fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value)
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Convert a percentage Decimal to f64, rounded to 4 decimal places
#[inline]
pub fn to_rate(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(RATE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// A sale amount the resolver will work with: finite, > 0, within bounds
#[inline]
pub fn is_valid_amount(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0 && amount <= MAX_SALE_AMOUNT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_f64_rounds_half_away_from_zero() {
        assert_eq!(to_f64(Decimal::new(10005, 3)), 10.01);
        assert_eq!(to_f64(Decimal::new(-10005, 3)), -10.01);
        assert_eq!(to_f64(Decimal::new(3750, 2)), 37.5);
    }

    #[test]
    fn test_to_rate_keeps_four_places() {
        // 15 / 1000 * 100 = 1.5
        let rate = to_decimal(15.0).unwrap() / to_decimal(1000.0).unwrap() * Decimal::ONE_HUNDRED;
        assert_eq!(to_rate(rate), 1.5);
        // 100 / 3 = 33.3333...
        let rate = Decimal::ONE_HUNDRED / Decimal::from(3);
        assert_eq!(to_rate(rate), 33.3333);
    }

    #[test]
    fn test_to_decimal_rejects_unrepresentable() {
        assert_eq!(to_decimal(250.5), Some(Decimal::new(2505, 1)));
        assert_eq!(to_decimal(1e30), None);
        assert_eq!(to_decimal(f64::NAN), None);
        assert_eq!(to_decimal(f64::INFINITY), None);
    }

    #[test]
    fn test_is_valid_amount() {
        assert!(is_valid_amount(0.01));
        assert!(is_valid_amount(250.0));
        assert!(!is_valid_amount(0.0));
        assert!(!is_valid_amount(-5.0));
        assert!(!is_valid_amount(f64::NAN));
        assert!(!is_valid_amount(f64::INFINITY));
        assert!(!is_valid_amount(MAX_SALE_AMOUNT * 2.0));
    }
}
