//! Money conversion using rust_decimal
//!
//! Amounts are stored as integer minor units (2 decimal places) and exposed
//! as `Decimal`. All arithmetic on stored amounts happens on the integers,
//! so sums never drift.

use rust_decimal::prelude::*;
use thiserror::Error;

/// Decimal places kept for every stored amount
pub const DECIMAL_PLACES: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("amount must be non-negative, got {0}")]
    Negative(Decimal),
    #[error("amount must have at most 2 decimal places, got {0}")]
    TooPrecise(Decimal),
    #[error("amount is out of range")]
    OutOfRange,
}

/// Convert a decimal amount into minor units
pub fn to_cents(amount: Decimal) -> Result<i64, MoneyError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(MoneyError::Negative(amount));
    }
    if amount.normalize().scale() > DECIMAL_PLACES {
        return Err(MoneyError::TooPrecise(amount));
    }
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|d| d.to_i64())
        .ok_or(MoneyError::OutOfRange)
}

/// Convert minor units into a decimal amount
#[inline]
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, DECIMAL_PLACES)
}

/// `price * quantity` in minor units
pub fn line_subtotal(price_cents: i64, quantity: i64) -> Result<i64, MoneyError> {
    price_cents
        .checked_mul(quantity)
        .ok_or(MoneyError::OutOfRange)
}

/// Unweighted arithmetic mean, `None` for an empty slice
pub fn mean(amounts: &[Decimal]) -> Option<Decimal> {
    if amounts.is_empty() {
        return None;
    }
    let sum = amounts
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))?;
    sum.checked_div(Decimal::from(amounts.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_to_cents() {
        assert_eq!(to_cents(dec("5.00")), Ok(500));
        assert_eq!(to_cents(dec("19.99")), Ok(1999));
        assert_eq!(to_cents(dec("10.5")), Ok(1050));
        assert_eq!(to_cents(dec("0")), Ok(0));
        assert_eq!(to_cents(dec("-0.00")), Ok(0));
    }

    #[test]
    fn test_to_cents_rejects_invalid() {
        assert!(matches!(to_cents(dec("-1")), Err(MoneyError::Negative(_))));
        assert!(matches!(
            to_cents(dec("1.005")),
            Err(MoneyError::TooPrecise(_))
        ));
        // Trailing zeros beyond two places are fine
        assert_eq!(to_cents(dec("1.5000")), Ok(150));
    }

    #[test]
    fn test_from_cents() {
        assert_eq!(from_cents(1500), dec("15.00"));
        assert_eq!(from_cents(1500).to_string(), "15.00");
    }

    #[test]
    fn test_line_subtotal() {
        assert_eq!(line_subtotal(500, 3), Ok(1500));
        assert_eq!(line_subtotal(i64::MAX, 2), Err(MoneyError::OutOfRange));
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(
            mean(&[dec("10"), dec("20"), dec("30")]),
            Some(dec("20"))
        );
        assert_eq!(mean(&[dec("1.00"), dec("2.00")]), Some(dec("1.5")));
    }
}
