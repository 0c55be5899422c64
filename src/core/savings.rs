use crate::core::rounding::round_to_cents;
use crate::core::sanitize::{sanitize_amount, sanitize_percent};
use rust_decimal::Decimal;

/// What a customer saves versus paying `base_price` every month. Never negative:
/// a price above the undiscounted total reports 0. Both amounts are capped first, so
/// the product stays in range.
pub fn compute_savings(base_price: Decimal, months: u32, actual_price: Decimal) -> Decimal {
    let undiscounted = sanitize_amount(base_price) * Decimal::from(months);
    (undiscounted - sanitize_amount(actual_price)).max(Decimal::ZERO)
}

/// The discount percent that would produce `price` from `base_price × months`,
/// clamped to the allowed discount range. Display only.
pub fn implied_discount(base_price: Decimal, months: u32, price: Decimal) -> Decimal {
    let undiscounted = sanitize_amount(base_price) * Decimal::from(months);
    let price = sanitize_amount(price);
    // 高於原價即為 0% 折扣，也避免極小原價的除法溢位
    if undiscounted.is_zero() || price >= undiscounted {
        return Decimal::ZERO;
    }

    let ratio = price / undiscounted;
    sanitize_percent(round_to_cents((Decimal::ONE - ratio) * Decimal::ONE_HUNDRED))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn test_savings_against_monthly_total() {
        assert_eq!(compute_savings(d(100), 12, d(900)), d(300));
        assert_eq!(compute_savings(d(100), 3, d(269)), d(31));
        assert_eq!(compute_savings(d(100), 1, d(100)), d(0));
    }

    #[test]
    fn test_savings_never_negative() {
        assert_eq!(compute_savings(d(100), 12, d(1500)), d(0));
        assert_eq!(compute_savings(d(0), 6, d(10)), d(0));
    }

    #[test]
    fn test_huge_inputs_do_not_overflow() {
        use crate::core::sanitize::MAX_AMOUNT;

        assert_eq!(compute_savings(Decimal::MAX, 12, Decimal::MAX), MAX_AMOUNT * d(11));
        assert_eq!(compute_savings(Decimal::MAX, 1, Decimal::ZERO), MAX_AMOUNT);
        assert_eq!(implied_discount(Decimal::MAX, 12, Decimal::MAX), d(50));
        assert_eq!(implied_discount(Decimal::MAX, 1, Decimal::MAX), d(0));
        assert_eq!(implied_discount(Decimal::new(1, 28), 1, Decimal::MAX), d(0));
    }

    #[test]
    fn test_implied_discount() {
        assert_eq!(implied_discount(d(100), 12, d(900)), d(25));
        assert_eq!(implied_discount(d(100), 3, d(200)), Decimal::new(3333, 2));
        // below cost clamps at the discount ceiling
        assert_eq!(implied_discount(d(100), 12, d(500)), d(50));
        // above the undiscounted total clamps at 0
        assert_eq!(implied_discount(d(100), 3, d(400)), d(0));
        assert_eq!(implied_discount(d(0), 3, d(10)), d(0));
    }
}
