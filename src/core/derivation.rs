use crate::core::intervals;
use crate::core::rounding::apply_rounding;
use crate::core::sanitize::{cap_amount, sanitize_amount, sanitize_percent};
use crate::domain::model::{BillingInterval, DiscountSet, PriceSet};
use rust_decimal::Decimal;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Total price for one interval: `base × months × (1 − discount/100)`, then rounded.
/// The whole-interval total is rounded, not the per-month equivalent. Totals above
/// [`MAX_AMOUNT`](crate::core::sanitize::MAX_AMOUNT) are capped before rounding.
pub fn derive_interval_price(
    base_price: Decimal,
    interval: BillingInterval,
    discount_percent: Decimal,
    rounding_enabled: bool,
    rounding_target: u8,
) -> Decimal {
    let base_price = sanitize_amount(base_price);
    if base_price.is_zero() {
        return Decimal::ZERO;
    }

    // 月付不打折
    let discount = if interval.is_monthly() {
        Decimal::ZERO
    } else {
        sanitize_percent(discount_percent)
    };

    let months = Decimal::from(intervals::months_for(interval));
    // base 已限制在 MAX_AMOUNT 內，乘上 12 × 100 不會溢位
    let raw_total = base_price * months * (HUNDRED - discount) / HUNDRED;
    apply_rounding(cap_amount(raw_total), rounding_enabled, rounding_target)
}

pub fn derive_prices(
    base_price: Decimal,
    discounts: &DiscountSet,
    rounding_enabled: bool,
    rounding_target: u8,
) -> PriceSet {
    let mut prices = PriceSet::zero();
    for interval in BillingInterval::ALL {
        let price = derive_interval_price(
            base_price,
            interval,
            discounts.get(interval),
            rounding_enabled,
            rounding_target,
        );
        prices.set(interval, price);
    }
    prices
}
