use crate::core::sanitize::{cap_amount, MAX_AMOUNT};
use rust_decimal::{Decimal, RoundingStrategy};

const DECADE: Decimal = Decimal::TEN;
const MAX_OVERSHOOT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Snaps `price` so its last whole digit is `target_digit` (e.g. 100 -> 99 for target 9).
///
/// The candidate is the decade floor of `price` plus the target digit. If that lands more
/// than 5 above `price`, it steps down one decade, unless doing so would make it
/// non-positive, in which case the overshooting candidate is kept. Non-positive prices
/// become 0. Prices are capped at [`MAX_AMOUNT`] and a candidate above the cap steps down
/// one decade. The result is idempotent: a price that already ends in the target digit is
/// returned unchanged.
pub fn round_to_marketing_ending(price: Decimal, target_digit: u8) -> Decimal {
    if price <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let price = cap_amount(price);
    let target = Decimal::from(crate::core::sanitize::sanitize_target(target_digit));
    let decade_floor = (price / DECADE).floor() * DECADE;
    let candidate = decade_floor + target;

    if candidate - price > MAX_OVERSHOOT || candidate > MAX_AMOUNT {
        let stepped_down = candidate - DECADE;
        if stepped_down > Decimal::ZERO {
            return stepped_down;
        }
    }
    candidate
}

/// Ordinary two-decimal rounding, half away from zero.
pub fn round_to_cents(price: Decimal) -> Decimal {
    cap_amount(price).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// The rounding rule shared by every interval.
pub fn apply_rounding(price: Decimal, rounding_enabled: bool, target_digit: u8) -> Decimal {
    if rounding_enabled {
        round_to_marketing_ending(price, target_digit)
    } else {
        round_to_cents(price)
    }
}
