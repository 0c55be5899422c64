//! Boundary sanitizing. Nothing in the engine fails on bad numbers: amounts that are
//! negative or unparseable become 0, amounts above [`MAX_AMOUNT`] are capped, discounts
//! are clamped, target digits are clamped.

use rust_decimal::Decimal;
use std::str::FromStr;

pub const MAX_DISCOUNT_PERCENT: u32 = 50;
pub const MAX_ROUNDING_TARGET: u8 = 9;

/// Largest amount any price, base price or interval total may take (10^15).
/// `base × 12 × 100` for a capped base stays far inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Bounds an amount to `[0, MAX_AMOUNT]` without logging; used on computed totals.
pub fn cap_amount(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, MAX_AMOUNT)
}

pub fn sanitize_amount(value: Decimal) -> Decimal {
    if value > MAX_AMOUNT {
        tracing::warn!("Amount {} exceeds the maximum, capped to {}", value, MAX_AMOUNT);
    }
    cap_amount(value)
}

pub fn sanitize_percent(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, Decimal::from(MAX_DISCOUNT_PERCENT))
}

pub fn sanitize_target(digit: u8) -> u8 {
    digit.min(MAX_ROUNDING_TARGET)
}

/// Parses user input such as `"49.99"` or `"1e2"`. `NaN`, `inf`, garbage and negatives yield 0.
pub fn parse_amount(input: &str) -> Decimal {
    let trimmed = input.trim();
    let parsed = Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed));
    match parsed {
        Ok(value) => sanitize_amount(value),
        Err(_) => {
            tracing::debug!("Unparseable amount '{}', treating as 0", input);
            Decimal::ZERO
        }
    }
}

pub fn parse_percent(input: &str) -> Decimal {
    let trimmed = input.trim().trim_end_matches('%');
    match Decimal::from_str(trimmed) {
        Ok(value) => sanitize_percent(value),
        Err(_) => {
            tracing::debug!("Unparseable discount '{}', treating as 0", input);
            Decimal::ZERO
        }
    }
}

/// Digits outside 0-9 are clamped; anything unparseable falls back to 9.
pub fn parse_target(input: &str) -> u8 {
    match input.trim().parse::<i64>() {
        Ok(value) => value.clamp(0, i64::from(MAX_ROUNDING_TARGET)) as u8,
        Err(_) => MAX_ROUNDING_TARGET,
    }
}
