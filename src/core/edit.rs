use crate::core::sanitize::{parse_amount, parse_percent, parse_target};
use crate::domain::model::BillingInterval;
use crate::utils::error::PricingError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// One user edit from the settings form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingEdit {
    BasePrice(Decimal),
    Discount(BillingInterval, Decimal),
    RoundingEnabled(bool),
    RoundingTarget(u8),
    ManualPrice(BillingInterval, Decimal),
    ToggleMode,
}

fn invalid(input: &str, reason: impl Into<String>) -> PricingError {
    PricingError::InvalidEditError {
        input: input.to_string(),
        reason: reason.into(),
    }
}

fn parse_interval(input: &str, key: &str) -> Result<BillingInterval, PricingError> {
    BillingInterval::from_key(key)
        .ok_or_else(|| invalid(input, format!("unknown interval '{}'", key)))
}

fn parse_flag(input: &str, value: &str) -> Result<bool, PricingError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(invalid(input, format!("expected on/off, got '{}'", other))),
    }
}

/// Text form used on the command line: `base=120`, `discount:yearly=30`,
/// `rounding=on`, `target=9`, `price:yearly=500`, `toggle`.
/// Only the shape is validated; numbers are sanitized rather than rejected.
impl FromStr for PricingEdit {
    type Err = PricingError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("toggle") {
            return Ok(PricingEdit::ToggleMode);
        }

        let (field, value) = trimmed
            .split_once('=')
            .ok_or_else(|| invalid(input, "expected <field>=<value> or 'toggle'"))?;
        let (name, interval) = match field.split_once(':') {
            Some((name, key)) => (name.trim(), Some(key)),
            None => (field.trim(), None),
        };

        match (name.to_ascii_lowercase().as_str(), interval) {
            ("base", None) => Ok(PricingEdit::BasePrice(parse_amount(value))),
            ("rounding", None) => Ok(PricingEdit::RoundingEnabled(parse_flag(input, value)?)),
            ("target", None) => Ok(PricingEdit::RoundingTarget(parse_target(value))),
            ("discount", Some(key)) => Ok(PricingEdit::Discount(
                parse_interval(input, key)?,
                parse_percent(value),
            )),
            ("price", Some(key)) => Ok(PricingEdit::ManualPrice(
                parse_interval(input, key)?,
                parse_amount(value),
            )),
            ("discount", None) | ("price", None) => {
                Err(invalid(input, "an interval is required, e.g. discount:yearly=30"))
            }
            _ => Err(invalid(input, format!("unknown field '{}'", field.trim()))),
        }
    }
}
