use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported billing periods. Durations and default discounts live in
/// [`crate::core::intervals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingInterval {
    Monthly,
    Quarterly,
    SixMonths,
    Yearly,
}

impl BillingInterval {
    pub const ALL: [BillingInterval; 4] = [
        BillingInterval::Monthly,
        BillingInterval::Quarterly,
        BillingInterval::SixMonths,
        BillingInterval::Yearly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BillingInterval::Monthly => "monthly",
            BillingInterval::Quarterly => "quarterly",
            BillingInterval::SixMonths => "six_months",
            BillingInterval::Yearly => "yearly",
        }
    }

    /// Accepts the snake_case key plus the camelCase spelling used by the settings form.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "monthly" => Some(BillingInterval::Monthly),
            "quarterly" => Some(BillingInterval::Quarterly),
            "six_months" | "sixmonths" | "semiannual" => Some(BillingInterval::SixMonths),
            "yearly" | "annual" => Some(BillingInterval::Yearly),
            _ => None,
        }
    }

    pub fn is_monthly(&self) -> bool {
        matches!(self, BillingInterval::Monthly)
    }
}

impl fmt::Display for BillingInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    #[default]
    Automatic,
    Manual,
}

impl PricingMode {
    pub fn toggled(self) -> Self {
        match self {
            PricingMode::Automatic => PricingMode::Manual,
            PricingMode::Manual => PricingMode::Automatic,
        }
    }
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingMode::Automatic => f.write_str("automatic"),
            PricingMode::Manual => f.write_str("manual"),
        }
    }
}

/// Discount percent per interval. The monthly entry is not stored and always reads as 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "DiscountFields")]
pub struct DiscountSet {
    quarterly: Decimal,
    six_months: Decimal,
    yearly: Decimal,
}

#[derive(Deserialize)]
struct DiscountFields {
    #[serde(default)]
    quarterly: Decimal,
    #[serde(default)]
    six_months: Decimal,
    #[serde(default)]
    yearly: Decimal,
}

impl From<DiscountFields> for DiscountSet {
    fn from(raw: DiscountFields) -> Self {
        let mut set = DiscountSet::zero();
        set.set(BillingInterval::Quarterly, raw.quarterly);
        set.set(BillingInterval::SixMonths, raw.six_months);
        set.set(BillingInterval::Yearly, raw.yearly);
        set
    }
}

impl DiscountSet {
    pub fn zero() -> Self {
        Self {
            quarterly: Decimal::ZERO,
            six_months: Decimal::ZERO,
            yearly: Decimal::ZERO,
        }
    }

    pub fn get(&self, interval: BillingInterval) -> Decimal {
        match interval {
            BillingInterval::Monthly => Decimal::ZERO,
            BillingInterval::Quarterly => self.quarterly,
            BillingInterval::SixMonths => self.six_months,
            BillingInterval::Yearly => self.yearly,
        }
    }

    /// Stores a clamped percent. Returns `false` for the monthly interval, which cannot carry a discount.
    pub fn set(&mut self, interval: BillingInterval, percent: Decimal) -> bool {
        let percent = crate::core::sanitize::sanitize_percent(percent);
        match interval {
            BillingInterval::Monthly => return false,
            BillingInterval::Quarterly => self.quarterly = percent,
            BillingInterval::SixMonths => self.six_months = percent,
            BillingInterval::Yearly => self.yearly = percent,
        }
        true
    }
}

/// Absolute price per interval, never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PriceFields")]
pub struct PriceSet {
    monthly: Decimal,
    quarterly: Decimal,
    six_months: Decimal,
    yearly: Decimal,
}

#[derive(Deserialize)]
struct PriceFields {
    #[serde(default)]
    monthly: Decimal,
    #[serde(default)]
    quarterly: Decimal,
    #[serde(default)]
    six_months: Decimal,
    #[serde(default)]
    yearly: Decimal,
}

impl From<PriceFields> for PriceSet {
    fn from(raw: PriceFields) -> Self {
        let mut set = PriceSet::zero();
        set.set(BillingInterval::Monthly, raw.monthly);
        set.set(BillingInterval::Quarterly, raw.quarterly);
        set.set(BillingInterval::SixMonths, raw.six_months);
        set.set(BillingInterval::Yearly, raw.yearly);
        set
    }
}

impl PriceSet {
    pub fn zero() -> Self {
        Self {
            monthly: Decimal::ZERO,
            quarterly: Decimal::ZERO,
            six_months: Decimal::ZERO,
            yearly: Decimal::ZERO,
        }
    }

    pub fn get(&self, interval: BillingInterval) -> Decimal {
        match interval {
            BillingInterval::Monthly => self.monthly,
            BillingInterval::Quarterly => self.quarterly,
            BillingInterval::SixMonths => self.six_months,
            BillingInterval::Yearly => self.yearly,
        }
    }

    pub fn set(&mut self, interval: BillingInterval, price: Decimal) {
        let price = crate::core::sanitize::sanitize_amount(price);
        match interval {
            BillingInterval::Monthly => self.monthly = price,
            BillingInterval::Quarterly => self.quarterly = price,
            BillingInterval::SixMonths => self.six_months = price,
            BillingInterval::Yearly => self.yearly = price,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (BillingInterval, Decimal)> + '_ {
        BillingInterval::ALL
            .into_iter()
            .map(move |interval| (interval, self.get(interval)))
    }
}

/// The aggregate owned by [`crate::core::controller::ConsistencyController`].
/// Read-only outside the crate; every mutation goes through the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingState {
    pub(crate) base_price: Decimal,
    pub(crate) discounts: DiscountSet,
    pub(crate) prices: PriceSet,
    pub(crate) rounding_enabled: bool,
    pub(crate) rounding_target: u8,
    pub(crate) mode: PricingMode,
}

impl PricingState {
    pub fn base_price(&self) -> Decimal {
        self.base_price
    }

    pub fn discounts(&self) -> &DiscountSet {
        &self.discounts
    }

    pub fn prices(&self) -> &PriceSet {
        &self.prices
    }

    pub fn rounding_enabled(&self) -> bool {
        self.rounding_enabled
    }

    pub fn rounding_target(&self) -> u8 {
        self.rounding_target
    }

    pub fn mode(&self) -> PricingMode {
        self.mode
    }

    pub fn to_record(&self, plan_id: &str, name: &str) -> PlanRecord {
        PlanRecord {
            plan_id: plan_id.to_string(),
            name: name.to_string(),
            base_price: self.base_price,
            discounts: self.discounts,
            prices: self.prices,
            rounding_enabled: self.rounding_enabled,
            rounding_target: self.rounding_target,
            mode: self.mode,
            saved_at: Utc::now(),
        }
    }
}

/// What the plan settings API persists: four absolute prices plus discount metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub plan_id: String,
    pub name: String,
    pub base_price: Decimal,
    pub discounts: DiscountSet,
    pub prices: PriceSet,
    pub rounding_enabled: bool,
    pub rounding_target: u8,
    #[serde(default)]
    pub mode: PricingMode,
    pub saved_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_discount_is_always_zero() {
        let mut discounts = DiscountSet::zero();
        assert!(!discounts.set(BillingInterval::Monthly, Decimal::from(20)));
        assert_eq!(discounts.get(BillingInterval::Monthly), Decimal::ZERO);
    }

    #[test]
    fn test_discount_set_clamps() {
        let mut discounts = DiscountSet::zero();
        assert!(discounts.set(BillingInterval::Yearly, Decimal::from(60)));
        assert_eq!(discounts.get(BillingInterval::Yearly), Decimal::from(50));
        discounts.set(BillingInterval::Quarterly, Decimal::from(-5));
        assert_eq!(discounts.get(BillingInterval::Quarterly), Decimal::ZERO);
    }

    #[test]
    fn test_price_set_rejects_negative() {
        let mut prices = PriceSet::zero();
        prices.set(BillingInterval::Yearly, Decimal::from(-10));
        assert_eq!(prices.get(BillingInterval::Yearly), Decimal::ZERO);
    }

    #[test]
    fn test_interval_keys() {
        assert_eq!(
            BillingInterval::from_key("sixMonths"),
            Some(BillingInterval::SixMonths)
        );
        assert_eq!(BillingInterval::from_key(" Yearly "), Some(BillingInterval::Yearly));
        assert_eq!(BillingInterval::from_key("weekly"), None);
        assert_eq!(BillingInterval::SixMonths.to_string(), "six_months");
    }

    #[test]
    fn test_deserialized_sets_are_sanitized() {
        let discounts: DiscountSet =
            serde_json::from_value(serde_json::json!({"quarterly": "75", "yearly": "-3"})).unwrap();
        assert_eq!(discounts.get(BillingInterval::Quarterly), Decimal::from(50));
        assert_eq!(discounts.get(BillingInterval::SixMonths), Decimal::ZERO);
        assert_eq!(discounts.get(BillingInterval::Yearly), Decimal::ZERO);

        let prices: PriceSet =
            serde_json::from_value(serde_json::json!({"monthly": "-1", "yearly": 900})).unwrap();
        assert_eq!(prices.get(BillingInterval::Monthly), Decimal::ZERO);
        assert_eq!(prices.get(BillingInterval::Yearly), Decimal::from(900));
    }
}
