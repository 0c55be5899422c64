use crate::domain::model::{BillingInterval, DiscountSet};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalSpec {
    pub interval: BillingInterval,
    pub label: &'static str,
    pub months: u32,
    pub default_discount_percent: u32,
}

// months 必須嚴格遞增；月付永遠沒有折扣
static INTERVALS: [IntervalSpec; 4] = [
    IntervalSpec {
        interval: BillingInterval::Monthly,
        label: "Monthly",
        months: 1,
        default_discount_percent: 0,
    },
    IntervalSpec {
        interval: BillingInterval::Quarterly,
        label: "Quarterly",
        months: 3,
        default_discount_percent: 10,
    },
    IntervalSpec {
        interval: BillingInterval::SixMonths,
        label: "6 Months",
        months: 6,
        default_discount_percent: 15,
    },
    IntervalSpec {
        interval: BillingInterval::Yearly,
        label: "Yearly",
        months: 12,
        default_discount_percent: 25,
    },
];

pub fn all() -> &'static [IntervalSpec] {
    &INTERVALS
}

pub fn spec_for(interval: BillingInterval) -> &'static IntervalSpec {
    match interval {
        BillingInterval::Monthly => &INTERVALS[0],
        BillingInterval::Quarterly => &INTERVALS[1],
        BillingInterval::SixMonths => &INTERVALS[2],
        BillingInterval::Yearly => &INTERVALS[3],
    }
}

pub fn months_for(interval: BillingInterval) -> u32 {
    spec_for(interval).months
}

pub fn default_discount_for(interval: BillingInterval) -> Decimal {
    Decimal::from(spec_for(interval).default_discount_percent)
}

pub fn default_discounts() -> DiscountSet {
    let mut discounts = DiscountSet::zero();
    for spec in all() {
        discounts.set(spec.interval, Decimal::from(spec.default_discount_percent));
    }
    discounts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_months_strictly_increasing() {
        let months: Vec<u32> = all().iter().map(|s| s.months).collect();
        assert_eq!(months, vec![1, 3, 6, 12]);
        assert!(months.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_table_order_matches_interval_order() {
        for (spec, interval) in all().iter().zip(BillingInterval::ALL) {
            assert_eq!(spec.interval, interval);
            assert_eq!(spec_for(interval), spec);
        }
    }

    #[test]
    fn test_default_discounts() {
        let discounts = default_discounts();
        assert_eq!(discounts.get(BillingInterval::Monthly), Decimal::ZERO);
        assert_eq!(discounts.get(BillingInterval::Quarterly), Decimal::from(10));
        assert_eq!(discounts.get(BillingInterval::SixMonths), Decimal::from(15));
        assert_eq!(discounts.get(BillingInterval::Yearly), Decimal::from(25));
        assert_eq!(default_discount_for(BillingInterval::Monthly), Decimal::ZERO);
    }
}
