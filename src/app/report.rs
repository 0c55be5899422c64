use crate::core::controller::ConsistencyController;
use crate::core::intervals;
use crate::core::rounding::round_to_cents;
use crate::domain::model::{BillingInterval, PricingMode};
use crate::utils::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Human => "human",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalRow {
    pub interval: BillingInterval,
    pub label: &'static str,
    pub months: u32,
    pub discount_percent: Decimal,
    pub price: Decimal,
    pub per_month: Decimal,
    pub savings: Decimal,
    pub implied_discount_percent: Decimal,
}

/// Display snapshot of one pricing state; has no effect on stored data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingReport {
    pub base_price: Decimal,
    pub mode: PricingMode,
    pub rounding_enabled: bool,
    pub rounding_target: u8,
    pub intervals: Vec<IntervalRow>,
}

impl PricingReport {
    pub fn from_controller(controller: &ConsistencyController) -> Self {
        let state = controller.state();
        let intervals = intervals::all()
            .iter()
            .map(|spec| {
                let price = state.prices().get(spec.interval);
                IntervalRow {
                    interval: spec.interval,
                    label: spec.label,
                    months: spec.months,
                    discount_percent: state.discounts().get(spec.interval),
                    price,
                    per_month: round_to_cents(price / Decimal::from(spec.months)),
                    savings: controller.savings(spec.interval),
                    implied_discount_percent: controller.implied_discount(spec.interval),
                }
            })
            .collect();

        Self {
            base_price: state.base_price(),
            mode: state.mode(),
            rounding_enabled: state.rounding_enabled(),
            rounding_target: state.rounding_target(),
            intervals,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Human => Ok(self.to_human()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    fn to_human(&self) -> String {
        let mut lines = vec![
            format!(
                "📋 Plan pricing (mode: {}, rounding: {}, target digit: {})",
                self.mode,
                if self.rounding_enabled { "on" } else { "off" },
                self.rounding_target
            ),
            format!("  Base monthly price: {:.2}", self.base_price),
            String::new(),
            format!(
                "  {:<10} {:>6} {:>9} {:>10} {:>10} {:>10}",
                "Interval", "Months", "Discount", "Price", "Per month", "Savings"
            ),
        ];

        for row in &self.intervals {
            // 手動模式下顯示價格所隱含的折扣
            let discount = if self.mode == PricingMode::Manual && !row.interval.is_monthly() {
                format!("~{:.2}%", row.implied_discount_percent)
            } else {
                format!("{:.2}%", row.discount_percent)
            };
            lines.push(format!(
                "  {:<10} {:>6} {:>9} {:>10} {:>10} {:>10}",
                row.label,
                row.months,
                discount,
                format!("{:.2}", row.price),
                format!("{:.2}", row.per_month),
                format!("{:.2}", row.savings),
            ));
        }

        lines.join("\n")
    }
}
