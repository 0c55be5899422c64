use crate::core::derivation::derive_prices;
use crate::core::edit::PricingEdit;
use crate::core::intervals;
use crate::core::sanitize::{sanitize_amount, sanitize_percent, sanitize_target};
use crate::core::savings::{compute_savings, implied_discount};
use crate::domain::model::{BillingInterval, PlanRecord, PriceSet, PricingMode, PricingState};
use rust_decimal::Decimal;

pub const DEFAULT_ROUNDING_TARGET: u8 = 9;

/// The only mutation surface of a [`PricingState`].
///
/// In automatic mode every edit leaves `prices` equal to
/// `derive_prices(base_price, discounts, rounding_enabled, rounding_target)`.
/// In manual mode prices are only changed by [`set_manual_price`](Self::set_manual_price).
///
/// Every mutator takes `&mut self` and swaps in a fully derived `PriceSet`, so a
/// reader sharing the controller behind a lock never sees a half-updated set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsistencyController {
    state: PricingState,
}

impl ConsistencyController {
    pub fn new(base_price: Decimal) -> Self {
        Self::with_rounding(base_price, false, DEFAULT_ROUNDING_TARGET)
    }

    pub fn with_rounding(base_price: Decimal, rounding_enabled: bool, rounding_target: u8) -> Self {
        let mut controller = Self {
            state: PricingState {
                base_price: sanitize_amount(base_price),
                discounts: intervals::default_discounts(),
                prices: PriceSet::zero(),
                rounding_enabled,
                rounding_target: sanitize_target(rounding_target),
                mode: PricingMode::Automatic,
            },
        };
        controller.resync();
        controller
    }

    /// Recreates an editing session from a stored plan. Stored prices are kept as-is;
    /// the session starts in manual mode when they differ from what the stored inputs
    /// derive, or when the record was saved in manual mode.
    pub fn from_record(record: &PlanRecord) -> Self {
        let mut state = PricingState {
            base_price: sanitize_amount(record.base_price),
            discounts: record.discounts,
            prices: record.prices,
            rounding_enabled: record.rounding_enabled,
            rounding_target: sanitize_target(record.rounding_target),
            mode: PricingMode::Automatic,
        };

        let derived = derive_prices(
            state.base_price,
            &state.discounts,
            state.rounding_enabled,
            state.rounding_target,
        );
        if record.mode == PricingMode::Manual || derived != state.prices {
            tracing::debug!("Plan '{}' has manual prices, opening in manual mode", record.plan_id);
            state.mode = PricingMode::Manual;
        }

        Self { state }
    }

    pub fn state(&self) -> &PricingState {
        &self.state
    }

    pub fn into_state(self) -> PricingState {
        self.state
    }

    pub fn mode(&self) -> PricingMode {
        self.state.mode
    }

    /// What automatic mode would show for the current inputs.
    pub fn derived_prices(&self) -> PriceSet {
        derive_prices(
            self.state.base_price,
            &self.state.discounts,
            self.state.rounding_enabled,
            self.state.rounding_target,
        )
    }

    /// Leaving manual mode re-derives every price and discards manual overrides.
    /// Entering manual mode keeps the current prices as the manual baseline.
    pub fn toggle_mode(&mut self) {
        self.state.mode = self.state.mode.toggled();
        tracing::debug!("Pricing mode switched to {}", self.state.mode);
        if self.state.mode == PricingMode::Automatic {
            self.resync();
        }
    }

    pub fn set_mode(&mut self, mode: PricingMode) {
        if self.state.mode != mode {
            self.toggle_mode();
        }
    }

    pub fn set_base_price(&mut self, value: Decimal) {
        let sanitized = sanitize_amount(value);
        if value.is_sign_negative() && !value.is_zero() {
            tracing::warn!("Base price {} is negative, using 0", value);
        }
        self.state.base_price = sanitized;
        self.resync_if_automatic();
    }

    pub fn set_discount(&mut self, interval: BillingInterval, percent: Decimal) {
        if interval.is_monthly() {
            tracing::debug!("Ignoring discount edit for the monthly interval");
            return;
        }

        let clamped = sanitize_percent(percent);
        if clamped != percent {
            tracing::warn!("Discount {}% for {} clamped to {}%", percent, interval, clamped);
        }
        self.state.discounts.set(interval, clamped);
        self.resync_if_automatic();
    }

    /// Only takes effect in manual mode. In automatic mode the call is deliberately a
    /// no-op (logged at debug) rather than an error or a write: writing would break the
    /// rule that automatic prices always equal the derivation, and the UI keeps the input
    /// disabled there anyway. Switch to manual with [`toggle_mode`](Self::toggle_mode)
    /// first to override a price.
    pub fn set_manual_price(&mut self, interval: BillingInterval, value: Decimal) {
        if self.state.mode == PricingMode::Automatic {
            tracing::debug!("Ignoring manual {} price while in automatic mode", interval);
            return;
        }
        self.state.prices.set(interval, value);
    }

    pub fn set_rounding_enabled(&mut self, enabled: bool) {
        self.state.rounding_enabled = enabled;
        self.resync_if_automatic();
    }

    pub fn set_rounding_target(&mut self, digit: u8) {
        self.state.rounding_target = sanitize_target(digit);
        self.resync_if_automatic();
    }

    pub fn apply(&mut self, edit: &PricingEdit) {
        match *edit {
            PricingEdit::BasePrice(value) => self.set_base_price(value),
            PricingEdit::Discount(interval, percent) => self.set_discount(interval, percent),
            PricingEdit::RoundingEnabled(enabled) => self.set_rounding_enabled(enabled),
            PricingEdit::RoundingTarget(digit) => self.set_rounding_target(digit),
            PricingEdit::ManualPrice(interval, value) => self.set_manual_price(interval, value),
            PricingEdit::ToggleMode => self.toggle_mode(),
        }
    }

    pub fn savings(&self, interval: BillingInterval) -> Decimal {
        compute_savings(
            self.state.base_price,
            intervals::months_for(interval),
            self.state.prices.get(interval),
        )
    }

    pub fn implied_discount(&self, interval: BillingInterval) -> Decimal {
        implied_discount(
            self.state.base_price,
            intervals::months_for(interval),
            self.state.prices.get(interval),
        )
    }

    fn resync_if_automatic(&mut self) {
        if self.state.mode == PricingMode::Automatic {
            self.resync();
        }
    }

    fn resync(&mut self) {
        let prices = self.derived_prices();
        tracing::debug!(
            "Re-derived prices from base {}: {:?}",
            self.state.base_price,
            prices
        );
        self.state.prices = prices;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn test_new_state_is_automatic_and_derived() {
        let controller = ConsistencyController::new(d(100));
        assert_eq!(controller.mode(), PricingMode::Automatic);
        assert_eq!(controller.state().prices(), &controller.derived_prices());
        assert_eq!(controller.state().prices().get(BillingInterval::Yearly), d(900));
    }

    #[test]
    fn test_negative_base_price_is_zero() {
        let mut controller = ConsistencyController::new(d(-40));
        assert_eq!(controller.state().base_price(), d(0));
        controller.set_base_price(d(-1));
        assert_eq!(controller.state().base_price(), d(0));
        assert!(controller.state().prices().iter().all(|(_, p)| p.is_zero()));
    }

    #[test]
    fn test_base_price_edit_resyncs_in_automatic_mode() {
        let mut controller = ConsistencyController::new(d(100));
        controller.set_base_price(d(200));
        assert_eq!(controller.state().prices().get(BillingInterval::Quarterly), d(540));
    }

    #[test]
    fn test_base_price_edit_keeps_manual_prices() {
        let mut controller = ConsistencyController::new(d(100));
        controller.toggle_mode();
        controller.set_base_price(d(200));
        assert_eq!(controller.state().base_price(), d(200));
        assert_eq!(controller.state().prices().get(BillingInterval::Quarterly), d(270));
        // savings follow the new base price
        assert_eq!(controller.savings(BillingInterval::Quarterly), d(330));
    }

    #[test]
    fn test_monthly_discount_edit_is_noop() {
        let mut controller = ConsistencyController::new(d(100));
        let before = controller.clone();
        controller.set_discount(BillingInterval::Monthly, d(20));
        assert_eq!(controller, before);
    }

    #[test]
    fn test_discount_clamped_and_applied() {
        let mut controller = ConsistencyController::new(d(100));
        controller.set_discount(BillingInterval::Yearly, d(60));
        assert_eq!(controller.state().discounts().get(BillingInterval::Yearly), d(50));
        assert_eq!(controller.state().prices().get(BillingInterval::Yearly), d(600));
    }

    #[test]
    fn test_manual_price_ignored_in_automatic_mode() {
        let mut controller = ConsistencyController::new(d(100));
        let before = controller.clone();
        controller.set_manual_price(BillingInterval::Yearly, d(500));
        controller.apply(&PricingEdit::ManualPrice(BillingInterval::Monthly, d(1)));
        assert_eq!(controller, before);
        assert_eq!(controller.state().prices(), &controller.derived_prices());
        assert_eq!(controller.state().prices().get(BillingInterval::Yearly), d(900));
    }

    #[test]
    fn test_huge_base_price_edit_is_capped() {
        use crate::core::sanitize::{parse_amount, MAX_AMOUNT};

        let mut controller = ConsistencyController::new(d(100));
        controller.apply(&"base=1e26".parse::<PricingEdit>().unwrap());
        assert_eq!(controller.state().base_price(), MAX_AMOUNT);
        assert_eq!(controller.state().prices(), &controller.derived_prices());
        assert_eq!(controller.state().prices().get(BillingInterval::Monthly), MAX_AMOUNT);

        controller.set_rounding_enabled(true);
        assert!(controller.state().prices().iter().all(|(_, p)| p == MAX_AMOUNT - Decimal::ONE));
        assert_eq!(controller.savings(BillingInterval::Yearly), MAX_AMOUNT * d(11) + Decimal::ONE);

        let controller = ConsistencyController::new(parse_amount("79228162514264337593543950335"));
        assert_eq!(controller.state().base_price(), MAX_AMOUNT);
        assert_eq!(controller.state().prices().get(BillingInterval::Yearly), MAX_AMOUNT);
        assert!(controller.implied_discount(BillingInterval::Yearly) <= d(50));
    }

    #[test]
    fn test_manual_price_only_touches_its_interval() {
        let mut controller = ConsistencyController::new(d(100));
        controller.toggle_mode();
        controller.set_manual_price(BillingInterval::Yearly, d(500));
        let prices = controller.state().prices();
        assert_eq!(prices.get(BillingInterval::Yearly), d(500));
        assert_eq!(prices.get(BillingInterval::SixMonths), d(510));
        assert_eq!(controller.state().discounts().get(BillingInterval::Yearly), d(25));
        assert_eq!(controller.implied_discount(BillingInterval::Yearly), d(50));
    }

    #[test]
    fn test_rounding_toggle_updates_all_intervals() {
        let mut controller = ConsistencyController::new(d(100));
        controller.set_rounding_enabled(true);
        assert!(controller
            .state()
            .prices()
            .iter()
            .all(|(_, price)| price % d(10) == d(9)));

        controller.set_rounding_target(5);
        assert_eq!(controller.state().prices().get(BillingInterval::Monthly), d(105));

        controller.set_rounding_enabled(false);
        assert_eq!(controller.state().prices().get(BillingInterval::Monthly), d(100));
    }

    #[test]
    fn test_rounding_edit_in_manual_mode_keeps_prices() {
        let mut controller = ConsistencyController::new(d(100));
        controller.set_mode(PricingMode::Manual);
        controller.set_rounding_enabled(true);
        assert!(controller.state().rounding_enabled());
        assert_eq!(controller.state().prices().get(BillingInterval::Monthly), d(100));
    }

    #[test]
    fn test_apply_dispatches_edits() {
        let mut controller = ConsistencyController::new(d(100));
        for edit in [
            PricingEdit::BasePrice(d(50)),
            PricingEdit::Discount(BillingInterval::Quarterly, d(20)),
            PricingEdit::RoundingEnabled(true),
            PricingEdit::RoundingTarget(9),
        ] {
            controller.apply(&edit);
        }
        // 50 × 3 × 0.8 = 120 -> 129 overshoots by 9 -> 119
        assert_eq!(controller.state().prices().get(BillingInterval::Quarterly), d(119));

        controller.apply(&PricingEdit::ToggleMode);
        controller.apply(&PricingEdit::ManualPrice(BillingInterval::Monthly, d(45)));
        assert_eq!(controller.state().prices().get(BillingInterval::Monthly), d(45));
    }

    #[test]
    fn test_from_record_detects_manual_prices() {
        let mut controller = ConsistencyController::new(d(100));
        let record = controller.state().to_record("gold", "Gold");
        let reloaded = ConsistencyController::from_record(&record);
        assert_eq!(reloaded.mode(), PricingMode::Automatic);
        assert_eq!(reloaded.state(), controller.state());

        controller.toggle_mode();
        controller.set_manual_price(BillingInterval::Yearly, d(850));
        let mut record = controller.state().to_record("gold", "Gold");
        record.mode = PricingMode::Automatic;
        let reloaded = ConsistencyController::from_record(&record);
        assert_eq!(reloaded.mode(), PricingMode::Manual);
        assert_eq!(reloaded.state().prices().get(BillingInterval::Yearly), d(850));
    }
}
