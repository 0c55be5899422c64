pub mod controller;
pub mod derivation;
pub mod edit;
pub mod intervals;
pub mod rounding;
pub mod sanitize;
pub mod savings;

pub use crate::domain::model::{
    BillingInterval, DiscountSet, PlanRecord, PriceSet, PricingMode, PricingState,
};
pub use crate::domain::ports::PlanRepository;
pub use crate::utils::error::Result;
