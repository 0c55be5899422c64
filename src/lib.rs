pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::JsonFileRepository;
pub use app::report::{OutputFormat, PricingReport};
pub use config::PricingConfig;
pub use crate::core::{
    controller::ConsistencyController, derivation::derive_prices, edit::PricingEdit,
    rounding::round_to_marketing_ending, savings::compute_savings,
};
pub use domain::model::{BillingInterval, PlanRecord, PricingMode, PricingState};
pub use utils::error::{PricingError, Result};
