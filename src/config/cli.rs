use crate::app::report::OutputFormat;
use crate::config::toml_config::PricingConfig;
use crate::core::edit::PricingEdit;
use crate::core::sanitize::parse_amount;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "plan-pricing")]
#[command(about = "Derive subscription interval prices from a base monthly price")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Base monthly price; unparseable or negative values count as 0
    #[arg(long)]
    pub base_price: Option<String>,

    /// Override rounding to marketing price endings
    #[arg(long)]
    pub rounding: Option<bool>,

    /// Last digit every rounded price ends in (0-9)
    #[arg(long)]
    pub target: Option<u8>,

    /// Edit event applied after loading, repeatable:
    /// base=<amount>, discount:<interval>=<percent>, rounding=on|off,
    /// target=<digit>, price:<interval>=<amount>, toggle
    #[arg(long = "edit", value_name = "EDIT")]
    pub edits: Vec<String>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Directory holding saved plan records
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(long)]
    pub plan_id: Option<String>,

    /// Start from the saved record of --plan-id instead of the configured inputs;
    /// --base-price, --rounding and --target are applied to it as edits
    #[arg(long)]
    pub load: bool,

    /// Save the final state as a plan record
    #[arg(long)]
    pub save: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl CliConfig {
    /// 命令列參數覆蓋 TOML 設定
    pub fn apply_overrides(&self, config: &mut PricingConfig) {
        if let Some(base_price) = &self.base_price {
            config.pricing.base_price = Some(parse_amount(base_price));
            tracing::debug!("Base price overridden to: {}", base_price);
        }
        if let Some(rounding) = self.rounding {
            config.pricing.rounding_enabled = Some(rounding);
        }
        if let Some(target) = self.target {
            config.pricing.rounding_target = Some(i64::from(target));
        }
        if let Some(format) = self.format {
            config.output.format = Some(format.as_str().to_string());
        }
        if let Some(path) = &self.output_path {
            config.output.path = Some(path.clone());
        }
        if let Some(plan_id) = &self.plan_id {
            config.plan.id = plan_id.clone();
        }
    }

    /// The pricing flags as edit events, for sessions that start from a saved record
    /// and never read the TOML pricing inputs. Order: base price, rounding, target.
    pub fn override_edits(&self) -> Vec<PricingEdit> {
        let mut edits = Vec::new();
        if let Some(base_price) = &self.base_price {
            edits.push(PricingEdit::BasePrice(parse_amount(base_price)));
        }
        if let Some(rounding) = self.rounding {
            edits.push(PricingEdit::RoundingEnabled(rounding));
        }
        if let Some(target) = self.target {
            edits.push(PricingEdit::RoundingTarget(target));
        }
        edits
    }
}
