use crate::app::report::OutputFormat;
use crate::core::controller::{ConsistencyController, DEFAULT_ROUNDING_TARGET};
use crate::domain::model::{BillingInterval, PricingMode};
use crate::utils::error::{PricingError, Result};
use crate::utils::validation::{self, Validate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_PLAN_ID: &str = "default";
pub const DEFAULT_OUTPUT_PATH: &str = "./plans";
const OUTPUT_FORMATS: [&str; 2] = ["human", "json"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub plan: PlanSection,
    #[serde(default)]
    pub pricing: PricingSection,
    /// interval key -> discount percent
    pub discounts: Option<BTreeMap<String, Decimal>>,
    /// interval key -> absolute price, only valid with `mode = "manual"`
    pub manual_prices: Option<BTreeMap<String, Decimal>>,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSection {
    pub id: String,
    pub name: String,
}

impl Default for PlanSection {
    fn default() -> Self {
        Self {
            id: DEFAULT_PLAN_ID.to_string(),
            name: "Default plan".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingSection {
    pub base_price: Option<Decimal>,
    pub rounding_enabled: Option<bool>,
    pub rounding_target: Option<i64>,
    pub mode: Option<PricingMode>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    pub path: Option<String>,
    pub format: Option<String>,
}

impl PricingConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PricingError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PricingError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BASE_PRICE})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PricingError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性。折扣超出範圍不算錯誤，由引擎夾在 0-50 之間
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_plan_id("plan.id", &self.plan.id)?;
        validation::validate_non_empty_string("plan.name", &self.plan.name)?;

        if let Some(target) = self.pricing.rounding_target {
            validation::validate_range("pricing.rounding_target", target, 0, 9)?;
        }

        validate_interval_keys("discounts", self.discounts.as_ref())?;
        validate_interval_keys("manual_prices", self.manual_prices.as_ref())?;

        if self.manual_prices.as_ref().is_some_and(|p| !p.is_empty())
            && self.mode() != PricingMode::Manual
        {
            return Err(PricingError::InvalidConfigValueError {
                field: "pricing.mode".to_string(),
                value: self.mode().to_string(),
                reason: "manual_prices require mode = \"manual\"".to_string(),
            });
        }

        validation::validate_path("output.path", self.output_path())?;
        if let Some(format) = &self.output.format {
            validation::validate_one_of("output.format", format, &OUTPUT_FORMATS)?;
        }

        Ok(())
    }

    pub fn mode(&self) -> PricingMode {
        self.pricing.mode.unwrap_or_default()
    }

    pub fn rounding_target(&self) -> u8 {
        self.pricing
            .rounding_target
            .map(|t| t.clamp(0, 9) as u8)
            .unwrap_or(DEFAULT_ROUNDING_TARGET)
    }

    pub fn output_path(&self) -> &str {
        self.output.path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    pub fn output_format(&self) -> OutputFormat {
        match self.output.format.as_deref() {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Human,
        }
    }

    /// 依配置建立定價狀態：先套用折扣，再切換模式，最後寫入手動價格
    pub fn build_controller(&self) -> Result<ConsistencyController> {
        let base_price =
            validation::validate_required_field("pricing.base_price", &self.pricing.base_price)?;

        let mut controller = ConsistencyController::with_rounding(
            *base_price,
            self.pricing.rounding_enabled.unwrap_or(false),
            self.rounding_target(),
        );

        for (interval, percent) in interval_entries(self.discounts.as_ref()) {
            if interval.is_monthly() {
                tracing::warn!("Monthly discount in configuration ignored");
            }
            controller.set_discount(interval, percent);
        }

        controller.set_mode(self.mode());

        for (interval, price) in interval_entries(self.manual_prices.as_ref()) {
            controller.set_manual_price(interval, price);
        }

        Ok(controller)
    }
}

fn interval_entries(
    entries: Option<&BTreeMap<String, Decimal>>,
) -> impl Iterator<Item = (BillingInterval, Decimal)> + '_ {
    entries
        .into_iter()
        .flatten()
        .filter_map(|(key, value)| BillingInterval::from_key(key).map(|i| (i, *value)))
}

fn validate_interval_keys(section: &str, entries: Option<&BTreeMap<String, Decimal>>) -> Result<()> {
    for key in entries.into_iter().flat_map(|e| e.keys()) {
        if BillingInterval::from_key(key).is_none() {
            return Err(PricingError::InvalidConfigValueError {
                field: format!("{}.{}", section, key),
                value: key.clone(),
                reason: "Unknown interval. Valid intervals: monthly, quarterly, six_months, yearly"
                    .to_string(),
            });
        }
    }
    Ok(())
}

impl Validate for PricingConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
