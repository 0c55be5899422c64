use clap::Parser;
use plan_pricing::core::PlanRepository;
use plan_pricing::utils::error::ErrorSeverity;
use plan_pricing::utils::{logger, validation::Validate};
use plan_pricing::{
    CliConfig, ConsistencyController, JsonFileRepository, PricingConfig, PricingEdit,
    PricingError, PricingReport,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting plan-pricing");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Pricing failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: &CliConfig) -> Result<(), PricingError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            PricingConfig::from_file(path)?
        }
        None => PricingConfig::default(),
    };
    cli.apply_overrides(&mut config);

    // 驗證配置
    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");

    let repository = JsonFileRepository::new(config.output_path());
    let mut plan_name = config.plan.name.clone();

    let mut controller = if cli.load {
        match repository.load(&config.plan.id).await? {
            Some(record) => {
                tracing::info!("📂 Loaded plan '{}' saved at {}", record.plan_id, record.saved_at);
                plan_name = record.name.clone();
                let mut controller = ConsistencyController::from_record(&record);
                // 載入的紀錄不讀 TOML 定價欄位，命令列定價參數改以編輯事件套用
                for edit in cli.override_edits() {
                    tracing::info!("Applying command-line override to loaded plan: {:?}", edit);
                    controller.apply(&edit);
                }
                controller
            }
            None => {
                return Err(PricingError::ConfigError {
                    message: format!(
                        "No saved plan '{}' under {}",
                        config.plan.id,
                        config.output_path()
                    ),
                })
            }
        }
    } else {
        config.build_controller()?
    };

    // 依序套用編輯事件，無法解析的事件只記錄警告
    for raw in &cli.edits {
        match raw.parse::<PricingEdit>() {
            Ok(edit) => {
                tracing::debug!("Applying edit: {:?}", edit);
                controller.apply(&edit);
            }
            Err(e) => {
                tracing::warn!("Skipping edit: {}", e);
                eprintln!("⚠️ {}", e.user_friendly_message());
            }
        }
    }

    let report = PricingReport::from_controller(&controller);
    println!("{}", report.render(config.output_format())?);

    if cli.save {
        let record = controller.state().to_record(&config.plan.id, &plan_name);
        let location = repository.save(&record).await?;
        tracing::info!("💾 Plan record saved to: {}", location);
        println!("💾 Saved to: {}", location);
    }

    Ok(())
}
