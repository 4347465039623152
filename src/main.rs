use clap::Parser;
use dynamic_pricing::utils::error::ErrorSeverity;
use dynamic_pricing::utils::{logger, validation::Validate};
use dynamic_pricing::{CliConfig, LocalStorage, PortfolioPipeline, PricingRunner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting dynamic-pricing CLI");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 輸入與輸出路徑都相對於目前目錄
    let storage = LocalStorage::new(".");
    let pipeline = PortfolioPipeline::new(storage, config);
    let runner = PricingRunner::new(pipeline);

    match runner.run().await {
        Ok(output) => {
            println!("✅ Pricing completed successfully!");
            println!("📁 Report saved to: {}", output);
        }
        Err(e) => {
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

    Ok(())
}
