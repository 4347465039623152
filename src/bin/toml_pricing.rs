use anyhow::Context;
use clap::Parser;
use dynamic_pricing::core::loader::{parse_catalog, parse_portfolio};
use dynamic_pricing::core::{ConfigProvider, Storage};
use dynamic_pricing::utils::error::ErrorSeverity;
use dynamic_pricing::utils::{logger, validation::Validate};
use dynamic_pricing::{LocalStorage, PortfolioPipeline, PricingRunner, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-pricing")]
#[command(about = "Dynamic pricing driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "pricing-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Validate inputs and show what would be priced without writing a report
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // --verbose 優先於設定檔中的日誌等級
    match config.log_directive() {
        Some(directive) if !args.verbose => logger::init_cli_logger_with_directive(&directive),
        _ => logger::init_cli_logger(args.verbose),
    }

    tracing::info!("🚀 Starting TOML-based pricing run");
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config);

    let storage = LocalStorage::new(".");

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no report will be written");
        return perform_dry_run(&storage, &config).await;
    }

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
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

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

fn display_config_summary(config: &TomlConfig) {
    let settings = config.engine_settings();
    let defaults = config.assembly_defaults();

    tracing::info!("📋 Configuration Summary:");
    tracing::info!("  📦 Catalog: {}", config.catalog_path());
    tracing::info!("  👥 Portfolio: {}", config.portfolio_path());
    tracing::info!("  📁 Output: {}", config.output_path());
    tracing::info!("  📄 Formats: {}", config.output_formats().join(", "));
    tracing::info!("  💰 Minimum margin: {:.0}%", settings.min_profit_margin * 100.0);
    tracing::info!(
        "  ⚖️ Default weights: price {} / rating {} / demand {}",
        defaults.weights.price,
        defaults.weights.rating,
        defaults.weights.demand
    );
    tracing::info!(
        "  📈 Default demand: {} in [{}, {}]",
        defaults.raw_demand,
        defaults.demand_range.min,
        defaults.demand_range.max
    );
}

async fn perform_dry_run(storage: &LocalStorage, config: &TomlConfig) -> anyhow::Result<()> {
    let catalog_bytes = storage
        .read_file(config.catalog_path())
        .await
        .with_context(|| format!("reading catalog {}", config.catalog_path()))?;
    let catalog = parse_catalog(config.catalog_path(), &catalog_bytes)
        .with_context(|| format!("parsing catalog {}", config.catalog_path()))?;

    let portfolio_bytes = storage
        .read_file(config.portfolio_path())
        .await
        .with_context(|| format!("reading portfolio {}", config.portfolio_path()))?;
    let portfolio = parse_portfolio(config.portfolio_path(), &portfolio_bytes)
        .with_context(|| format!("parsing portfolio {}", config.portfolio_path()))?;

    println!("🔍 Dry run summary:");
    println!(
        "  📦 {} categories, {} catalog products",
        catalog.categories.len(),
        catalog.product_count()
    );
    println!(
        "  👥 {} users tracking {} products",
        portfolio.users.len(),
        portfolio.tracked_count()
    );
    println!("  ✅ Inputs parsed; no report written");

    Ok(())
}
