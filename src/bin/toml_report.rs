use clap::Parser;
use sales_report::config::toml_config::TomlConfig;
use sales_report::core::{ConfigProvider, Pipeline};
use sales_report::utils::{logger, validation::Validate};
use sales_report::{LocalStorage, ReportEngine, ReportPipeline};

#[derive(Parser)]
#[command(name = "toml-report")]
#[command(about = "Sales report with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "sales-report.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Override compression setting from config
    #[arg(long)]
    zip: Option<bool>,

    /// Dry run - validate and show what would be processed without writing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    let log_level = if config.monitoring_enabled() {
        config.log_level().map(str::to_string)
    } else {
        None
    };
    logger::init_logger(args.verbose, log_level.as_deref(), args.json_logs);

    tracing::info!("🚀 Starting TOML-based sales report");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(zip) = args.zip {
        config.load.compression = Some(sales_report::config::toml_config::CompressionConfig {
            enabled: zip,
        });
        tracing::info!("🔧 Compression overridden to: {}", zip);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config);

    let storage =
        LocalStorage::new(config.load.output_path.clone()).with_input_dir(config.base_dir());
    let pipeline = match ReportPipeline::new(storage, config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be written");
        let data = pipeline.extract().await?;
        println!(
            "🔍 Would rank {} sellers from {} purchase records ({} products)",
            data.sellers.len(),
            data.purchase_records.len(),
            data.products.len()
        );
        return Ok(());
    }

    let engine = ReportEngine::new(pipeline);
    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Sales report completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("❌ Sales report failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Report: {}", config.report.name);
    if let Some(description) = &config.report.description {
        tracing::info!("   {}", description);
    }
    tracing::info!("   Source: {:?} (base dir: {})", config.data_source(), config.base_dir());
    tracing::info!(
        "   Policies: revenue={}, bonus={}",
        config.revenue_policy(),
        config.bonus_policy()
    );
    tracing::info!(
        "   Output: {} as [{}]{}",
        config.output_path(),
        config.output_formats().join(", "),
        if config.compression_enabled() { " (zip)" } else { "" }
    );
}
