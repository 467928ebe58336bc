use asset_intake::config::toml_config::TomlConfig;
use asset_intake::core::ConfigProvider;
use asset_intake::utils::error::ErrorSeverity;
use asset_intake::utils::{logger, validation::Validate};
use asset_intake::{
    check_csv_content, format_csv_as_table, map_table, CsvIntakePipeline, IntakeEngine,
    LocalStorage,
};
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-intake")]
#[command(about = "Asset-request CSV intake with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "intake-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override preview setting from config
    #[arg(long)]
    preview: Option<bool>,

    /// Dry run - validate and show the parsed table without writing outputs
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

    if config.log_format() == Some("json") {
        logger::init_json_logger(if args.verbose { "debug" } else { config.log_level() });
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based intake '{}'", config.intake.name);
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Some(preview) = args.preview {
        config.intake.preview = Some(preview);
        tracing::info!("🔧 Preview overridden to: {}", preview);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No outputs will be written");
        perform_dry_run(&config).await?;
        return Ok(());
    }

    let storage = LocalStorage::new(".");
    let pipeline = CsvIntakePipeline::new(storage, config);
    let engine = IntakeEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Intake completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Intake failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

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
    tracing::info!("📋 Intake Summary:");
    tracing::info!("   Name: {}", config.intake.name);
    if let Some(description) = &config.intake.description {
        tracing::info!("   Description: {}", description);
    }
    tracing::info!("   Source: {}", config.input_path());
    tracing::info!("   Output Path: {}", config.output_path());
    tracing::info!("   Output Formats: {}", config.output_formats().join(", "));
}

async fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(config.input_path()).await?;
    let table = check_csv_content(&content)?;
    let records = map_table(&table);

    println!("{}", format_csv_as_table(&table));
    println!(
        "🔍 {} rows would produce {} asset requests",
        table.rows.len(),
        records.len()
    );

    Ok(())
}
